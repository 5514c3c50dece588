// Deterministic EOS key management & offline transaction assembly library.
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2020-2024 by
//     Dr Maxim Orlovsky <orlovsky@lnp-bp.org>
//
// Copyright (C) 2020-2024 LNP/BP Standards Association. All rights reserved.
// Copyright (C) 2020-2024 Dr Maxim Orlovsky. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wallet tree nodes and the key material they are built from.

use std::str::FromStr;

use codec::{Address, KeyError, PrivKey, PubKey, Wif, WifError};
use derive::{
    DerivationIndex, DerivationParseError, DerivationPath, DeriveError, IndexError, Seed,
    SeedError, XkeyAny, XkeyParseError, Xpriv, Xpub,
};
use tracing::debug;

#[derive(Clone, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum NodeError {
    /// node is constructed from a raw private key and has no chain code
    /// required for derivation.
    NotDerivable,

    /// node holds no private key.
    NoPrivateKey,

    /// node is constructed from a raw private key and has no chain code
    /// required for extended key serialization.
    NoPublicKeyContext,

    #[from]
    #[display(inner)]
    Seed(SeedError),

    #[from]
    #[display(inner)]
    Derive(DeriveError),

    #[from]
    #[display(inner)]
    ExtendedKey(XkeyParseError),

    #[from]
    #[display(inner)]
    Wif(WifError),

    #[from]
    #[display(inner)]
    Key(KeyError),

    #[from]
    #[display(inner)]
    Path(DerivationParseError),

    #[from]
    #[display(inner)]
    Index(IndexError),
}

impl NodeError {
    /// Whether the error means the node lacks what a derivation or extended
    /// key serialization needs: a chain code, or a private key for hardened
    /// steps.
    pub fn is_not_derivable(&self) -> bool {
        matches!(
            self,
            NodeError::NotDerivable
                | NodeError::NoPublicKeyContext
                | NodeError::Derive(DeriveError::HardenedFromPublic(_))
        )
    }
}

/// Origin of the key material held by a node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum KeyMaterial {
    /// Master node generated from a seed.
    Seed { seed: Seed, xpriv: Xpriv },

    /// Node imported from (or derived into) an extended key.
    Extended(XkeyAny),

    /// Bare private key without chain code.
    RawPrivateKey(PrivKey),
}

/// Immutable node of the deterministic key tree. Every derivation produces a
/// new node.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HdNode {
    material: KeyMaterial,
}

impl From<XkeyAny> for HdNode {
    fn from(xkey: XkeyAny) -> Self {
        HdNode {
            material: KeyMaterial::Extended(xkey),
        }
    }
}

impl From<Xpriv> for HdNode {
    fn from(xpriv: Xpriv) -> Self { XkeyAny::Private(xpriv).into() }
}

impl From<Xpub> for HdNode {
    fn from(xpub: Xpub) -> Self { XkeyAny::Public(xpub).into() }
}

impl From<PrivKey> for HdNode {
    fn from(sk: PrivKey) -> Self {
        HdNode {
            material: KeyMaterial::RawPrivateKey(sk),
        }
    }
}

impl HdNode {
    pub fn from_seed(seed: Seed, testnet: bool) -> Result<Self, NodeError> {
        let xpriv = Xpriv::new_master(testnet, &seed)?;
        debug!(seed_len = seed.len(), testnet, "master node created from seed");
        Ok(HdNode {
            material: KeyMaterial::Seed { seed, xpriv },
        })
    }

    /// Creates mainnet master node from raw seed bytes.
    pub fn from_master_seed(seed: impl Into<Vec<u8>>) -> Result<Self, NodeError> {
        Self::from_seed(Seed::from_bytes(seed)?, false)
    }

    pub fn from_seed_hex(seed: &str) -> Result<Self, NodeError> {
        Self::from_seed(Seed::from_hex(seed)?, false)
    }

    /// Creates mainnet master node from mnemonic phrase and passphrase; see
    /// [`Seed::from_mnemonic`].
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, NodeError> {
        Self::from_seed(Seed::from_mnemonic(phrase, passphrase), false)
    }

    /// Generates a random English mnemonic, which can be fed back into
    /// [`HdNode::from_mnemonic`].
    pub fn generate_mnemonic(word_count: usize) -> Result<String, NodeError> {
        Ok(Seed::generate_mnemonic(word_count)?)
    }

    /// Parses `xprv`, `xpub`, `tprv` or `tpub` extended key.
    pub fn from_extended_key(s: &str) -> Result<Self, NodeError> {
        let xkey = XkeyAny::from_str(s)?;
        debug!(
            private = xkey.is_private(),
            depth = xkey.to_xpub().depth(),
            "node imported from extended key"
        );
        Ok(xkey.into())
    }

    /// Imports private key in wallet import format. The node can sign, but
    /// can't derive children.
    pub fn from_private_key(wif: &str) -> Result<Self, NodeError> {
        let wif = Wif::from_str(wif)?;
        debug!("node imported from WIF private key");
        Ok(PrivKey::from(wif).into())
    }

    pub fn from_private_key_bytes(data: &[u8]) -> Result<Self, NodeError> {
        Ok(PrivKey::from_slice(data)?.into())
    }

    pub fn material(&self) -> &KeyMaterial { &self.material }

    /// Master seed, if the node was generated from one.
    pub fn seed(&self) -> Option<&Seed> {
        match &self.material {
            KeyMaterial::Seed { seed, .. } => Some(seed),
            _ => None,
        }
    }

    /// Extended key of the node, unless the node is a raw private key.
    pub fn xkey(&self) -> Option<XkeyAny> {
        match &self.material {
            KeyMaterial::Seed { xpriv, .. } => Some(XkeyAny::Private(*xpriv)),
            KeyMaterial::Extended(xkey) => Some(*xkey),
            KeyMaterial::RawPrivateKey(_) => None,
        }
    }

    pub fn is_derivable(&self) -> bool { self.xkey().is_some() }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, NodeError> {
        let xkey = self.xkey().ok_or(NodeError::NotDerivable)?;
        Ok(xkey.derive(path)?.into())
    }

    /// Parses path string such as `m/44'/194'/0'/0/0` and derives the node
    /// it points to.
    pub fn derive(&self, path: &str) -> Result<Self, NodeError> {
        let path = DerivationPath::from_str(path)?;
        self.derive_path(&path)
    }

    pub fn derive_child(&self, index: u32, hardened: bool) -> Result<Self, NodeError> {
        let index = DerivationIndex::with(index, hardened)?;
        self.derive_path(&DerivationPath::from(vec![index]))
    }

    pub fn private_key(&self) -> Option<PrivKey> {
        match &self.material {
            KeyMaterial::Seed { xpriv, .. } => Some(xpriv.private_key()),
            KeyMaterial::Extended(xkey) => xkey.xpriv().map(|xpriv| xpriv.private_key()),
            KeyMaterial::RawPrivateKey(sk) => Some(*sk),
        }
    }

    pub fn public_key(&self) -> PubKey {
        match &self.material {
            KeyMaterial::Seed { xpriv, .. } => xpriv.public_key(),
            KeyMaterial::Extended(xkey) => xkey.public_key(),
            KeyMaterial::RawPrivateKey(sk) => sk.public_key(),
        }
    }

    pub fn address(&self) -> Address { self.public_key().to_address() }

    pub fn private_key_wif(&self) -> Result<String, NodeError> {
        let sk = self.private_key().ok_or(NodeError::NoPrivateKey)?;
        Ok(Wif::new(sk).to_string())
    }

    pub fn private_extended_key(&self) -> Result<String, NodeError> {
        let xkey = self.xkey().ok_or(NodeError::NoPublicKeyContext)?;
        let xpriv = xkey.xpriv().ok_or(NodeError::NoPrivateKey)?;
        Ok(xpriv.to_string())
    }

    pub fn public_extended_key(&self) -> Result<String, NodeError> {
        let xkey = self.xkey().ok_or(NodeError::NoPublicKeyContext)?;
        Ok(xkey.to_xpub().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn seed_node() {
        let node = HdNode::from_seed_hex(SEED_HEX).unwrap();
        assert_eq!(node.seed().unwrap().to_hex(), SEED_HEX);
        assert!(node.is_derivable());
        assert_eq!(
            node.private_extended_key().unwrap(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMR\
             NNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(
            node.public_extended_key().unwrap(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsef\
             D265TMg7usUDFdp6W1EGMcet8"
        );
    }

    #[test]
    fn seed_length() {
        assert_eq!(
            HdNode::from_master_seed(vec![0u8; 8]),
            Err(NodeError::Seed(SeedError::InvalidLength(8)))
        );
    }

    #[test]
    fn public_only_node() {
        let master = HdNode::from_seed_hex(SEED_HEX).unwrap();
        let xpub = master.public_extended_key().unwrap();
        let node = HdNode::from_extended_key(&xpub).unwrap();
        assert_eq!(node.public_key(), master.public_key());
        assert_eq!(node.private_key(), None);
        assert_eq!(node.private_key_wif(), Err(NodeError::NoPrivateKey));
        assert_eq!(node.private_extended_key(), Err(NodeError::NoPrivateKey));
        assert_eq!(
            node.derive_child(1, false).unwrap().public_key(),
            master.derive_child(1, false).unwrap().public_key()
        );
        assert!(matches!(
            node.derive_child(1, true),
            Err(NodeError::Derive(DeriveError::HardenedFromPublic(_)))
        ));
        assert!(node.derive_child(1, true).unwrap_err().is_not_derivable());
        assert!(!NodeError::NoPrivateKey.is_not_derivable());
    }

    #[test]
    fn raw_key_node() {
        let node = HdNode::from_private_key_bytes(&[0x11; 32]).unwrap();
        assert!(!node.is_derivable());
        assert_eq!(node.derive("m/0"), Err(NodeError::NotDerivable));
        assert_eq!(node.derive_child(0, false), Err(NodeError::NotDerivable));
        assert_eq!(node.public_extended_key(), Err(NodeError::NoPublicKeyContext));
        assert_eq!(node.private_extended_key(), Err(NodeError::NoPublicKeyContext));
        assert_eq!(node.private_key().unwrap().to_byte_array(), [0x11; 32]);
        assert!(node.derive("m/0").unwrap_err().is_not_derivable());
        assert!(node.public_extended_key().unwrap_err().is_not_derivable());
        assert!(node.private_extended_key().unwrap_err().is_not_derivable());

        assert_eq!(
            HdNode::from_private_key_bytes(&[0x11; 31]),
            Err(NodeError::Key(KeyError::InvalidPrivateKeyLength(31)))
        );
        assert_eq!(
            HdNode::from_private_key_bytes(&[0u8; 32]),
            Err(NodeError::Key(KeyError::InvalidPrivateKeyValue))
        );
    }

    #[test]
    fn mnemonic_node() {
        let phrase = HdNode::generate_mnemonic(24).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);
        let node = HdNode::from_mnemonic(&phrase, "").unwrap();
        assert_eq!(node.seed().unwrap().len(), 64);
        assert!(node.derive("m/44'/194'/0'/0/0").is_ok());
        assert_eq!(
            HdNode::generate_mnemonic(10),
            Err(NodeError::Seed(SeedError::WordCount(10)))
        );
    }

    #[test]
    fn derivation_keeps_parent() {
        let master = HdNode::from_seed_hex(SEED_HEX).unwrap();
        let child = master.derive("m/0'").unwrap();
        assert!(master.seed().is_some());
        assert!(child.seed().is_none());
        assert_ne!(child.public_key(), master.public_key());
        assert_eq!(master.derive("m/0'").unwrap(), child);
        assert_eq!(master.derive_child(0, true).unwrap(), child);
        assert!(matches!(master.derive("m/x"), Err(NodeError::Path(_))));
        assert!(matches!(master.derive_child(1 << 31, false), Err(NodeError::Index(_))));
    }
}
