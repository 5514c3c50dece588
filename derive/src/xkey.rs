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

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use amplify::{ByteArray, Bytes20, Bytes32, Bytes4, Wrapper};
use bitcoin_hashes::{hash160, sha512, Hash, HashEngine, Hmac, HmacEngine};
use codec::base58::{self, Base58Error};
use codec::{PrivKey, PubKey};
use secp256k1::{Scalar, SECP256K1};
use tracing::trace;

use crate::{DerivationIndex, HardenedIndex, Idx, NormalIndex, Seed};

pub const XPRIV_MAINNET_MAGIC: [u8; 4] = [0x04u8, 0x88, 0xAD, 0xE4];
pub const XPRIV_TESTNET_MAGIC: [u8; 4] = [0x04u8, 0x35, 0x83, 0x94];

pub const XPUB_MAINNET_MAGIC: [u8; 4] = [0x04u8, 0x88, 0xB2, 0x1E];
pub const XPUB_TESTNET_MAGIC: [u8; 4] = [0x04u8, 0x35, 0x87, 0xCF];

/// Length of serialized extended key before Base58Check encoding.
pub const XKEY_LEN: usize = 78;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum XkeyDecodeError {
    /// wrong length of extended key data ({0}).
    WrongExtendedKeyLength(usize),

    /// provided key is not a standard BIP-32 extended key (version {0:02x?}).
    UnknownKeyType([u8; 4]),

    /// extended public key contains invalid public key data.
    InvalidPubkey,

    /// xpriv contains invalid byte for the secret key type ({0:#04x}) which must be set to zero.
    InvalidType(u8),

    /// xpriv contains invalid data with secret key value overflowing over field order.
    InvalidSecretKey,
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
pub enum XkeyParseError {
    /// wrong Base58 encoding of extended key data - {0}
    #[display(doc_comments)]
    #[from]
    Base58(Base58Error),

    #[display(inner)]
    #[from]
    Decode(XkeyDecodeError),
}

/// Errors happening during hierarchical key derivation.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum DeriveError {
    /// seed produces master secret key which is zero or overflows the curve
    /// order; use another seed.
    InvalidMasterKey,

    /// derivation at index {0} produces invalid child key; the next index
    /// must be used instead.
    InvalidChildKey(DerivationIndex),

    /// maximum derivation depth of 255 is exceeded.
    DepthOverflow,

    /// hardened index {0} can't be derived from an extended public key.
    HardenedFromPublic(HardenedIndex),
}

/// BIP32 chain code used for hierarchical derivation
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, From)]
#[wrapper(Deref, RangeOps)]
pub struct ChainCode(Bytes32);

impl AsRef<[u8]> for ChainCode {
    fn as_ref(&self) -> &[u8] { self.0.as_ref() }
}

impl From<[u8; 32]> for ChainCode {
    fn from(value: [u8; 32]) -> Self { Self(value.into()) }
}

impl From<ChainCode> for [u8; 32] {
    fn from(value: ChainCode) -> Self { value.0.into_inner() }
}

/// First four bytes of the key identifier, used to reference parent keys.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug, Display, From)]
#[wrapper(RangeOps, Hex, FromStr)]
#[display(LowerHex)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct XpubFp(
    #[from]
    #[from([u8; 4])]
    Bytes4,
);

impl AsRef<[u8]> for XpubFp {
    fn as_ref(&self) -> &[u8] { self.0.as_ref() }
}

impl From<XpubFp> for [u8; 4] {
    fn from(value: XpubFp) -> Self { value.0.into_inner() }
}

impl XpubFp {
    pub const fn master() -> Self { Self(Bytes4::zero()) }
}

/// HASH160 of the compressed public key.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug, Display, From)]
#[wrapper(RangeOps, Hex, FromStr)]
#[display(LowerHex)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct XpubId(
    #[from]
    #[from([u8; 20])]
    Bytes20,
);

impl AsRef<[u8]> for XpubId {
    fn as_ref(&self) -> &[u8] { self.0.as_ref() }
}

impl From<XpubId> for [u8; 20] {
    fn from(value: XpubId) -> Self { value.0.into_inner() }
}

/// Position of an extended key inside the derivation tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct XkeyMeta {
    pub depth: u8,
    pub parent_fp: XpubFp,
    pub child_number: DerivationIndex,
}

impl XkeyMeta {
    pub const fn master() -> Self {
        XkeyMeta {
            depth: 0,
            parent_fp: XpubFp::master(),
            child_number: DerivationIndex::normal(0),
        }
    }

    fn child(&self, parent_fp: XpubFp, child_number: DerivationIndex) -> Result<Self, DeriveError> {
        Ok(XkeyMeta {
            depth: self.depth.checked_add(1).ok_or(DeriveError::DepthOverflow)?,
            parent_fp,
            child_number,
        })
    }

    fn encode_into(&self, magic: [u8; 4], chain_code: &ChainCode, ret: &mut [u8; XKEY_LEN]) {
        ret[0..4].copy_from_slice(&magic);
        ret[4] = self.depth;
        ret[5..9].copy_from_slice(self.parent_fp.as_ref());
        ret[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        ret[13..45].copy_from_slice(chain_code.as_ref());
    }

    fn decode(data: &[u8]) -> (Self, ChainCode) {
        let mut parent_fp = [0u8; 4];
        parent_fp.copy_from_slice(&data[5..9]);

        let mut child_number = [0u8; 4];
        child_number.copy_from_slice(&data[9..13]);
        let child_number = u32::from_be_bytes(child_number);

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let meta = XkeyMeta {
            depth: data[4],
            parent_fp: parent_fp.into(),
            child_number: child_number.into(),
        };
        (meta, chain_code.into())
    }
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> ([u8; 32], ChainCode) {
    let mut engine: HmacEngine<sha512::Hash> = HmacEngine::new(key);
    engine.input(data);
    let hmac = Hmac::<sha512::Hash>::from_engine(engine).to_byte_array();

    let mut il = [0u8; 32];
    il.copy_from_slice(&hmac[..32]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&hmac[32..]);
    (il, chain_code.into())
}

fn magic_of(data: &[u8]) -> [u8; 4] {
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&data[0..4]);
    magic
}

/// Extended public key.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Xpub {
    testnet: bool,
    meta: XkeyMeta,
    public_key: PubKey,
    chain_code: ChainCode,
}

impl Xpub {
    pub fn decode(data: impl AsRef<[u8]>) -> Result<Xpub, XkeyDecodeError> {
        let data = data.as_ref();

        if data.len() != XKEY_LEN {
            return Err(XkeyDecodeError::WrongExtendedKeyLength(data.len()));
        }

        let testnet = match magic_of(data) {
            XPUB_MAINNET_MAGIC => false,
            XPUB_TESTNET_MAGIC => true,
            unknown => return Err(XkeyDecodeError::UnknownKeyType(unknown)),
        };
        let (meta, chain_code) = XkeyMeta::decode(data);
        let public_key =
            PubKey::from_slice(&data[45..78]).map_err(|_| XkeyDecodeError::InvalidPubkey)?;

        Ok(Xpub {
            testnet,
            meta,
            public_key,
            chain_code,
        })
    }

    pub fn encode(&self) -> [u8; XKEY_LEN] {
        let mut ret = [0; XKEY_LEN];
        let magic = match self.testnet {
            false => XPUB_MAINNET_MAGIC,
            true => XPUB_TESTNET_MAGIC,
        };
        self.meta.encode_into(magic, &self.chain_code, &mut ret);
        ret[45..78].copy_from_slice(&self.public_key.serialize());
        ret
    }

    #[must_use]
    pub fn is_testnet(&self) -> bool { self.testnet }

    pub fn depth(&self) -> u8 { self.meta.depth }

    pub fn child_number(&self) -> DerivationIndex { self.meta.child_number }

    pub fn parent_fp(&self) -> XpubFp { self.meta.parent_fp }

    pub fn meta(&self) -> XkeyMeta { self.meta }

    pub fn chain_code(&self) -> ChainCode { self.chain_code }

    pub fn public_key(&self) -> PubKey { self.public_key }

    /// Returns the HASH160 of the public key
    pub fn identifier(&self) -> XpubId {
        let hash = hash160::Hash::hash(&self.public_key.serialize());
        XpubId::from_byte_array(hash.to_byte_array())
    }

    pub fn fingerprint(&self) -> XpubFp {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.identifier()[..4]);
        XpubFp::from_byte_array(bytes)
    }

    /// Attempts to derive an extended public key from a path.
    ///
    /// Fails on the first hardened segment, since hardened children require
    /// the parent secret key.
    pub fn derive_pub<I: Into<DerivationIndex> + Copy>(
        &self,
        path: impl AsRef<[I]>,
    ) -> Result<Self, DeriveError> {
        let mut xpub = *self;
        for idx in path.as_ref() {
            xpub = match (*idx).into() {
                DerivationIndex::Normal(idx) => xpub.ckd_pub(idx)?,
                DerivationIndex::Hardened(idx) => return Err(DeriveError::HardenedFromPublic(idx)),
            };
        }
        Ok(xpub)
    }

    /// Compute the scalar tweak added to this key to get a child key
    pub fn ckd_pub_tweak(&self, child_no: NormalIndex) -> Result<(Scalar, ChainCode), DeriveError> {
        let mut data = self.public_key.serialize().to_vec();
        data.extend_from_slice(&child_no.to_be_bytes());
        let (il, chain_code) = hmac_sha512(self.chain_code.as_ref(), &data);
        let scalar = Scalar::from_be_bytes(il)
            .map_err(|_| DeriveError::InvalidChildKey(child_no.into()))?;
        Ok((scalar, chain_code))
    }

    /// Public->Public child key derivation
    pub fn ckd_pub(&self, child_no: NormalIndex) -> Result<Xpub, DeriveError> {
        let (scalar, chain_code) = self.ckd_pub_tweak(child_no)?;
        let tweaked = self
            .public_key
            .as_public_key()
            .add_exp_tweak(SECP256K1, &scalar)
            .map_err(|_| DeriveError::InvalidChildKey(child_no.into()))?;
        let meta = self.meta.child(self.fingerprint(), child_no.into())?;
        trace!(depth = meta.depth, index = %child_no, "derived public child key");

        Ok(Xpub {
            testnet: self.testnet,
            meta,
            public_key: tweaked.into(),
            chain_code,
        })
    }
}

impl Display for Xpub {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&base58::encode_check(&self.encode()))
    }
}

impl FromStr for Xpub {
    type Err = XkeyParseError;

    fn from_str(inp: &str) -> Result<Xpub, XkeyParseError> {
        let data = base58::decode_check(inp)?;
        Ok(Xpub::decode(data)?)
    }
}

/// Extended private key.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Xpriv {
    testnet: bool,
    meta: XkeyMeta,
    private_key: PrivKey,
    chain_code: ChainCode,
}

impl Debug for Xpriv {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Xpriv")
            .field("testnet", &self.testnet)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

impl Xpriv {
    /// Constructs master extended private key from the seed.
    pub fn new_master(testnet: bool, seed: &Seed) -> Result<Xpriv, DeriveError> {
        let (il, chain_code) = hmac_sha512(MASTER_HMAC_KEY, seed.as_bytes());
        let private_key =
            PrivKey::from_byte_array(il).map_err(|_| DeriveError::InvalidMasterKey)?;
        trace!(testnet, "master extended key constructed from seed");

        Ok(Xpriv {
            testnet,
            meta: XkeyMeta::master(),
            private_key,
            chain_code,
        })
    }

    pub fn decode(data: impl AsRef<[u8]>) -> Result<Xpriv, XkeyDecodeError> {
        let data = data.as_ref();

        if data.len() != XKEY_LEN {
            return Err(XkeyDecodeError::WrongExtendedKeyLength(data.len()));
        }

        let testnet = match magic_of(data) {
            XPRIV_MAINNET_MAGIC => false,
            XPRIV_TESTNET_MAGIC => true,
            unknown => return Err(XkeyDecodeError::UnknownKeyType(unknown)),
        };
        let (meta, chain_code) = XkeyMeta::decode(data);

        if data[45] != 0x00 {
            return Err(XkeyDecodeError::InvalidType(data[45]));
        }
        let private_key =
            PrivKey::from_slice(&data[46..78]).map_err(|_| XkeyDecodeError::InvalidSecretKey)?;

        Ok(Xpriv {
            testnet,
            meta,
            private_key,
            chain_code,
        })
    }

    pub fn encode(&self) -> [u8; XKEY_LEN] {
        let mut ret = [0; XKEY_LEN];
        let magic = match self.testnet {
            false => XPRIV_MAINNET_MAGIC,
            true => XPRIV_TESTNET_MAGIC,
        };
        self.meta.encode_into(magic, &self.chain_code, &mut ret);
        ret[45] = 0;
        ret[46..78].copy_from_slice(&self.private_key.to_byte_array());
        ret
    }

    #[must_use]
    pub fn is_testnet(&self) -> bool { self.testnet }

    pub fn depth(&self) -> u8 { self.meta.depth }

    pub fn child_number(&self) -> DerivationIndex { self.meta.child_number }

    pub fn parent_fp(&self) -> XpubFp { self.meta.parent_fp }

    pub fn meta(&self) -> XkeyMeta { self.meta }

    pub fn chain_code(&self) -> ChainCode { self.chain_code }

    pub fn fingerprint(&self) -> XpubFp { self.to_xpub().fingerprint() }

    pub fn identifier(&self) -> XpubId { self.to_xpub().identifier() }

    pub fn private_key(&self) -> PrivKey { self.private_key }

    pub fn public_key(&self) -> PubKey { self.private_key.public_key() }

    pub fn to_xpub(&self) -> Xpub {
        Xpub {
            testnet: self.testnet,
            meta: self.meta,
            public_key: self.public_key(),
            chain_code: self.chain_code,
        }
    }

    /// Attempts to derive an extended private key from a path.
    ///
    /// The `path` argument can be both of type `DerivationPath` or `Vec<DerivationIndex>`.
    pub fn derive_priv<I: Into<DerivationIndex> + Copy>(
        &self,
        path: impl AsRef<[I]>,
    ) -> Result<Xpriv, DeriveError> {
        let mut xpriv: Xpriv = *self;
        for idx in path.as_ref() {
            xpriv = xpriv.ckd_priv(*idx)?;
        }
        Ok(xpriv)
    }

    /// Private->Private child key derivation
    pub fn ckd_priv(&self, idx: impl Into<DerivationIndex>) -> Result<Xpriv, DeriveError> {
        let idx = idx.into();

        let mut data = Vec::with_capacity(37);
        match idx {
            // Non-hardened key: compute public data and use that
            DerivationIndex::Normal(_) => data.extend_from_slice(&self.public_key().serialize()),
            // Hardened key: use only secret data to prevent public derivation
            DerivationIndex::Hardened(_) => {
                data.push(0u8);
                data.extend_from_slice(&self.private_key.to_byte_array());
            }
        }
        data.extend_from_slice(&idx.to_be_bytes());
        let (il, chain_code) = hmac_sha512(self.chain_code.as_ref(), &data);

        let tweak = Scalar::from_be_bytes(il).map_err(|_| DeriveError::InvalidChildKey(idx))?;
        let private_key = self
            .private_key
            .as_secret_key()
            .add_tweak(&tweak)
            .map_err(|_| DeriveError::InvalidChildKey(idx))?;
        let meta = self.meta.child(self.fingerprint(), idx)?;
        trace!(depth = meta.depth, index = %idx, "derived private child key");

        Ok(Xpriv {
            testnet: self.testnet,
            meta,
            private_key: private_key.into(),
            chain_code,
        })
    }
}

impl Display for Xpriv {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&base58::encode_check(&self.encode()))
    }
}

impl FromStr for Xpriv {
    type Err = XkeyParseError;

    fn from_str(inp: &str) -> Result<Xpriv, XkeyParseError> {
        let data = base58::decode_check(inp)?;
        Ok(Xpriv::decode(data)?)
    }
}

/// Extended key of either kind, distinguished by its version bytes.
#[derive(Copy, Clone, Eq, PartialEq, Debug, From)]
pub enum XkeyAny {
    #[from]
    Private(Xpriv),
    #[from]
    Public(Xpub),
}

impl XkeyAny {
    pub fn decode(data: impl AsRef<[u8]>) -> Result<Self, XkeyDecodeError> {
        let data = data.as_ref();
        if data.len() != XKEY_LEN {
            return Err(XkeyDecodeError::WrongExtendedKeyLength(data.len()));
        }
        match magic_of(data) {
            XPRIV_MAINNET_MAGIC | XPRIV_TESTNET_MAGIC => Xpriv::decode(data).map(Self::Private),
            _ => Xpub::decode(data).map(Self::Public),
        }
    }

    pub fn is_private(&self) -> bool { matches!(self, XkeyAny::Private(_)) }

    pub fn xpriv(&self) -> Option<Xpriv> {
        match self {
            XkeyAny::Private(xpriv) => Some(*xpriv),
            XkeyAny::Public(_) => None,
        }
    }

    pub fn to_xpub(&self) -> Xpub {
        match self {
            XkeyAny::Private(xpriv) => xpriv.to_xpub(),
            XkeyAny::Public(xpub) => *xpub,
        }
    }

    pub fn public_key(&self) -> PubKey { self.to_xpub().public_key() }

    /// Derives child key keeping the kind of the key.
    pub fn derive<I: Into<DerivationIndex> + Copy>(
        &self,
        path: impl AsRef<[I]>,
    ) -> Result<Self, DeriveError> {
        Ok(match self {
            XkeyAny::Private(xpriv) => XkeyAny::Private(xpriv.derive_priv(path)?),
            XkeyAny::Public(xpub) => XkeyAny::Public(xpub.derive_pub(path)?),
        })
    }
}

impl Display for XkeyAny {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            XkeyAny::Private(xpriv) => Display::fmt(xpriv, f),
            XkeyAny::Public(xpub) => Display::fmt(xpub, f),
        }
    }
}

impl FromStr for XkeyAny {
    type Err = XkeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = base58::decode_check(s)?;
        Ok(XkeyAny::decode(data)?)
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Xpub {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_string())
            } else {
                serializer.serialize_bytes(&self.encode())
            }
        }
    }

    impl<'de> Deserialize<'de> for Xpub {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            if deserializer.is_human_readable() {
                let s = String::deserialize(deserializer)?;
                Xpub::from_str(&s).map_err(|err| {
                    de::Error::custom(format!("invalid xpub string representation; {err}"))
                })
            } else {
                let v = Vec::<u8>::deserialize(deserializer)?;
                Xpub::decode(v)
                    .map_err(|err| de::Error::custom(format!("invalid xpub bytes; {err}")))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // BIP32 test vector 1
    const SEED: &str = "000102030405060708090a0b0c0d0e0f";
    const M_XPRV: &str = "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi";
    const M_XPUB: &str = "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8";
    const M0H_XPRV: &str = "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7";
    const M0H1_XPUB: &str = "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ";

    fn master() -> Xpriv { Xpriv::new_master(false, &Seed::from_hex(SEED).unwrap()).unwrap() }

    #[test]
    fn master_from_seed() {
        let xpriv = master();
        assert_eq!(xpriv.to_string(), M_XPRV);
        assert_eq!(xpriv.to_xpub().to_string(), M_XPUB);
        assert_eq!(xpriv.depth(), 0);
        assert_eq!(xpriv.parent_fp(), XpubFp::master());
        assert_eq!(xpriv.fingerprint().to_string(), "3442193e");
    }

    #[test]
    fn private_derivation() {
        let xpriv = master();
        let child = xpriv.ckd_priv(HardenedIndex::hardened(0)).unwrap();
        assert_eq!(child.to_string(), M0H_XPRV);
        assert_eq!(child.parent_fp(), xpriv.fingerprint());
        let path = [DerivationIndex::hardened(0), DerivationIndex::normal(1)];
        assert_eq!(xpriv.derive_priv(path).unwrap().to_xpub().to_string(), M0H1_XPUB);
    }

    #[test]
    fn public_derivation_matches_private() {
        let xpriv = master().ckd_priv(HardenedIndex::hardened(0)).unwrap();
        let xpub = xpriv.to_xpub().derive_pub([NormalIndex::normal(1)]).unwrap();
        assert_eq!(xpub.to_string(), M0H1_XPUB);
    }

    #[test]
    fn hardened_from_public() {
        let xpub = master().to_xpub();
        assert_eq!(
            xpub.derive_pub([DerivationIndex::hardened(44)]),
            Err(DeriveError::HardenedFromPublic(HardenedIndex::hardened(44)))
        );
    }

    #[test]
    fn string_roundtrip() {
        assert_eq!(Xpriv::from_str(M_XPRV).unwrap().to_string(), M_XPRV);
        assert_eq!(Xpub::from_str(M_XPUB).unwrap().to_string(), M_XPUB);
        let xpub = Xpub::from_str(M0H1_XPUB).unwrap();
        assert_eq!(xpub.depth(), 2);
        assert_eq!(xpub.child_number(), DerivationIndex::normal(1));
    }

    #[test]
    fn any_kind() {
        assert!(XkeyAny::from_str(M_XPRV).unwrap().is_private());
        assert!(!XkeyAny::from_str(M_XPUB).unwrap().is_private());
        assert_eq!(
            XkeyAny::from_str(M_XPRV).unwrap().to_xpub(),
            Xpub::from_str(M_XPUB).unwrap()
        );
    }

    #[test]
    fn testnet_magic() {
        let xpriv = Xpriv::new_master(true, &Seed::from_hex(SEED).unwrap()).unwrap();
        assert!(xpriv.to_string().starts_with("tprv"));
        assert!(xpriv.to_xpub().to_string().starts_with("tpub"));
        assert!(Xpriv::from_str(&xpriv.to_string()).unwrap().is_testnet());
    }

    #[test]
    fn decode_errors() {
        assert_eq!(Xpub::decode([0u8; 77]), Err(XkeyDecodeError::WrongExtendedKeyLength(77)));

        let mut data = Xpriv::from_str(M_XPRV).unwrap().encode();
        assert_eq!(Xpub::decode(data), Err(XkeyDecodeError::UnknownKeyType(XPRIV_MAINNET_MAGIC)));
        data[45] = 0x01;
        assert_eq!(Xpriv::decode(data), Err(XkeyDecodeError::InvalidType(0x01)));
        data[45] = 0x00;
        data[46..78].copy_from_slice(&[0xFF; 32]);
        assert_eq!(Xpriv::decode(data), Err(XkeyDecodeError::InvalidSecretKey));

        let mut data = Xpub::from_str(M_XPUB).unwrap().encode();
        data[45] = 0x05;
        assert_eq!(Xpub::decode(data), Err(XkeyDecodeError::InvalidPubkey));

        assert!(matches!(
            Xpub::from_str("xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet9"),
            Err(XkeyParseError::Base58(Base58Error::ChecksumMismatch { .. }))
        ));
    }

    #[test]
    fn depth_overflow() {
        let mut data = master().encode();
        data[4] = 255;
        let xpriv = Xpriv::decode(data).unwrap();
        assert_eq!(xpriv.ckd_priv(NormalIndex::ZERO), Err(DeriveError::DepthOverflow));
    }
}
