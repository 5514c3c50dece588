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

use bitcoin_hashes::{sha256, Hash, HashEngine};
use codec::{PubKey, Signature, SignatureError};
use tracing::debug;

use crate::coders::{Encode, VarUint32};
use crate::{Action, ChainConfig, RawAction, Sign, SignError, TransactionHeader};

/// Compression marker of packed transactions; this wallet never compresses.
pub const COMPRESSION_NONE: &str = "none";

/// Unsigned transaction: header followed by ordered list of actions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Transaction {
    header: TransactionHeader,
    actions: Vec<Action>,
}

impl Transaction {
    pub fn new(header: TransactionHeader, actions: Vec<Action>) -> Self {
        Transaction { header, actions }
    }

    pub fn header(&self) -> &TransactionHeader { &self.header }

    pub fn actions(&self) -> &[Action] { &self.actions }

    pub fn to_raw_actions(&self, config: &ChainConfig) -> Vec<RawAction> {
        self.actions.iter().map(|action| action.to_raw(config)).collect()
    }

    /// Serializes transaction into the chain binary layout: header, empty
    /// context-free actions, actions and empty extensions.
    pub fn pack(&self, config: &ChainConfig) -> Vec<u8> {
        let context_free_actions: Vec<RawAction> = vec![];
        let mut data = self.header.serialize();
        data.extend(context_free_actions.serialize());
        data.extend(self.to_raw_actions(config).serialize());
        data.extend(VarUint32::default().serialize());
        data
    }

    /// Transaction id: SHA256 of the packed transaction.
    pub fn id(&self, config: &ChainConfig) -> [u8; 32] {
        sha256::Hash::hash(&self.pack(config)).to_byte_array()
    }

    /// Digest committed to by signatures:
    /// `SHA256(chain_id ‖ packed_trx ‖ 32 zero bytes)`, where the last part
    /// stands for the absent context-free data.
    pub fn sig_digest(&self, config: &ChainConfig) -> [u8; 32] {
        sig_digest(config, &self.pack(config))
    }

    /// Produces the single signature of the transaction.
    pub fn sign(
        &self,
        config: &ChainConfig,
        signer: &impl Sign,
    ) -> Result<SignedTransaction, SignError> {
        let packed_trx = self.pack(config);
        let digest = sig_digest(config, &packed_trx);
        let signature = signer.sign_digest(digest).ok_or(SignError::CannotSign)?;
        debug!(
            actions = self.actions.len(),
            digest = %hex::encode(digest),
            "transaction signed"
        );
        Ok(SignedTransaction {
            transaction: self.clone(),
            signatures: vec![signature],
            packed_trx,
        })
    }
}

fn sig_digest(config: &ChainConfig, packed_trx: &[u8]) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    engine.input(config.chain_id.as_bytes());
    engine.input(packed_trx);
    engine.input(&[0u8; 32]);
    sha256::Hash::from_engine(engine).to_byte_array()
}

/// Transaction with its signatures, ready for broadcasting.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SignedTransaction {
    transaction: Transaction,
    signatures: Vec<Signature>,
    packed_trx: Vec<u8>,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction { &self.transaction }

    pub fn signatures(&self) -> &[Signature] { &self.signatures }

    pub fn packed_trx(&self) -> &[u8] { &self.packed_trx }

    /// Recovers public keys which have produced the signatures.
    pub fn signers(&self, config: &ChainConfig) -> Result<Vec<PubKey>, SignatureError> {
        let digest = sig_digest(config, &self.packed_trx);
        self.signatures.iter().map(|sig| sig.recover(digest)).collect()
    }

    /// Payload accepted by the chain RPC `push_transaction` endpoint.
    pub fn to_packed(&self) -> PackedTransaction {
        PackedTransaction {
            signatures: self.signatures.clone(),
            compression: COMPRESSION_NONE.to_owned(),
            packed_context_free_data: String::new(),
            packed_trx: hex::encode(&self.packed_trx),
        }
    }
}

/// Broadcast form of a signed transaction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct PackedTransaction {
    pub signatures: Vec<Signature>,
    pub compression: String,
    pub packed_context_free_data: String,
    pub packed_trx: String,
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use chrono::{TimeZone, Utc};
    use codec::{Asset, PrivKey};

    use super::*;
    use crate::{Name, TaposRef};

    fn transfer() -> Transaction {
        let expiration = Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap();
        let header =
            TransactionHeader::with_expiration(expiration, TaposRef::new(0x1234, 0xDEAD_BEEF))
                .unwrap();
        Transaction::new(header, vec![Action::Transfer {
            from: Name::from_str("alice").unwrap(),
            to: Name::from_str("bob").unwrap(),
            quantity: Asset::core(100000),
            memo: "test".to_owned(),
        }])
    }

    #[test]
    fn packed_layout() {
        let config = ChainConfig::default();
        let packed = transfer().pack(&config);
        let header_len = 4 + 2 + 4 + 1 + 1 + 1;
        assert_eq!(&packed[4..10], &[0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE]);
        // no context free actions, one action
        assert_eq!(&packed[header_len..header_len + 2], &[0, 1]);
        let action = &packed[header_len + 1..packed.len() - 1];
        assert_eq!(action[0], 1);
        assert_eq!(&action[1..9], &Name::from_static("eosio.token").to_u64().to_le_bytes());
        assert_eq!(&action[9..17], &Name::from_static("transfer").to_u64().to_le_bytes());
        // one authorization, 16 bytes, then data length 8 + 8 + 16 + 5
        assert_eq!(action[17], 1);
        assert_eq!(action[34], 37);
        assert_eq!(action.len(), 35 + 37);
        assert_eq!(packed[packed.len() - 1], 0);
    }

    #[test]
    fn signing() {
        let config = ChainConfig::default();
        let tx = transfer();
        let sk = PrivKey::from_byte_array([0x5A; 32]).unwrap();
        let signed = tx.sign(&config, &sk).unwrap();
        assert_eq!(signed.signatures().len(), 1);
        assert!(signed.signatures()[0].is_canonical());
        assert_eq!(signed.packed_trx(), tx.pack(&config).as_slice());
        assert_eq!(signed.signers(&config).unwrap(), vec![sk.public_key()]);
        assert_eq!(signed, tx.sign(&config, &sk).unwrap());
    }

    #[test]
    fn chain_id_is_committed() {
        let tx = transfer();
        let other = ChainConfig::with_chain_id([0x11; 32].into());
        assert_ne!(tx.sig_digest(&ChainConfig::default()), tx.sig_digest(&other));
        assert_eq!(tx.pack(&ChainConfig::default()), tx.pack(&other));
    }

    #[test]
    fn public_only_signer() {
        let sk = PrivKey::from_byte_array([0x5A; 32]).unwrap();
        assert_eq!(
            transfer().sign(&ChainConfig::default(), &sk.public_key()),
            Err(SignError::CannotSign)
        );
    }

    #[test]
    fn broadcast_form() {
        let config = ChainConfig::default();
        let sk = PrivKey::from_byte_array([0x5A; 32]).unwrap();
        let packed = transfer().sign(&config, &sk).unwrap().to_packed();
        assert_eq!(packed.compression, "none");
        assert_eq!(packed.packed_context_free_data, "");
        assert_eq!(packed.packed_trx, hex::encode(transfer().pack(&config)));
        assert!(packed.signatures[0].to_string().starts_with("SIG_K1_"));
        assert_eq!(transfer().id(&config).len(), 32);
    }
}
