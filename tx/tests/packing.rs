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

use std::str::FromStr;

use chrono::{TimeZone, Utc};
use codec::PrivKey;
use proptest::prelude::*;
use tx::{Assembler, ChainConfig, Name, TaposRef, Transaction, TransactionHeader};

const TRANSFER_PACKED: &str = "4035115b3412efbeadde000000000100a6823403ea3055000000572d3ccdcd010000000000855c3400000000a8ed3232250000000000855c340000000000000e3da08601000000000004454f5300000000047465737400";
const TRANSFER_ID: &str = "bc6c325d8ef5fd01e6646888c3f7c0f0f4547ea08994920b18bf5f4a28c560a9";
const TRANSFER_DIGEST: &str = "8039c7c48f5982608f4a18469aa1944450a33b36c518b0ff14a536394bc5a7ac";

fn header() -> TransactionHeader {
    let expiration = Utc.with_ymd_and_hms(2018, 6, 1, 12, 0, 0).unwrap();
    TransactionHeader::with_expiration(expiration, TaposRef::new(0x1234, 0xDEAD_BEEF)).unwrap()
}

fn transfer(amount: i64, memo: &str) -> Transaction {
    Assembler::default()
        .transfer(
            header(),
            Name::from_str("alice").unwrap(),
            Name::from_str("bob").unwrap(),
            amount,
            memo,
        )
        .unwrap()
}

#[test]
fn transfer_vector() {
    let config = ChainConfig::default();
    let tx = transfer(100000, "test");
    assert_eq!(hex::encode(tx.pack(&config)), TRANSFER_PACKED);
    assert_eq!(hex::encode(tx.id(&config)), TRANSFER_ID);
    assert_eq!(hex::encode(tx.sig_digest(&config)), TRANSFER_DIGEST);
    assert_eq!(tx.header().expiration_iso(), "2018-06-01T12:00:00");
}

#[test]
fn signed_payload() {
    let config = ChainConfig::default();
    let sk = PrivKey::from_byte_array([0x42; 32]).unwrap();
    let signed = Assembler::default().sign(&transfer(100000, "test"), &sk).unwrap();
    let packed = signed.to_packed();
    assert_eq!(packed.packed_trx, TRANSFER_PACKED);
    assert_eq!(packed.signatures.len(), 1);
    let digest = signed.transaction().sig_digest(&config);
    assert_eq!(packed.signatures[0].recover(digest).unwrap(), sk.public_key());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn signing_is_deterministic_and_canonical(
        key in prop::array::uniform32(1u8..),
        amount in 0i64..1_000_000_000,
        memo in "[a-z ]{0,64}",
    ) {
        let config = ChainConfig::default();
        let sk = PrivKey::from_byte_array(key).unwrap();
        let tx = transfer(amount, &memo);
        let first = tx.sign(&config, &sk).unwrap();
        let second = tx.sign(&config, &sk).unwrap();
        prop_assert_eq!(first.signatures().len(), 1);
        prop_assert!(first.signatures()[0].is_canonical());
        prop_assert_eq!(first.packed_trx(), second.packed_trx());
        prop_assert_eq!(first.signatures(), second.signatures());
        prop_assert_eq!(first.signers(&config).unwrap(), vec![sk.public_key()]);
    }

    #[test]
    fn names_roundtrip(name in "[a-z1-5]{1,12}") {
        let parsed = Name::from_str(&name).unwrap();
        prop_assert_eq!(parsed.to_string(), name);
    }
}

#[cfg(feature = "serde")]
#[test]
fn chain_config_json() {
    let config = ChainConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"tokenContract\":\"eosio.token\""));
    assert!(json.contains("\"symbol\":\"4,EOS\""));
    assert_eq!(serde_json::from_str::<ChainConfig>(&json).unwrap(), config);
    // omitted fields fall back to mainnet defaults
    assert_eq!(serde_json::from_str::<ChainConfig>("{}").unwrap(), config);
}

#[cfg(feature = "serde")]
#[test]
fn packed_transaction_json() {
    let sk = PrivKey::from_byte_array([0x42; 32]).unwrap();
    let packed = Assembler::default().sign(&transfer(100000, "test"), &sk).unwrap().to_packed();
    let json = serde_json::to_value(&packed).unwrap();
    assert_eq!(json["packed_trx"], TRANSFER_PACKED);
    assert_eq!(json["compression"], "none");
    assert!(json["signatures"][0].as_str().unwrap().starts_with("SIG_K1_"));
    assert_eq!(serde_json::from_value::<tx::PackedTransaction>(json).unwrap(), packed);
}
