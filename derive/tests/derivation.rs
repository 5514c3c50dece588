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

use derive::{DerivationIndex, DerivationPath, NormalIndex, Seed, Xpriv, Xpub};
use proptest::prelude::*;

fn arb_seed() -> impl Strategy<Value = Seed> {
    prop::collection::vec(any::<u8>(), 16..=64).prop_map(|v| Seed::from_bytes(v).unwrap())
}

fn arb_path() -> impl Strategy<Value = DerivationPath> {
    prop::collection::vec((0u32..0x8000_0000, any::<bool>()), 0..6).prop_map(|segs| {
        segs.into_iter()
            .map(|(n, hardened)| DerivationIndex::with(n, hardened).unwrap())
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn derivation_is_deterministic(seed in arb_seed(), path in arb_path()) {
        let a = Xpriv::new_master(false, &seed).unwrap().derive_priv(&path).unwrap();
        let b = Xpriv::new_master(false, &seed).unwrap().derive_priv(&path).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.depth() as usize, path.len());
    }

    #[test]
    fn public_and_private_derivation_agree(
        seed in arb_seed(),
        indexes in prop::collection::vec(0u32..0x8000_0000, 1..5),
    ) {
        let master = Xpriv::new_master(false, &seed).unwrap();
        let path = indexes
            .into_iter()
            .map(|n| NormalIndex::try_from_child_number(n).unwrap())
            .collect::<Vec<_>>();
        let via_priv = master.derive_priv(&path).unwrap().to_xpub();
        let via_pub = master.to_xpub().derive_pub(&path).unwrap();
        prop_assert_eq!(via_priv, via_pub);
    }

    #[test]
    fn extended_keys_roundtrip(seed in arb_seed(), path in arb_path(), testnet in any::<bool>()) {
        let xpriv = Xpriv::new_master(testnet, &seed).unwrap().derive_priv(&path).unwrap();
        let s = xpriv.to_string();
        prop_assert_eq!(Xpriv::from_str(&s).unwrap(), xpriv);
        let xpub = xpriv.to_xpub();
        prop_assert_eq!(Xpub::from_str(&xpub.to_string()).unwrap(), xpub);
        prop_assert_eq!(Xpriv::decode(xpriv.encode()).unwrap().encode(), xpriv.encode());
    }

    #[test]
    fn path_string_roundtrip(path in arb_path()) {
        prop_assert_eq!(DerivationPath::from_str(&format!("{path:#}")).unwrap(), path.clone());
        prop_assert_eq!(DerivationPath::from_str(&path.to_string()).unwrap(), path);
    }
}

#[test]
fn bip32_vector_2() {
    let seed = Seed::from_hex(
        "fffcf9f6f3f0edeae7e4e1dedbd8d5d2cfccc9c6c3c0bdbab7b4b1aeaba8a5a29f9c999693908d8a8784817e7b7875726f6c696663605d5a5754514e4b484542",
    )
    .unwrap();
    let master = Xpriv::new_master(false, &seed).unwrap();
    assert_eq!(
        master.to_string(),
        "xprv9s21ZrQH143K31xYSDQpPDxsXRTUcvj2iNHm5NUtrGiGG5e2DtALGdso3pGz6ssrdK4PFmM8NSpSBHNqPqm55Qn3LqFtT2emdEXVYsCzC2U"
    );
    let path: DerivationPath = DerivationPath::from_str("m/0").unwrap();
    assert_eq!(
        master.derive_priv(&path).unwrap().to_xpub().to_string(),
        "xpub69H7F5d8KSRgmmdJg2KhpAK8SR3DjMwAdkxj3ZuxV27CprR9LgpeyGmXUbC6wb7ERfvrnKZjXoUmmDznezpbZb7ap6r1D3tgFxHmwMkQTPH"
    );
}

#[cfg(feature = "serde")]
#[test]
fn xpub_json() {
    let seed = Seed::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
    let xpub = Xpriv::new_master(false, &seed).unwrap().to_xpub();
    let json = serde_json::to_string(&xpub).unwrap();
    assert_eq!(json, format!("\"{xpub}\""));
    assert_eq!(serde_json::from_str::<Xpub>(&json).unwrap(), xpub);

    let fp = xpub.fingerprint();
    let json = serde_json::to_string(&fp).unwrap();
    assert_eq!(serde_json::from_str::<derive::XpubFp>(&json).unwrap(), fp);
}
