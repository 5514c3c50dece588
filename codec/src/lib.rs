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

//! Chain-native textual and binary encodings of EOS keys, signatures and
//! assets, independent from the derivation tree.

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

pub mod base58;
mod key;
mod signature;
mod address;
mod wif;
mod amount;

pub use address::{Address, AddressParseError, ADDRESS_PREFIX, K1_ADDRESS_PREFIX};
pub use amount::{
    format_amount, Asset, Symbol, SymbolError, DEFAULT_PRECISION, DEFAULT_SYMBOL, MAX_PRECISION,
    MAX_SYMBOL_LEN,
};
pub use key::{KeyError, PrivKey, PubKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
pub use secp256k1;
pub use signature::{Signature, SignatureError, SIGNATURE_LEN, SIGNATURE_PREFIX};
pub use wif::{Wif, WifError, WIF_VERSION};
