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

//! BIP32 hierarchical deterministic derivation of EOS keys: child indexes,
//! derivation paths, extended keys and wallet seeds.

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

mod index;
mod path;
mod seed;
mod xkey;

pub use codec::{PrivKey, PubKey};
pub use index::{
    DerivationIndex, HardenedIndex, Idx, IndexError, IndexParseError, NormalIndex,
    HARDENED_INDEX_BOUNDARY,
};
pub use path::{DerivationParseError, DerivationPath};
pub use seed::{
    Seed, SeedError, MNEMONIC_DEFAULT_WORDS, MNEMONIC_PBKDF2_ROUNDS, SEED_MAX_LEN, SEED_MIN_LEN,
};
pub use xkey::{
    ChainCode, DeriveError, XkeyAny, XkeyDecodeError, XkeyMeta, XkeyParseError, Xpriv, Xpub,
    XpubFp, XpubId, XKEY_LEN, XPRIV_MAINNET_MAGIC, XPRIV_TESTNET_MAGIC, XPUB_MAINNET_MAGIC,
    XPUB_TESTNET_MAGIC,
};

/// SLIP-44 coin type registered for EOS.
pub const EOS_COIN_TYPE: u16 = 194;
