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

//! Chain parameters the assembler depends on.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use codec::Symbol;

use crate::Name;

/// Chain id of the eosjs local test network.
pub const DEFAULT_CHAIN_ID: [u8; 32] = [
    0xcf, 0x05, 0x7b, 0xbf, 0xb7, 0x26, 0x40, 0x47, 0x1f, 0xd9, 0x10, 0xbc, 0xb6, 0x76, 0x39, 0xc2,
    0x2d, 0xf9, 0xf9, 0x24, 0x70, 0x93, 0x6c, 0xdd, 0xc1, 0xad, 0xe0, 0xe2, 0xf2, 0xe7, 0xdc, 0x4f,
];

/// Contract account of the core token.
pub const TOKEN_CONTRACT: Name = Name::from_static("eosio.token");
/// System contract account.
pub const SYSTEM_CONTRACT: Name = Name::from_static("eosio");

#[derive(Clone, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum ChainIdError {
    /// chain id is not a valid hexadecimal string - {0}
    #[from]
    Hex(hex::FromHexError),

    /// chain id must be 32 bytes long, while {0} bytes were provided.
    InvalidLength(usize),
}

/// Identifier of the chain, mixed into every signature digest.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ChainId([u8; 32]);

impl Default for ChainId {
    fn default() -> Self { ChainId(DEFAULT_CHAIN_ID) }
}

impl From<[u8; 32]> for ChainId {
    fn from(id: [u8; 32]) -> Self { ChainId(id) }
}

impl ChainId {
    pub const fn from_byte_array(id: [u8; 32]) -> Self { ChainId(id) }

    pub const fn to_byte_array(&self) -> [u8; 32] { self.0 }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str(&hex::encode(self.0)) }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = hex::decode(s)?;
        <[u8; 32]>::try_from(data.as_slice())
            .map(ChainId)
            .map_err(|_| ChainIdError::InvalidLength(data.len()))
    }
}

/// Network parameters: the chain to sign for, its core token and the
/// contracts receiving the assembled actions.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase", default)
)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    pub symbol: Symbol,
    pub token_contract: Name,
    pub system_contract: Name,
}

impl Default for ChainConfig {
    fn default() -> Self {
        ChainConfig {
            chain_id: ChainId::default(),
            symbol: Symbol::default(),
            token_contract: TOKEN_CONTRACT,
            system_contract: SYSTEM_CONTRACT,
        }
    }
}

impl ChainConfig {
    pub fn with_chain_id(chain_id: ChainId) -> Self {
        ChainConfig {
            chain_id,
            ..Default::default()
        }
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for ChainId {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for ChainId {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            let s = String::deserialize(deserializer)?;
            ChainId::from_str(&s).map_err(|err| de::Error::custom(format!("invalid chain id; {err}")))
        }
    }
}
