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

//! Wallet import format for private keys.

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::base58::{self, Base58Error};
use crate::{KeyError, PrivKey, PRIVATE_KEY_LEN};

/// Version byte prefixing the private key in WIF.
pub const WIF_VERSION: u8 = 0x80;

/// Errors parsing WIF strings.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum WifError {
    /// invalid WIF encoding - {0}
    #[from]
    Base58(Base58Error),

    /// WIF payload must be 33 bytes long, while {0} bytes were decoded.
    WrongLength(usize),

    /// WIF payload has unsupported version byte {0:#04x}.
    UnknownVersion(u8),

    /// WIF contains invalid private key - {0}
    #[from]
    InvalidKey(KeyError),
}

/// Private key in wallet import format: Base58Check(0x80 ‖ key). The chain
/// convention omits the compressed-key suffix byte.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Wif(PrivKey);

impl From<PrivKey> for Wif {
    fn from(sk: PrivKey) -> Self { Wif(sk) }
}

impl From<Wif> for PrivKey {
    fn from(wif: Wif) -> Self { wif.0 }
}

impl Debug for Wif {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str("Wif(..)") }
}

impl Wif {
    pub fn new(sk: PrivKey) -> Self { Wif(sk) }

    pub fn private_key(&self) -> PrivKey { self.0 }
}

impl Display for Wif {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut data = [0u8; PRIVATE_KEY_LEN + 1];
        data[0] = WIF_VERSION;
        data[1..].copy_from_slice(&self.0.to_byte_array());
        f.write_str(&base58::encode_check(&data))
    }
}

impl FromStr for Wif {
    type Err = WifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = base58::decode_check(s)?;
        if data.len() != PRIVATE_KEY_LEN + 1 {
            return Err(WifError::WrongLength(data.len()));
        }
        if data[0] != WIF_VERSION {
            return Err(WifError::UnknownVersion(data[0]));
        }
        Ok(Wif(PrivKey::from_slice(&data[1..])?))
    }
}
