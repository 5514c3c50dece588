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

//! Public key textual representation used as account key "address".

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::base58::{Base58Error, Checksum};
use crate::{KeyError, PubKey};

/// Legacy public key prefix used by wallets and the chain RPC.
pub const ADDRESS_PREFIX: &str = "EOS";
/// Modern public key prefix carrying explicit key type.
pub const K1_ADDRESS_PREFIX: &str = "PUB_K1_";

const K1_SUFFIX: &[u8] = b"K1";

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum AddressParseError {
    /// public key string '{0}' has unknown prefix.
    UnknownPrefix(String),

    /// invalid public key encoding - {0}
    #[from]
    Base58(Base58Error),

    /// invalid public key data - {0}
    #[from]
    InvalidKey(KeyError),
}

/// Public key rendered as `EOS` + Base58(key ‖ RIPEMD160(key)[..4]).
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Address(PubKey);

impl From<PubKey> for Address {
    fn from(pk: PubKey) -> Self { Address(pk) }
}

impl From<Address> for PubKey {
    fn from(addr: Address) -> Self { addr.0 }
}

impl Address {
    pub fn new(pk: PubKey) -> Self { Address(pk) }

    pub fn public_key(&self) -> PubKey { self.0 }

    /// Renders the key using `PUB_K1_` format with a key type bound checksum.
    pub fn to_k1_string(&self) -> String {
        format!("{K1_ADDRESS_PREFIX}{}", Checksum::Ripemd160(K1_SUFFIX).encode(&self.0.serialize()))
    }
}

impl PubKey {
    pub fn to_address(&self) -> Address { Address(*self) }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(ADDRESS_PREFIX)?;
        f.write_str(&Checksum::Ripemd160(b"").encode(&self.0.serialize()))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = if let Some(data) = s.strip_prefix(K1_ADDRESS_PREFIX) {
            Checksum::Ripemd160(K1_SUFFIX).decode(data)?
        } else if let Some(data) = s.strip_prefix(ADDRESS_PREFIX) {
            Checksum::Ripemd160(b"").decode(data)?
        } else {
            return Err(AddressParseError::UnknownPrefix(s.to_owned()));
        };
        Ok(Address(PubKey::from_slice(&data)?))
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s)
                .map_err(|err| de::Error::custom(format!("invalid public key string; {err}")))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ADDR: &str = "EOS8Q6s4WGcswUdot8UntNA2G4PVnUha5MyE1CDwZSX76FWc1xQEs";

    #[test]
    fn legacy_roundtrip() {
        let addr = Address::from_str(ADDR).unwrap();
        assert_eq!(addr.to_string(), ADDR);
    }

    #[test]
    fn k1_roundtrip() {
        let addr = Address::from_str(ADDR).unwrap();
        let k1 = addr.to_k1_string();
        assert!(k1.starts_with("PUB_K1_"));
        assert_eq!(Address::from_str(&k1).unwrap(), addr);
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(
            Address::from_str("BTC8Q6s4WGcswUdot8UntNA2G4PVnUha5MyE1CDwZSX76FWc1xQEs"),
            Err(AddressParseError::UnknownPrefix(
                "BTC8Q6s4WGcswUdot8UntNA2G4PVnUha5MyE1CDwZSX76FWc1xQEs".to_owned()
            ))
        );
        assert!(matches!(
            Address::from_str("EOS8Q6s4WGcswUdot8UntNA2G4PVnUha5MyE1CDwZSX76FWc1xQEt"),
            Err(AddressParseError::Base58(Base58Error::ChecksumMismatch { .. }))
        ));
    }
}
