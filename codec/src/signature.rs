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

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};

use crate::base58::{Base58Error, Checksum};
use crate::PubKey;

pub const SIGNATURE_PREFIX: &str = "SIG_K1_";
pub const SIGNATURE_LEN: usize = 65;

const K1_SUFFIX: &[u8] = b"K1";
// 27 for the recoverable signature header plus 4 marking compressed key.
const HEADER_OFFSET: u8 = 27 + 4;

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum SignatureError {
    /// signature string must start with `SIG_K1_` prefix.
    UnknownPrefix,

    /// invalid signature encoding - {0}
    #[from]
    Base58(Base58Error),

    /// signature must be 65 bytes long, while {0} bytes were provided.
    InvalidLength(usize),

    /// signature header byte {0:#04x} does not encode a recovery id.
    InvalidHeader(u8),

    /// signature data are not valid for secp256k1 curve.
    InvalidSignature,
}

/// Recoverable secp256k1 signature in the chain `K1` format.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    recovery_id: u8,
    compact: [u8; 64],
}

impl From<RecoverableSignature> for Signature {
    fn from(sig: RecoverableSignature) -> Self {
        let (recid, compact) = sig.serialize_compact();
        Signature {
            recovery_id: i32::from(recid) as u8,
            compact,
        }
    }
}

impl Signature {
    pub fn from_bytes(data: &[u8]) -> Result<Self, SignatureError> {
        if data.len() != SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength(data.len()));
        }
        let recovery_id = data[0]
            .checked_sub(HEADER_OFFSET)
            .filter(|id| *id < 4)
            .ok_or(SignatureError::InvalidHeader(data[0]))?;
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&data[1..]);
        Ok(Signature {
            recovery_id,
            compact,
        })
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut data = [0u8; SIGNATURE_LEN];
        data[0] = self.recovery_id + HEADER_OFFSET;
        data[1..].copy_from_slice(&self.compact);
        data
    }

    pub fn recovery_id(&self) -> u8 { self.recovery_id }

    /// Detects whether both `r` and `s` components are in the canonical form
    /// required by the chain: no high bit set and no redundant leading zero.
    pub fn is_canonical(&self) -> bool {
        let canonical = |n: &[u8]| n[0] & 0x80 == 0 && !(n[0] == 0 && n[1] & 0x80 == 0);
        canonical(&self.compact[..32]) && canonical(&self.compact[32..])
    }

    /// Recovers public key which produced this signature over the `digest`.
    pub fn recover(&self, digest: [u8; 32]) -> Result<PubKey, SignatureError> {
        let recid = RecoveryId::try_from(self.recovery_id as i32)
            .map_err(|_| SignatureError::InvalidHeader(self.recovery_id + HEADER_OFFSET))?;
        let sig = RecoverableSignature::from_compact(&self.compact, recid)
            .map_err(|_| SignatureError::InvalidSignature)?;
        SECP256K1
            .recover_ecdsa(&Message::from_digest(digest), &sig)
            .map(PubKey::from)
            .map_err(|_| SignatureError::InvalidSignature)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(SIGNATURE_PREFIX)?;
        f.write_str(&Checksum::Ripemd160(K1_SUFFIX).encode(&self.to_bytes()))
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.strip_prefix(SIGNATURE_PREFIX).ok_or(SignatureError::UnknownPrefix)?;
        let data = Checksum::Ripemd160(K1_SUFFIX).decode(data)?;
        Signature::from_bytes(&data)
    }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Signature {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Signature {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            let s = String::deserialize(deserializer)?;
            Signature::from_str(&s)
                .map_err(|err| de::Error::custom(format!("invalid signature string; {err}")))
        }
    }
}
