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

use std::fmt::{self, Debug, Formatter};

use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use tracing::trace;

use crate::Signature;

pub const PRIVATE_KEY_LEN: usize = 32;
pub const PUBLIC_KEY_LEN: usize = 33;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum KeyError {
    /// private key must be exactly 32 bytes long, while {0} bytes were provided.
    InvalidPrivateKeyLength(usize),

    /// private key value is zero or exceeds secp256k1 group order.
    InvalidPrivateKeyValue,

    /// public key must be a compressed 33-byte point, while {0} bytes were provided.
    InvalidPublicKeyLength(usize),

    /// public key data do not represent a point on secp256k1 curve.
    InvalidPublicKeyValue,
}

/// Secret key guaranteed to lie in range `1..n` of secp256k1 group order.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PrivKey(SecretKey);

impl From<SecretKey> for PrivKey {
    fn from(sk: SecretKey) -> Self { PrivKey(sk) }
}

impl From<PrivKey> for SecretKey {
    fn from(sk: PrivKey) -> Self { sk.0 }
}

impl Debug for PrivKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { f.write_str("PrivKey(..)") }
}

impl PrivKey {
    pub fn from_slice(data: &[u8]) -> Result<Self, KeyError> {
        if data.len() != PRIVATE_KEY_LEN {
            return Err(KeyError::InvalidPrivateKeyLength(data.len()));
        }
        SecretKey::from_slice(data).map(PrivKey).map_err(|_| KeyError::InvalidPrivateKeyValue)
    }

    pub fn from_byte_array(data: [u8; PRIVATE_KEY_LEN]) -> Result<Self, KeyError> {
        Self::from_slice(&data)
    }

    pub fn to_byte_array(&self) -> [u8; PRIVATE_KEY_LEN] { self.0.secret_bytes() }

    pub fn as_secret_key(&self) -> &SecretKey { &self.0 }

    pub fn public_key(&self) -> PubKey { PubKey(self.0.public_key(SECP256K1)) }

    /// Signs 32-byte digest with a recoverable signature acceptable by the
    /// chain.
    ///
    /// The chain accepts only canonical signatures, where neither `r` nor `s`
    /// has the high bit set or carries a redundant zero byte. RFC6979 nonces
    /// are re-generated with an increasing counter mixed in as extra nonce data
    /// until a canonical signature is produced, so the result stays
    /// deterministic for a given key and digest.
    pub fn sign_canonical(&self, digest: [u8; 32]) -> Signature {
        let msg = Message::from_digest(digest);
        let mut attempt = 0u32;
        loop {
            let sig = if attempt == 0 {
                SECP256K1.sign_ecdsa_recoverable(&msg, &self.0)
            } else {
                let mut noncedata = [0u8; 32];
                noncedata[..4].copy_from_slice(&attempt.to_le_bytes());
                SECP256K1.sign_ecdsa_recoverable_with_noncedata(&msg, &self.0, &noncedata)
            };
            let sig = Signature::from(sig);
            if sig.is_canonical() {
                trace!(attempt, "canonical signature produced");
                return sig;
            }
            attempt = attempt.wrapping_add(1);
        }
    }
}

/// Compressed secp256k1 public key.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct PubKey(PublicKey);

impl From<PublicKey> for PubKey {
    fn from(pk: PublicKey) -> Self { PubKey(pk) }
}

impl From<PubKey> for PublicKey {
    fn from(pk: PubKey) -> Self { pk.0 }
}

impl PubKey {
    pub fn from_slice(data: &[u8]) -> Result<Self, KeyError> {
        if data.len() != PUBLIC_KEY_LEN {
            return Err(KeyError::InvalidPublicKeyLength(data.len()));
        }
        PublicKey::from_slice(data).map(PubKey).map_err(|_| KeyError::InvalidPublicKeyValue)
    }

    pub fn serialize(&self) -> [u8; PUBLIC_KEY_LEN] { self.0.serialize() }

    pub fn as_public_key(&self) -> &PublicKey { &self.0 }
}

#[cfg(test)]
mod test {
    use super::*;

    const ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    #[test]
    fn private_key_range() {
        assert_eq!(PrivKey::from_slice(&[1u8; 31]), Err(KeyError::InvalidPrivateKeyLength(31)));
        assert_eq!(PrivKey::from_slice(&[1u8; 33]), Err(KeyError::InvalidPrivateKeyLength(33)));
        assert_eq!(PrivKey::from_byte_array([0u8; 32]), Err(KeyError::InvalidPrivateKeyValue));
        assert_eq!(PrivKey::from_byte_array(ORDER), Err(KeyError::InvalidPrivateKeyValue));
        let mut max = ORDER;
        max[31] -= 1;
        assert!(PrivKey::from_byte_array(max).is_ok());
        assert!(PrivKey::from_byte_array([1u8; 32]).is_ok());
    }

    #[test]
    fn public_key_is_compressed() {
        let sk = PrivKey::from_byte_array([7u8; 32]).unwrap();
        let pk = sk.public_key().serialize();
        assert!(pk[0] == 0x02 || pk[0] == 0x03);
        assert_eq!(PubKey::from_slice(&pk).unwrap(), sk.public_key());
        assert_eq!(PubKey::from_slice(&pk[..32]), Err(KeyError::InvalidPublicKeyLength(32)));
        assert_eq!(PubKey::from_slice(&[0x05; 33]), Err(KeyError::InvalidPublicKeyValue));
    }

    #[test]
    fn canonical_signatures_are_deterministic() {
        let sk = PrivKey::from_byte_array([0x11; 32]).unwrap();
        for byte in 0u8..16 {
            let digest = [byte; 32];
            let sig = sk.sign_canonical(digest);
            assert!(sig.is_canonical());
            assert_eq!(sig, sk.sign_canonical(digest));
            assert_eq!(sig.recover(digest).unwrap(), sk.public_key());
        }
    }

    #[test]
    fn debug_hides_secret() {
        let sk = PrivKey::from_byte_array([0x42; 32]).unwrap();
        assert_eq!(format!("{sk:?}"), "PrivKey(..)");
    }
}
