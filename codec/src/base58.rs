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

//! Base58 encodings with the two checksum flavours used across the chain:
//! double SHA256 (WIF, extended keys) and RIPEMD160 with an optional key type
//! suffix (public keys and signatures).

use bitcoin_hashes::{ripemd160, sha256d, Hash, HashEngine};

/// Number of checksum bytes appended to the payload before Base58 encoding.
pub const CHECKSUM_LEN: usize = 4;

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum Base58Error {
    /// invalid Base58 character in string '{0}'.
    InvalidCharacter(String),

    /// Base58 data are too short ({0} bytes) to contain a checksum.
    TooShort(usize),

    /// Base58 checksum mismatch: expected {expected:#010x}, found {found:#010x}.
    ChecksumMismatch { expected: u32, found: u32 },
}

/// Checksum algorithm protecting Base58 payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Checksum {
    /// First four bytes of double SHA256 of the payload.
    Sha256d,

    /// First four bytes of RIPEMD160 of the payload followed by the given
    /// key type suffix (empty for legacy `EOS` public keys).
    Ripemd160(&'static [u8]),
}

impl Checksum {
    fn compute(self, data: &[u8]) -> [u8; CHECKSUM_LEN] {
        let hash = match self {
            Checksum::Sha256d => sha256d::Hash::hash(data).to_byte_array().to_vec(),
            Checksum::Ripemd160(suffix) => {
                let mut engine = ripemd160::Hash::engine();
                engine.input(data);
                engine.input(suffix);
                ripemd160::Hash::from_engine(engine).to_byte_array().to_vec()
            }
        };
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&hash[..CHECKSUM_LEN]);
        checksum
    }

    /// Appends checksum to the `data` and encodes the result with Base58.
    pub fn encode(self, data: &[u8]) -> String {
        if self == Checksum::Sha256d {
            return base58ck::encode_check(data);
        }
        let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
        payload.extend_from_slice(data);
        payload.extend_from_slice(&self.compute(data));
        encode(&payload)
    }

    /// Decodes Base58 string and verifies its trailing checksum, returning the
    /// payload without the checksum.
    pub fn decode(self, s: &str) -> Result<Vec<u8>, Base58Error> {
        match self {
            // failures are rechecked locally to report the offending checksum
            Checksum::Sha256d => base58ck::decode_check(s).or_else(|_| self.verify(decode(s)?)),
            Checksum::Ripemd160(_) => self.verify(decode(s)?),
        }
    }

    fn verify(self, mut data: Vec<u8>) -> Result<Vec<u8>, Base58Error> {
        if data.len() < CHECKSUM_LEN {
            return Err(Base58Error::TooShort(data.len()));
        }
        let split = data.len() - CHECKSUM_LEN;
        let mut found = [0u8; CHECKSUM_LEN];
        found.copy_from_slice(&data[split..]);
        let expected = self.compute(&data[..split]);
        if expected != found {
            return Err(Base58Error::ChecksumMismatch {
                expected: u32::from_be_bytes(expected),
                found: u32::from_be_bytes(found),
            });
        }
        data.truncate(split);
        Ok(data)
    }
}

/// Encodes raw bytes with the Bitcoin Base58 alphabet.
pub fn encode(data: &[u8]) -> String { base58ck::encode(data) }

/// Decodes raw Base58 string without checksum verification.
pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    base58ck::decode(s).map_err(|_| Base58Error::InvalidCharacter(s.to_owned()))
}

/// Base58Check encoding (double SHA256 checksum).
pub fn encode_check(data: &[u8]) -> String { Checksum::Sha256d.encode(data) }

/// Base58Check decoding (double SHA256 checksum).
pub fn decode_check(s: &str) -> Result<Vec<u8>, Base58Error> { Checksum::Sha256d.decode(s) }

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn check_roundtrip() {
        let data = b"\x80hello world";
        let s = encode_check(data);
        assert_eq!(decode_check(&s).unwrap(), data);
    }

    #[test]
    fn check_matches_manual_checksum() {
        let data = [0x80u8, 1, 2, 3];
        let s = encode_check(&data);
        let mut payload = data.to_vec();
        payload.extend_from_slice(&Checksum::Sha256d.compute(&data));
        assert_eq!(s, encode(&payload));
        assert_eq!(Checksum::Sha256d.verify(payload).unwrap(), data);
    }

    #[test]
    fn ripemd_suffix_matters() {
        let data = [0x02u8; 33];
        let legacy = Checksum::Ripemd160(b"").encode(&data);
        let k1 = Checksum::Ripemd160(b"K1").encode(&data);
        assert_ne!(legacy, k1);
        assert_eq!(Checksum::Ripemd160(b"K1").decode(&k1).unwrap(), data);
        assert!(matches!(
            Checksum::Ripemd160(b"").decode(&k1),
            Err(Base58Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn corrupted_checksum() {
        let mut s = encode_check(&[1, 2, 3, 4, 5]);
        let last = s.pop().unwrap();
        s.push(if last == '1' { '2' } else { '1' });
        assert!(matches!(decode_check(&s), Err(Base58Error::ChecksumMismatch { .. })));
    }

    #[test]
    fn short_and_invalid() {
        assert_eq!(decode_check("1"), Err(Base58Error::TooShort(1)));
        assert_eq!(decode_check("0OIl"), Err(Base58Error::InvalidCharacter("0OIl".to_owned())));
    }
}
