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

//! Wallet seeds and their derivation from mnemonic phrases.

use std::fmt::{self, Debug, Formatter};

use bip39::Mnemonic;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha512;
use tracing::debug;

/// Minimal seed length accepted for master key generation (128 bits).
pub const SEED_MIN_LEN: usize = 16;
/// Maximal seed length accepted for master key generation (512 bits).
pub const SEED_MAX_LEN: usize = 64;

/// Number of PBKDF2 rounds used to stretch mnemonic into a seed.
pub const MNEMONIC_PBKDF2_ROUNDS: u32 = 2048;
const MNEMONIC_SALT_PREFIX: &str = "mnemonic";
/// Number of words in a freshly generated mnemonic (128 bits of entropy).
pub const MNEMONIC_DEFAULT_WORDS: usize = 12;

#[derive(Clone, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum SeedError {
    /// seed length must be within 16..=64 bytes, while {0} bytes were provided.
    InvalidLength(usize),

    /// seed is not a valid hexadecimal string - {0}
    #[from]
    Hex(hex::FromHexError),

    /// mnemonic must have 12, 15, 18, 21 or 24 words, while {0} were requested.
    WordCount(usize),

    /// unable to encode entropy as mnemonic - {0}
    #[from]
    Mnemonic(bip39::Error),
}

/// Entropy from which the master extended key is generated.
#[derive(Clone, Eq, PartialEq)]
pub struct Seed(Vec<u8>);

impl Debug for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({} bytes)", self.0.len())
    }
}

impl Seed {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Self, SeedError> {
        let data = data.into();
        if !(SEED_MIN_LEN..=SEED_MAX_LEN).contains(&data.len()) {
            return Err(SeedError::InvalidLength(data.len()));
        }
        Ok(Seed(data))
    }

    pub fn from_hex(s: &str) -> Result<Self, SeedError> { Self::from_bytes(hex::decode(s)?) }

    /// Stretches mnemonic phrase into a 64-byte seed using BIP39 key
    /// stretching: PBKDF2-HMAC-SHA512 over the phrase with `"mnemonic"`
    /// followed by the passphrase as salt.
    ///
    /// The phrase is used verbatim: words are not checked against any
    /// wordlist and no Unicode normalization is applied.
    pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Self {
        let salt = format!("{MNEMONIC_SALT_PREFIX}{passphrase}");
        let mut seed = vec![0u8; SEED_MAX_LEN];
        pbkdf2_hmac::<Sha512>(
            phrase.as_bytes(),
            salt.as_bytes(),
            MNEMONIC_PBKDF2_ROUNDS,
            &mut seed,
        );
        debug!(words = phrase.split_whitespace().count(), "seed generated from mnemonic");
        Seed(seed)
    }

    /// Generates a random English BIP39 mnemonic with the given number of
    /// words, drawing entropy from the thread-local CSPRNG.
    pub fn generate_mnemonic(word_count: usize) -> Result<String, SeedError> {
        if !(12..=24).contains(&word_count) || word_count % 3 != 0 {
            return Err(SeedError::WordCount(word_count));
        }
        let mut entropy = vec![0u8; word_count * 4 / 3];
        rand::thread_rng().fill_bytes(&mut entropy);
        let mnemonic = Mnemonic::from_entropy(&entropy)?;
        debug!(words = word_count, "mnemonic generated");
        Ok(mnemonic.to_string())
    }

    pub fn as_bytes(&self) -> &[u8] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn to_hex(&self) -> String { hex::encode(&self.0) }
}
