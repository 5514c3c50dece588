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

//! Account, action and permission names packed into 64-bit integers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Maximal number of characters in a name.
pub const NAME_MAX_LEN: usize = 13;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum NameError {
    /// name '{0}' is longer than 13 characters.
    TooLong(String),

    /// name '{1}' contains invalid character '{0}'; only `.`, `1`-`5` and
    /// `a`-`z` are allowed.
    InvalidChar(char, String),

    /// name '{0}' is not in normalized form: it has trailing dots or its 13th
    /// character is outside of `.`, `1`-`5`, `a`-`j`.
    NotNormalized(String),
}

const fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'.' => Some(0),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        _ => None,
    }
}

/// Name packed with 5 bits per character into `u64`, the 13th character
/// taking the lowest 4 bits.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default)]
pub struct Name(u64);

impl Name {
    /// Empty name, used where the chain expects an absent account.
    pub const EMPTY: Name = Name(0);

    pub const fn from_u64(value: u64) -> Self { Name(value) }

    pub const fn to_u64(&self) -> u64 { self.0 }

    pub const fn is_empty(&self) -> bool { self.0 == 0 }

    /// Packs a name known at compile time.
    ///
    /// # Panics
    ///
    /// On invalid characters or excessive length, which aborts compilation
    /// when used in a const context.
    pub const fn from_static(s: &'static str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= NAME_MAX_LEN, "name is too long");
        let mut value = 0u64;
        let mut i = 0;
        while i < bytes.len() {
            let c = match char_to_symbol(bytes[i]) {
                Some(c) => c,
                None => panic!("invalid character in name"),
            };
            if i < 12 {
                value |= (c & 0x1f) << (64 - 5 * (i + 1));
            } else {
                assert!(c <= 0x0f, "invalid 13th character in name");
                value |= c & 0x0f;
            }
            i += 1;
        }
        Name(value)
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut s = [b'.'; NAME_MAX_LEN];
        let mut tmp = self.0;
        for i in 0..NAME_MAX_LEN {
            let mask = if i == 0 { 0x0f } else { 0x1f };
            s[12 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= if i == 0 { 4 } else { 5 };
        }
        let len = s.iter().rposition(|c| *c != b'.').map(|pos| pos + 1).unwrap_or(0);
        // CHARMAP consists of ASCII characters only
        f.write_str(std::str::from_utf8(&s[..len]).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > NAME_MAX_LEN {
            return Err(NameError::TooLong(s.to_owned()));
        }
        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            let sym = char_to_symbol(c)
                .ok_or_else(|| NameError::InvalidChar(c as char, s.to_owned()))?;
            if i < 12 {
                value |= sym << (64 - 5 * (i + 1));
            } else {
                value |= sym & 0x0f;
            }
        }
        let name = Name(value);
        if name.to_string() != s {
            return Err(NameError::NotNormalized(s.to_owned()));
        }
        Ok(name)
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> Self { name.0 }
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Name {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Name {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            let s = String::deserialize(deserializer)?;
            Name::from_str(&s).map_err(|err| de::Error::custom(format!("invalid name; {err}")))
        }
    }
}
