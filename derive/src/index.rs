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

use std::num::ParseIntError;
use std::str::FromStr;

/// Constant determining BIP32 boundary for u32 values after which index
/// is treated as hardened
pub const HARDENED_INDEX_BOUNDARY: u32 = 1 << 31;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("provided {what} {invalid} is invalid: it lies outside allowed range {start}..={end}")]
pub struct IndexError {
    pub what: &'static str,
    pub invalid: u32,
    pub start: u32,
    pub end: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum IndexParseError {
    #[from]
    #[display(inner)]
    Invalid(IndexError),

    #[from]
    /// invalid index string representation - {0}
    Parse(ParseIntError),

    /// expected hardened index value instead of the provided unhardened {0}
    HardenedRequired(String),
}

/// Trait defining basic index functionality.
pub trait Idx: Sized + Eq + Ord + Copy {
    /// Detects whether path segment uses hardened index
    fn is_hardened(&self) -> bool;

    /// Returns child number corresponding to this index.
    ///
    /// Child number is always a value in range of `0..`[`HARDENED_INDEX_BOUNDARY`]
    fn child_number(&self) -> u32;

    /// Returns value used during derivation, which for normal indexes must lie
    /// in range `0..`[`HARDENED_INDEX_BOUNDARY`] and for hardened in range
    /// of [`HARDENED_INDEX_BOUNDARY`]`..=u32::MAX`
    fn index(&self) -> u32;

    fn to_be_bytes(&self) -> [u8; 4] { self.index().to_be_bytes() }
}

fn check_child_number(what: &'static str, child_number: u32) -> Result<u32, IndexError> {
    if child_number >= HARDENED_INDEX_BOUNDARY {
        return Err(IndexError {
            what,
            invalid: child_number,
            start: 0,
            end: HARDENED_INDEX_BOUNDARY - 1,
        });
    }
    Ok(child_number)
}

/// Index for unhardened children derivation; ensures that the inner value
/// is always < 2^31
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Default, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display(inner)]
pub struct NormalIndex(u32);

impl NormalIndex {
    pub const ZERO: Self = NormalIndex(0);

    pub const fn normal(child_number: u16) -> Self { NormalIndex(child_number as u32) }

    pub fn try_from_child_number(child_number: u32) -> Result<Self, IndexError> {
        check_child_number("child number", child_number).map(NormalIndex)
    }
}

impl Idx for NormalIndex {
    #[inline]
    fn is_hardened(&self) -> bool { false }

    #[inline]
    fn child_number(&self) -> u32 { self.0 }

    #[inline]
    fn index(&self) -> u32 { self.0 }
}

impl TryFrom<DerivationIndex> for NormalIndex {
    type Error = IndexError;

    fn try_from(idx: DerivationIndex) -> Result<Self, Self::Error> {
        match idx {
            DerivationIndex::Normal(idx) => Ok(idx),
            DerivationIndex::Hardened(idx) => Err(IndexError {
                what: "index",
                invalid: idx.index(),
                start: 0,
                end: HARDENED_INDEX_BOUNDARY - 1,
            }),
        }
    }
}

impl FromStr for NormalIndex {
    type Err = IndexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NormalIndex::try_from_child_number(u32::from_str(s)?)?)
    }
}

/// Index for hardened children derivation; ensures that the index always >=
/// 2^31.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, Display)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[display("{0}'")]
pub struct HardenedIndex(
    /// The inner index value; always reduced by [`HARDENED_INDEX_BOUNDARY`]
    u32,
);

impl HardenedIndex {
    pub const ZERO: Self = HardenedIndex(0);

    pub const fn hardened(child_number: u16) -> Self { HardenedIndex(child_number as u32) }

    pub fn try_from_child_number(child_number: u32) -> Result<Self, IndexError> {
        check_child_number("hardened child number", child_number).map(HardenedIndex)
    }
}

impl Idx for HardenedIndex {
    #[inline]
    fn is_hardened(&self) -> bool { true }

    /// Returns hardened index number not offset by [`HARDENED_INDEX_BOUNDARY`]
    /// (i.e. zero-based).
    #[inline]
    fn child_number(&self) -> u32 { self.0 }

    /// Returns hardened index number offset by [`HARDENED_INDEX_BOUNDARY`].
    #[inline]
    fn index(&self) -> u32 { self.0 + HARDENED_INDEX_BOUNDARY }
}

impl FromStr for HardenedIndex {
    type Err = IndexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s
            .strip_suffix(['h', 'H', '\''])
            .ok_or_else(|| IndexParseError::HardenedRequired(s.to_owned()))?;
        Ok(HardenedIndex::try_from_child_number(u32::from_str(s)?)?)
    }
}

/// Single segment of a derivation path, which may be either hardened or
/// normal.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display, From)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
#[display(inner)]
pub enum DerivationIndex {
    #[from]
    Normal(NormalIndex),
    #[from]
    Hardened(HardenedIndex),
}

impl From<u32> for DerivationIndex {
    fn from(value: u32) -> Self { Self::from_index(value) }
}

impl DerivationIndex {
    pub const fn normal(child_number: u16) -> Self {
        Self::Normal(NormalIndex::normal(child_number))
    }

    pub const fn hardened(child_number: u16) -> Self {
        Self::Hardened(HardenedIndex::hardened(child_number))
    }

    /// Constructs index from its wire value, where values at or above
    /// [`HARDENED_INDEX_BOUNDARY`] denote hardened derivation.
    pub const fn from_index(value: u32) -> Self {
        if value < HARDENED_INDEX_BOUNDARY {
            DerivationIndex::Normal(NormalIndex(value))
        } else {
            DerivationIndex::Hardened(HardenedIndex(value - HARDENED_INDEX_BOUNDARY))
        }
    }

    /// Constructs index from a child number and a hardened flag.
    pub fn with(child_number: u32, hardened: bool) -> Result<Self, IndexError> {
        Ok(match hardened {
            false => NormalIndex::try_from_child_number(child_number)?.into(),
            true => HardenedIndex::try_from_child_number(child_number)?.into(),
        })
    }
}

impl Idx for DerivationIndex {
    fn is_hardened(&self) -> bool {
        match self {
            DerivationIndex::Normal(_) => false,
            DerivationIndex::Hardened(_) => true,
        }
    }

    fn child_number(&self) -> u32 {
        match self {
            DerivationIndex::Normal(idx) => idx.child_number(),
            DerivationIndex::Hardened(idx) => idx.child_number(),
        }
    }

    fn index(&self) -> u32 {
        match self {
            DerivationIndex::Normal(idx) => idx.index(),
            DerivationIndex::Hardened(idx) => idx.index(),
        }
    }
}

impl FromStr for DerivationIndex {
    type Err = IndexParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix(['h', 'H', '\'']) {
            Some(_) => HardenedIndex::from_str(s).map(Self::Hardened),
            None => NormalIndex::from_str(s).map(Self::Normal),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(DerivationIndex::from(0), DerivationIndex::normal(0));
        assert_eq!(DerivationIndex::from(0x7FFF_FFFF).index(), 0x7FFF_FFFF);
        assert_eq!(DerivationIndex::from(0x8000_0000), DerivationIndex::hardened(0));
        assert_eq!(DerivationIndex::hardened(44).index(), 0x8000_002C);
        assert_eq!(DerivationIndex::from(u32::MAX).child_number(), 0x7FFF_FFFF);
        assert_eq!(DerivationIndex::hardened(1).to_be_bytes(), [0x80, 0, 0, 1]);
    }

    #[test]
    fn parse_forms() {
        assert_eq!("0".parse(), Ok(DerivationIndex::normal(0)));
        assert_eq!("44'".parse(), Ok(DerivationIndex::hardened(44)));
        assert_eq!("44h".parse(), Ok(DerivationIndex::hardened(44)));
        assert_eq!("44H".parse(), Ok(DerivationIndex::hardened(44)));
        assert!(DerivationIndex::from_str("2147483648").is_err());
        assert!(DerivationIndex::from_str("2147483648'").is_err());
        assert!(DerivationIndex::from_str("-1").is_err());
        assert!(DerivationIndex::from_str("x").is_err());
        assert_eq!(
            HardenedIndex::from_str("7"),
            Err(IndexParseError::HardenedRequired("7".to_owned()))
        );
    }

    #[test]
    fn display() {
        assert_eq!(DerivationIndex::hardened(194).to_string(), "194'");
        assert_eq!(DerivationIndex::normal(5).to_string(), "5");
    }

    #[test]
    fn with_flag() {
        assert_eq!(DerivationIndex::with(3, true), Ok(DerivationIndex::hardened(3)));
        assert_eq!(DerivationIndex::with(3, false), Ok(DerivationIndex::normal(3)));
        assert!(DerivationIndex::with(HARDENED_INDEX_BOUNDARY, false).is_err());
        assert!(NormalIndex::try_from(DerivationIndex::hardened(0)).is_err());
    }
}
