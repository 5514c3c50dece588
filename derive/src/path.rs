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

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use crate::{DerivationIndex, IndexParseError};

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum DerivationParseError {
    /// unable to parse derivation path '{0}' - {1}
    InvalidIndex(String, IndexParseError),
    /// invalid derivation path format '{0}'
    InvalidFormat(String),
}

/// Derivation path as a sequence of child indexes, starting from the key it
/// is applied to.
#[derive(Wrapper, WrapperMut, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug, From)]
#[wrapper(Deref)]
#[wrapper_mut(DerefMut)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct DerivationPath<I = DerivationIndex>(Vec<I>);

impl<I: Clone> From<&[I]> for DerivationPath<I> {
    fn from(path: &[I]) -> Self { Self(path.to_vec()) }
}

impl<I> AsRef<[I]> for DerivationPath<I> {
    fn as_ref(&self) -> &[I] { &self.0 }
}

impl<I: Display> Display for DerivationPath<I> {
    /// Renders the path with the `m` prefix when alternate flag is given
    /// (`{:#}`), and as a plain `/`-separated suffix otherwise.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("m")?;
        }
        for segment in &self.0 {
            f.write_str("/")?;
            Display::fmt(segment, f)?;
        }
        Ok(())
    }
}

impl<I: FromStr> FromStr for DerivationPath<I>
where IndexParseError: From<<I as FromStr>::Err>
{
    type Err = DerivationParseError;

    /// Parses `m/44'/194'/0'/0/0`, `44h/194h/0h/0/0` or `/44'/194'`. The
    /// bare master notation `m` (or an empty string) yields an empty path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        let path = match path.strip_prefix('m').or_else(|| path.strip_prefix('M')) {
            Some("") => return Ok(Self(vec![])),
            Some(rest) => rest
                .strip_prefix('/')
                .ok_or_else(|| DerivationParseError::InvalidFormat(s.to_owned()))?,
            None => path.strip_prefix('/').unwrap_or(path),
        };
        if path.is_empty() {
            return Ok(Self(vec![]));
        }
        let inner = path
            .split('/')
            .map(|seg| {
                if seg.is_empty() {
                    return Err(DerivationParseError::InvalidFormat(s.to_owned()));
                }
                I::from_str(seg)
                    .map_err(|err| DerivationParseError::InvalidIndex(s.to_owned(), err.into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(inner))
    }
}

impl<I> IntoIterator for DerivationPath<I> {
    type Item = I;
    type IntoIter = std::vec::IntoIter<I>;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'path, I: Copy> IntoIterator for &'path DerivationPath<I> {
    type Item = I;
    type IntoIter = std::iter::Copied<std::slice::Iter<'path, I>>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter().copied() }
}

impl<I> FromIterator<I> for DerivationPath<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self { Self(iter.into_iter().collect()) }
}

impl<I> DerivationPath<I> {
    /// Constructs empty derivation path.
    pub fn new() -> Self { Self(vec![]) }
}

impl DerivationPath {
    /// Standard account path `m/44'/194'/{account}'/{change}/{index}` of the
    /// EOS coin type.
    pub fn bip44(account: u16, change: u16, index: u16) -> Self {
        Self(vec![
            DerivationIndex::hardened(44),
            DerivationIndex::hardened(crate::EOS_COIN_TYPE),
            DerivationIndex::hardened(account),
            DerivationIndex::normal(change),
            DerivationIndex::normal(index),
        ])
    }
}
