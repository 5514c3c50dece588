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

//! Fixed-point token amounts.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Number of decimal digits used by the chain core token.
pub const DEFAULT_PRECISION: u8 = 4;
/// Chain core token symbol code.
pub const DEFAULT_SYMBOL: &str = "EOS";
pub const MAX_SYMBOL_LEN: usize = 7;
pub const MAX_PRECISION: u8 = 18;

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum SymbolError {
    /// symbol code must not be empty.
    Empty,

    /// symbol code '{0}' is longer than 7 characters.
    TooLong(String),

    /// symbol code '{0}' contains characters other than uppercase latin letters.
    InvalidChar(String),

    /// symbol precision {0} exceeds maximum of 18 decimal digits.
    PrecisionOverflow(u8),

    /// invalid symbol precision in '{0}'.
    InvalidPrecision(String),
}

/// Token symbol: up to seven uppercase letters plus decimal precision.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display("{precision},{code}")]
pub struct Symbol {
    precision: u8,
    code: String,
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol {
            precision: DEFAULT_PRECISION,
            code: DEFAULT_SYMBOL.to_owned(),
        }
    }
}

impl Symbol {
    /// Constructs symbol with the default precision of 4 decimal digits.
    pub fn new(code: &str) -> Result<Self, SymbolError> {
        Self::with_precision(code, DEFAULT_PRECISION)
    }

    pub fn with_precision(code: &str, precision: u8) -> Result<Self, SymbolError> {
        if code.is_empty() {
            return Err(SymbolError::Empty);
        }
        if code.len() > MAX_SYMBOL_LEN {
            return Err(SymbolError::TooLong(code.to_owned()));
        }
        if !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(SymbolError::InvalidChar(code.to_owned()));
        }
        if precision > MAX_PRECISION {
            return Err(SymbolError::PrecisionOverflow(precision));
        }
        Ok(Symbol {
            precision,
            code: code.to_owned(),
        })
    }

    pub fn code(&self) -> &str { &self.code }

    pub fn precision(&self) -> u8 { self.precision }

    /// Symbol packed into `u64`: precision in the lowest byte followed by the
    /// code characters.
    pub fn to_u64(&self) -> u64 {
        self.code
            .bytes()
            .enumerate()
            .fold(self.precision as u64, |acc, (i, b)| acc | (b as u64) << (8 * (i + 1)))
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    /// Parses either bare code (`EOS`) using the default precision or
    /// `precision,CODE` form (`4,EOS`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            None => Symbol::new(s),
            Some((precision, code)) => {
                let precision = precision
                    .parse()
                    .map_err(|_| SymbolError::InvalidPrecision(s.to_owned()))?;
                Symbol::with_precision(code, precision)
            }
        }
    }
}

/// Amount in the smallest token units together with the token symbol.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self { Asset { amount, symbol } }

    /// Asset in the chain core token (`EOS` with 4 decimal digits).
    pub fn core(amount: i64) -> Self { Asset::new(amount, Symbol::default()) }

    pub fn amount(&self) -> i64 { self.amount }

    pub fn symbol(&self) -> &Symbol { &self.symbol }
}

impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision as usize;
        let scale = 10u128.pow(precision as u32);
        let abs = self.amount.unsigned_abs() as u128;
        if self.amount < 0 {
            f.write_str("-")?;
        }
        write!(f, "{}", abs / scale)?;
        if precision > 0 {
            write!(f, ".{:0precision$}", abs % scale)?;
        }
        write!(f, " {}", self.symbol.code)
    }
}

/// Renders integer amount of the smallest units as a fixed-point decimal
/// followed by the symbol code, i.e. `100000` with `4,EOS` becomes
/// `"10.0000 EOS"`.
pub fn format_amount(raw: i64, symbol: &Symbol) -> String {
    Asset::new(raw, symbol.clone()).to_string()
}

#[cfg(feature = "serde")]
mod _serde {
    use serde_crate::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl Serialize for Symbol {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Symbol {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de> {
            let s = String::deserialize(deserializer)?;
            Symbol::from_str(&s)
                .map_err(|err| de::Error::custom(format!("invalid token symbol; {err}")))
        }
    }
}
