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

//! Chain ABI binary serialization: little-endian integers, LEB128 lengths and
//! length-prefixed sequences.

use std::collections::BTreeSet;
use std::io::Write;

use amplify::IoError;
use codec::{Asset, PubKey, Symbol};

use crate::Name;

/// Key type tag of secp256k1 (`K1`) public keys in the chain ABI.
pub const KEY_TYPE_K1: u8 = 0;

pub trait Encode {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError>;

    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode(&mut buf).expect("in-memory encoding can't error");
        buf
    }
}

impl<'a, T: Encode> Encode for &'a T {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> { (*self).encode(writer) }
}

/// Unsigned integer encoded as LEB128, used for collection lengths.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default, Debug, Display, From)]
#[wrapper(Deref)]
#[display(inner)]
pub struct VarUint32(u32);

impl VarUint32 {
    pub fn with(len: usize) -> Result<Self, IoError> {
        u32::try_from(len).map(VarUint32).map_err(|_| {
            IoError::from(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "collection length exceeds u32",
            ))
        })
    }
}

impl Encode for VarUint32 {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut val = self.0;
        let mut counter = 0;
        loop {
            let mut byte = (val & 0x7F) as u8;
            val >>= 7;
            if val != 0 {
                byte |= 0x80;
            }
            writer.write_all(&[byte])?;
            counter += 1;
            if val == 0 {
                return Ok(counter);
            }
        }
    }
}

macro_rules! encode_le {
    ($($ty:ty),+) => {
        $(
            impl Encode for $ty {
                fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
                    let bytes = self.to_le_bytes();
                    writer.write_all(&bytes)?;
                    Ok(bytes.len())
                }
            }
        )+
    };
}

encode_le!(u8, u16, u32, u64, i64);

impl Encode for bool {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        (*self as u8).encode(writer)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = VarUint32::with(self.len())?.encode(writer)?;
        for item in self {
            counter += item.encode(writer)?;
        }
        Ok(counter)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        self.as_slice().encode(writer)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = VarUint32::with(self.len())?.encode(writer)?;
        for item in self {
            counter += item.encode(writer)?;
        }
        Ok(counter)
    }
}

impl Encode for str {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let counter = VarUint32::with(self.len())?.encode(writer)?;
        writer.write_all(self.as_bytes())?;
        Ok(counter + self.len())
    }
}

impl Encode for String {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        self.as_str().encode(writer)
    }
}

impl Encode for Name {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        self.to_u64().encode(writer)
    }
}

impl Encode for Symbol {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        self.to_u64().encode(writer)
    }
}

impl Encode for Asset {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        Ok(self.amount().encode(writer)? + self.symbol().encode(writer)?)
    }
}

impl Encode for PubKey {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let key = self.serialize();
        let counter = KEY_TYPE_K1.encode(writer)?;
        writer.write_all(&key)?;
        Ok(counter + key.len())
    }
}
