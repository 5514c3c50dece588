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

use std::io::Write;

use amplify::IoError;
use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::coders::{Encode, VarUint32};

/// Default transaction lifetime in seconds.
pub const DEFAULT_EXPIRATION_SECS: u32 = 60;

/// Expiration rendering used by the chain RPC: ISO-8601 with whole seconds
/// and without timezone suffix (UTC is implied).
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum HeaderError {
    /// transaction expiration {0} can't be represented as 32-bit unix
    /// timestamp.
    ExpirationOutOfRange(DateTime<Utc>),

    /// block id must be 32 bytes long, while {0} bytes were provided.
    InvalidBlockIdLength(usize),

    /// block id is not a valid hexadecimal string.
    InvalidBlockIdHex,
}

/// Reference to a recent block protecting transaction from being replayed on
/// a different fork (TaPoS).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct TaposRef {
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
}

impl TaposRef {
    pub fn new(ref_block_num: u16, ref_block_prefix: u32) -> Self {
        TaposRef {
            ref_block_num,
            ref_block_prefix,
        }
    }

    /// Computes reference from the block number and id as returned by the
    /// chain RPC: lower 16 bits of the number and bytes 8..12 of the id read
    /// as little-endian `u32`.
    pub fn from_block(block_num: u32, block_id: [u8; 32]) -> Self {
        let mut prefix = [0u8; 4];
        prefix.copy_from_slice(&block_id[8..12]);
        TaposRef {
            ref_block_num: (block_num & 0xFFFF) as u16,
            ref_block_prefix: u32::from_le_bytes(prefix),
        }
    }

    /// Computes reference from the block id alone, which carries the block
    /// number in its first four bytes (big-endian).
    pub fn from_block_id(block_id: [u8; 32]) -> Self {
        let mut num = [0u8; 4];
        num.copy_from_slice(&block_id[..4]);
        Self::from_block(u32::from_be_bytes(num), block_id)
    }

    pub fn from_block_id_hex(block_id: &str) -> Result<Self, HeaderError> {
        let data = hex::decode(block_id).map_err(|_| HeaderError::InvalidBlockIdHex)?;
        let block_id = <[u8; 32]>::try_from(data.as_slice())
            .map_err(|_| HeaderError::InvalidBlockIdLength(data.len()))?;
        Ok(Self::from_block_id(block_id))
    }
}

/// Transaction header.
///
/// Only the expiration and the TaPoS reference are variable; resource limits
/// and delay are always zero, leaving them to the chain defaults.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TransactionHeader {
    expiration: DateTime<Utc>,
    tapos: TaposRef,
    max_net_usage_words: VarUint32,
    max_cpu_usage_ms: u8,
    delay_sec: VarUint32,
}

impl TransactionHeader {
    /// Header region, which is always zero.
    pub const REGION: u16 = 0;

    /// Constructs header expiring `expires_in` seconds from now.
    pub fn new(expires_in: u32, tapos: TaposRef) -> Result<Self, HeaderError> {
        Self::with_expiration(Utc::now() + Duration::seconds(expires_in as i64), tapos)
    }

    /// Same as [`TransactionHeader::new`] with the reference block parts
    /// provided separately.
    pub fn build(
        expires_in: u32,
        ref_block_num: u16,
        ref_block_prefix: u32,
    ) -> Result<Self, HeaderError> {
        Self::new(expires_in, TaposRef::new(ref_block_num, ref_block_prefix))
    }

    /// Constructs header with the given expiration instant, dropping its
    /// sub-second part.
    pub fn with_expiration(expiration: DateTime<Utc>, tapos: TaposRef) -> Result<Self, HeaderError> {
        let expiration = expiration.trunc_subsecs(0);
        if u32::try_from(expiration.timestamp()).is_err() {
            return Err(HeaderError::ExpirationOutOfRange(expiration));
        }
        Ok(TransactionHeader {
            expiration,
            tapos,
            max_net_usage_words: VarUint32::default(),
            max_cpu_usage_ms: 0,
            delay_sec: VarUint32::default(),
        })
    }

    pub fn expiration(&self) -> DateTime<Utc> { self.expiration }

    /// Expiration formatted as `YYYY-MM-DDTHH:MM:SS`.
    pub fn expiration_iso(&self) -> String { self.expiration.format(EXPIRATION_FORMAT).to_string() }

    pub fn tapos(&self) -> TaposRef { self.tapos }

    pub fn ref_block_num(&self) -> u16 { self.tapos.ref_block_num }

    pub fn ref_block_prefix(&self) -> u32 { self.tapos.ref_block_prefix }

    pub fn max_net_usage_words(&self) -> u32 { *self.max_net_usage_words }

    pub fn max_cpu_usage_ms(&self) -> u8 { self.max_cpu_usage_ms }

    pub fn delay_sec(&self) -> u32 { *self.delay_sec }

    fn expiration_secs(&self) -> u32 {
        // range is checked on construction
        self.expiration.timestamp() as u32
    }
}

impl Encode for TransactionHeader {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = self.expiration_secs().encode(writer)?;
        counter += self.tapos.ref_block_num.encode(writer)?;
        counter += self.tapos.ref_block_prefix.encode(writer)?;
        counter += self.max_net_usage_words.encode(writer)?;
        counter += self.max_cpu_usage_ms.encode(writer)?;
        counter += self.delay_sec.encode(writer)?;
        Ok(counter)
    }
}
