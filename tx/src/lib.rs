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

//! Offline assembly, binary packing and signing of EOS transactions.

#[macro_use]
extern crate amplify;
#[cfg(feature = "serde")]
#[macro_use]
extern crate serde_crate as serde;

mod name;
pub mod coders;
mod chain;
mod header;
mod action;
mod sign;
mod transaction;
mod assembler;

pub use action::{
    Action, Authority, KeyWeight, PermissionLevel, PermissionLevelWeight, RawAction, WaitWeight,
    ACTIVE_PERMISSION, BUY_RAM_BYTES, DELEGATE_BW, NEW_ACCOUNT, TRANSFER, UNDELEGATE_BW,
    VOTE_PRODUCER,
};
pub use assembler::{
    AssembleError, Assembler, MAX_MEMO_LEN, MAX_VOTE_PRODUCERS, NEW_ACCOUNT_RAM_BYTES,
};
pub use chain::{
    ChainConfig, ChainId, ChainIdError, DEFAULT_CHAIN_ID, SYSTEM_CONTRACT, TOKEN_CONTRACT,
};
pub use coders::{Encode, VarUint32};
pub use header::{
    HeaderError, TaposRef, TransactionHeader, DEFAULT_EXPIRATION_SECS, EXPIRATION_FORMAT,
};
pub use name::{Name, NameError, NAME_MAX_LEN};
pub use sign::{Sign, SignError};
pub use transaction::{PackedTransaction, SignedTransaction, Transaction, COMPRESSION_NONE};
