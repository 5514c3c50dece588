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

//! Deterministic EOS wallet: hierarchical key tree built from a seed,
//! mnemonic, extended key or bare private key, with chain-native key
//! encodings and offline transaction signing.
//!
//! ```
//! use eoswallet::HdNode;
//!
//! let master = HdNode::from_mnemonic("cobo wallet is awesome", "").unwrap();
//! let node = master.derive("m/44'/194'/0'/0/0").unwrap();
//! assert_eq!(
//!     node.address().to_string(),
//!     "EOS8Q6s4WGcswUdot8UntNA2G4PVnUha5MyE1CDwZSX76FWc1xQEs"
//! );
//! ```

#[macro_use]
extern crate amplify;

mod node;
mod signer;

pub use codec::*;
pub use derive::*;
pub use node::{HdNode, KeyMaterial, NodeError};
pub use tx::*;
