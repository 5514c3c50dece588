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

//! System and token contract actions the wallet is able to assemble.

use std::collections::BTreeSet;
use std::io::Write;

use amplify::IoError;
use codec::{Asset, PubKey};

use crate::coders::Encode;
use crate::{ChainConfig, Name};

/// Permission used to authorize all assembled actions.
pub const ACTIVE_PERMISSION: Name = Name::from_static("active");

pub const TRANSFER: Name = Name::from_static("transfer");
pub const NEW_ACCOUNT: Name = Name::from_static("newaccount");
pub const BUY_RAM_BYTES: Name = Name::from_static("buyrambytes");
pub const DELEGATE_BW: Name = Name::from_static("delegatebw");
pub const UNDELEGATE_BW: Name = Name::from_static("undelegatebw");
pub const VOTE_PRODUCER: Name = Name::from_static("voteproducer");

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display("{actor}@{permission}")]
pub struct PermissionLevel {
    pub actor: Name,
    pub permission: Name,
}

impl PermissionLevel {
    pub fn active(actor: Name) -> Self {
        PermissionLevel {
            actor,
            permission: ACTIVE_PERMISSION,
        }
    }
}

impl Encode for PermissionLevel {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        Ok(self.actor.encode(writer)? + self.permission.encode(writer)?)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyWeight {
    pub key: PubKey,
    pub weight: u16,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct PermissionLevelWeight {
    pub permission: PermissionLevel,
    pub weight: u16,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct WaitWeight {
    pub wait_sec: u32,
    pub weight: u16,
}

/// Account permission authority.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<PermissionLevelWeight>,
    pub waits: Vec<WaitWeight>,
}

impl Authority {
    /// Authority satisfied by a signature of a single key.
    pub fn single_key(key: PubKey) -> Self {
        Authority {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: vec![],
            waits: vec![],
        }
    }
}

impl Encode for KeyWeight {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        Ok(self.key.encode(writer)? + self.weight.encode(writer)?)
    }
}

impl Encode for PermissionLevelWeight {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        Ok(self.permission.encode(writer)? + self.weight.encode(writer)?)
    }
}

impl Encode for WaitWeight {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        Ok(self.wait_sec.encode(writer)? + self.weight.encode(writer)?)
    }
}

impl Encode for Authority {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = self.threshold.encode(writer)?;
        counter += self.keys.encode(writer)?;
        counter += self.accounts.encode(writer)?;
        counter += self.waits.encode(writer)?;
        Ok(counter)
    }
}

/// Action payload, one variant per supported contract action.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Action {
    Transfer {
        from: Name,
        to: Name,
        quantity: Asset,
        memo: String,
    },

    NewAccount {
        creator: Name,
        name: Name,
        owner: Authority,
        active: Authority,
    },

    BuyRamBytes {
        payer: Name,
        receiver: Name,
        bytes: u32,
    },

    DelegateBandwidth {
        from: Name,
        receiver: Name,
        net: Asset,
        cpu: Asset,
        transfer: bool,
    },

    UndelegateBandwidth {
        from: Name,
        receiver: Name,
        net: Asset,
        cpu: Asset,
    },

    VoteProducer {
        voter: Name,
        proxy: Name,
        producers: BTreeSet<Name>,
    },
}

impl Action {
    /// Contract account executing the action.
    pub fn account(&self, config: &ChainConfig) -> Name {
        match self {
            Action::Transfer { .. } => config.token_contract,
            _ => config.system_contract,
        }
    }

    pub fn name(&self) -> Name {
        match self {
            Action::Transfer { .. } => TRANSFER,
            Action::NewAccount { .. } => NEW_ACCOUNT,
            Action::BuyRamBytes { .. } => BUY_RAM_BYTES,
            Action::DelegateBandwidth { .. } => DELEGATE_BW,
            Action::UndelegateBandwidth { .. } => UNDELEGATE_BW,
            Action::VoteProducer { .. } => VOTE_PRODUCER,
        }
    }

    /// Account whose active permission must authorize the action.
    pub fn actor(&self) -> Name {
        match self {
            Action::Transfer { from, .. } => *from,
            Action::NewAccount { creator, .. } => *creator,
            Action::BuyRamBytes { payer, .. } => *payer,
            Action::DelegateBandwidth { from, .. } => *from,
            Action::UndelegateBandwidth { from, .. } => *from,
            Action::VoteProducer { voter, .. } => *voter,
        }
    }

    pub fn authorization(&self) -> Vec<PermissionLevel> { vec![PermissionLevel::active(self.actor())] }

    /// Serialized action arguments.
    pub fn data(&self) -> Vec<u8> { self.serialize() }

    /// Resolves contract account and authorization, producing action in the
    /// form it takes inside the transaction.
    pub fn to_raw(&self, config: &ChainConfig) -> RawAction {
        RawAction {
            account: self.account(config),
            name: self.name(),
            authorization: self.authorization(),
            data: self.data(),
        }
    }
}

impl Encode for Action {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = 0;
        match self {
            Action::Transfer {
                from,
                to,
                quantity,
                memo,
            } => {
                counter += from.encode(writer)?;
                counter += to.encode(writer)?;
                counter += quantity.encode(writer)?;
                counter += memo.encode(writer)?;
            }
            Action::NewAccount {
                creator,
                name,
                owner,
                active,
            } => {
                counter += creator.encode(writer)?;
                counter += name.encode(writer)?;
                counter += owner.encode(writer)?;
                counter += active.encode(writer)?;
            }
            Action::BuyRamBytes {
                payer,
                receiver,
                bytes,
            } => {
                counter += payer.encode(writer)?;
                counter += receiver.encode(writer)?;
                counter += bytes.encode(writer)?;
            }
            Action::DelegateBandwidth {
                from,
                receiver,
                net,
                cpu,
                transfer,
            } => {
                counter += from.encode(writer)?;
                counter += receiver.encode(writer)?;
                counter += net.encode(writer)?;
                counter += cpu.encode(writer)?;
                counter += transfer.encode(writer)?;
            }
            Action::UndelegateBandwidth {
                from,
                receiver,
                net,
                cpu,
            } => {
                counter += from.encode(writer)?;
                counter += receiver.encode(writer)?;
                counter += net.encode(writer)?;
                counter += cpu.encode(writer)?;
            }
            Action::VoteProducer {
                voter,
                proxy,
                producers,
            } => {
                counter += voter.encode(writer)?;
                counter += proxy.encode(writer)?;
                counter += producers.encode(writer)?;
            }
        }
        Ok(counter)
    }
}

/// Action with resolved contract account, authorization and serialized
/// arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RawAction {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: Vec<u8>,
}

impl Encode for RawAction {
    fn encode(&self, writer: &mut impl Write) -> Result<usize, IoError> {
        let mut counter = self.account.encode(writer)?;
        counter += self.name.encode(writer)?;
        counter += self.authorization.encode(writer)?;
        counter += self.data.encode(writer)?;
        Ok(counter)
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use codec::PrivKey;

    use super::*;

    fn name(s: &str) -> Name { Name::from_str(s).unwrap() }

    #[test]
    fn transfer_payload() {
        let action = Action::Transfer {
            from: name("alice"),
            to: name("bob"),
            quantity: Asset::core(10000),
            memo: "hi".to_owned(),
        };
        let mut expected = name("alice").to_u64().to_le_bytes().to_vec();
        expected.extend(name("bob").to_u64().to_le_bytes());
        expected.extend(10000i64.to_le_bytes());
        expected.extend([0x04, b'E', b'O', b'S', 0, 0, 0, 0]);
        expected.extend([2, b'h', b'i']);
        assert_eq!(action.data(), expected);

        let raw = action.to_raw(&ChainConfig::default());
        assert_eq!(raw.account.to_string(), "eosio.token");
        assert_eq!(raw.name.to_string(), "transfer");
        assert_eq!(raw.authorization, vec![PermissionLevel::active(name("alice"))]);
        assert_eq!(raw.authorization[0].to_string(), "alice@active");
    }

    #[test]
    fn authority_layout() {
        let key = PrivKey::from_byte_array([3u8; 32]).unwrap().public_key();
        let auth = Authority::single_key(key);
        let bytes = auth.serialize();
        // threshold(4) + keys count(1) + key type(1) + key(33) + weight(2) + 2 empty vectors
        assert_eq!(bytes.len(), 4 + 1 + 1 + 33 + 2 + 1 + 1);
        assert_eq!(&bytes[..6], &[1, 0, 0, 0, 1, 0]);
        assert_eq!(&bytes[6..39], &key.serialize()[..]);
        assert_eq!(&bytes[39..], &[1, 0, 0, 0]);
    }

    #[test]
    fn system_actions_target_system_contract() {
        let config = ChainConfig::default();
        let action = Action::BuyRamBytes {
            payer: name("alice"),
            receiver: name("bob"),
            bytes: 8192,
        };
        assert_eq!(action.account(&config).to_string(), "eosio");
        assert_eq!(action.name().to_string(), "buyrambytes");
        assert_eq!(&action.data()[16..], &8192u32.to_le_bytes());
    }

    #[test]
    fn producers_sorted() {
        let action = Action::VoteProducer {
            voter: name("alice"),
            proxy: Name::EMPTY,
            producers: [name("zed"), name("bob"), name("carol")].into_iter().collect(),
        };
        let data = action.data();
        assert_eq!(&data[8..16], &[0u8; 8]);
        assert_eq!(data[16], 3);
        assert_eq!(&data[17..25], &name("bob").to_u64().to_le_bytes());
        assert_eq!(&data[25..33], &name("carol").to_u64().to_le_bytes());
        assert_eq!(&data[33..41], &name("zed").to_u64().to_le_bytes());
    }
}
