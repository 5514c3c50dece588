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

//! High-level builders composing headers and actions into transactions.

use codec::{format_amount, Asset, PubKey, Symbol};
use tracing::debug;

use crate::{
    Action, Authority, ChainConfig, HeaderError, Name, Sign, SignError, SignedTransaction,
    Transaction, TransactionHeader,
};

/// Amount of RAM bought for each newly registered account.
pub const NEW_ACCOUNT_RAM_BYTES: u32 = 8192;
pub const MAX_MEMO_LEN: usize = 256;
/// Maximal number of producers a single vote may contain.
pub const MAX_VOTE_PRODUCERS: usize = 30;

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum AssembleError {
    /// memo is {0} bytes long, exceeding 256 bytes limit.
    MemoTooLong(usize),

    /// vote contains {0} producers, while no more than 30 are allowed.
    TooManyProducers(usize),

    /// stake amount must not be negative, got {0}.
    NegativeAmount(i64),

    #[from]
    #[display(inner)]
    Header(HeaderError),
}

/// Transaction assembler bound to a specific chain configuration.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Assembler {
    config: ChainConfig,
}

impl Assembler {
    pub fn new(config: ChainConfig) -> Self { Assembler { config } }

    pub fn config(&self) -> &ChainConfig { &self.config }

    /// Header expiring `expires_in` seconds from now.
    pub fn build_header(
        &self,
        expires_in: u32,
        ref_block_num: u16,
        ref_block_prefix: u32,
    ) -> Result<TransactionHeader, AssembleError> {
        TransactionHeader::build(expires_in, ref_block_num, ref_block_prefix).map_err(From::from)
    }

    /// Formats amount using the configured core symbol.
    pub fn format_amount(&self, raw: i64) -> String { format_amount(raw, &self.config.symbol) }

    pub fn transfer(
        &self,
        header: TransactionHeader,
        from: Name,
        to: Name,
        amount: i64,
        memo: impl Into<String>,
    ) -> Result<Transaction, AssembleError> {
        self.transfer_with_symbol(header, from, to, amount, memo, self.config.symbol.clone())
    }

    pub fn transfer_with_symbol(
        &self,
        header: TransactionHeader,
        from: Name,
        to: Name,
        amount: i64,
        memo: impl Into<String>,
        symbol: Symbol,
    ) -> Result<Transaction, AssembleError> {
        let memo = memo.into();
        if memo.len() > MAX_MEMO_LEN {
            return Err(AssembleError::MemoTooLong(memo.len()));
        }
        let quantity = Asset::new(amount, symbol);
        debug!(%from, %to, %quantity, "assembling transfer");
        Ok(Transaction::new(header, vec![Action::Transfer {
            from,
            to,
            quantity,
            memo,
        }]))
    }

    /// Creates account `name` controlled by single keys, buys it RAM and
    /// stakes `stake` for both network and CPU bandwidth.
    pub fn register_account(
        &self,
        header: TransactionHeader,
        creator: Name,
        name: Name,
        owner_key: PubKey,
        active_key: PubKey,
        stake: i64,
    ) -> Result<Transaction, AssembleError> {
        let stake = self.core_asset(stake)?;
        debug!(%creator, %name, %stake, "assembling account registration");
        Ok(Transaction::new(header, vec![
            Action::NewAccount {
                creator,
                name,
                owner: Authority::single_key(owner_key),
                active: Authority::single_key(active_key),
            },
            Action::BuyRamBytes {
                payer: creator,
                receiver: name,
                bytes: NEW_ACCOUNT_RAM_BYTES,
            },
            Action::DelegateBandwidth {
                from: creator,
                receiver: name,
                net: stake.clone(),
                cpu: stake,
                transfer: false,
            },
        ]))
    }

    pub fn delegate(
        &self,
        header: TransactionHeader,
        from: Name,
        receiver: Name,
        net: i64,
        cpu: i64,
        transfer: bool,
    ) -> Result<Transaction, AssembleError> {
        Ok(Transaction::new(header, vec![Action::DelegateBandwidth {
            from,
            receiver,
            net: self.core_asset(net)?,
            cpu: self.core_asset(cpu)?,
            transfer,
        }]))
    }

    pub fn undelegate(
        &self,
        header: TransactionHeader,
        from: Name,
        receiver: Name,
        net: i64,
        cpu: i64,
    ) -> Result<Transaction, AssembleError> {
        Ok(Transaction::new(header, vec![Action::UndelegateBandwidth {
            from,
            receiver,
            net: self.core_asset(net)?,
            cpu: self.core_asset(cpu)?,
        }]))
    }

    /// Votes for producers directly, without a proxy. Duplicates are merged.
    pub fn vote_producer(
        &self,
        header: TransactionHeader,
        voter: Name,
        producers: impl IntoIterator<Item = Name>,
    ) -> Result<Transaction, AssembleError> {
        let producers = producers.into_iter().collect::<std::collections::BTreeSet<_>>();
        if producers.len() > MAX_VOTE_PRODUCERS {
            return Err(AssembleError::TooManyProducers(producers.len()));
        }
        Ok(Transaction::new(header, vec![Action::VoteProducer {
            voter,
            proxy: Name::EMPTY,
            producers,
        }]))
    }

    pub fn sign(
        &self,
        tx: &Transaction,
        signer: &impl Sign,
    ) -> Result<SignedTransaction, SignError> {
        tx.sign(&self.config, signer)
    }

    fn core_asset(&self, amount: i64) -> Result<Asset, AssembleError> {
        if amount < 0 {
            return Err(AssembleError::NegativeAmount(amount));
        }
        Ok(Asset::new(amount, self.config.symbol.clone()))
    }
}
