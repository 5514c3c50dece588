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

use codec::{PubKey, Signature};
use tx::Sign;

use crate::HdNode;

impl Sign for HdNode {
    fn public_key(&self) -> Option<PubKey> { Some(HdNode::public_key(self)) }

    fn sign_digest(&self, digest: [u8; 32]) -> Option<Signature> {
        self.private_key().map(|sk| sk.sign_canonical(digest))
    }
}

#[cfg(test)]
mod test {
    use tx::{Assembler, Name, SignError, TransactionHeader};

    use super::*;

    #[test]
    fn public_node_can_not_sign() {
        let master = HdNode::from_master_seed(vec![7u8; 32]).unwrap();
        let xpub = HdNode::from_extended_key(&master.public_extended_key().unwrap()).unwrap();
        let assembler = Assembler::default();
        let tx = assembler
            .transfer(
                TransactionHeader::build(60, 1, 2).unwrap(),
                Name::from_static("alice"),
                Name::from_static("bob"),
                1,
                "",
            )
            .unwrap();
        assert_eq!(Sign::public_key(&xpub), Some(master.public_key()));
        assert_eq!(assembler.sign(&tx, &xpub), Err(SignError::CannotSign));
        let signed = assembler.sign(&tx, &master).unwrap();
        assert_eq!(signed.signers(assembler.config()).unwrap(), vec![master.public_key()]);
    }
}
