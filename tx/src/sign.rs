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

use codec::{PrivKey, PubKey, Signature};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum SignError {
    /// signer has no private key material and can't sign the transaction.
    CannotSign,
}

/// Trait used for signing transaction digests.
pub trait Sign {
    /// Public key matching signatures produced by the signer, if known.
    fn public_key(&self) -> Option<PubKey>;

    /// Create canonical recoverable signature over the 32-byte digest.
    ///
    /// Returns `None` if the signer has no access to the private key.
    fn sign_digest(&self, digest: [u8; 32]) -> Option<Signature>;
}

impl<T: Sign> Sign for &T {
    fn public_key(&self) -> Option<PubKey> { (*self).public_key() }

    fn sign_digest(&self, digest: [u8; 32]) -> Option<Signature> { (*self).sign_digest(digest) }
}

impl Sign for PrivKey {
    fn public_key(&self) -> Option<PubKey> { Some(PrivKey::public_key(self)) }

    fn sign_digest(&self, digest: [u8; 32]) -> Option<Signature> {
        Some(self.sign_canonical(digest))
    }
}

impl Sign for PubKey {
    fn public_key(&self) -> Option<PubKey> { Some(*self) }

    fn sign_digest(&self, _digest: [u8; 32]) -> Option<Signature> { None }
}
