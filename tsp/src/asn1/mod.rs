// Copyright 2026 the tsp-crypto authors. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

#![allow(missing_docs)]

//! Declarative DER definitions for the wire structures this crate speaks.
//!
//! Structures are declared with `rasn` derives and encoded/decoded through
//! `rasn::der`. X.509 building blocks (`AlgorithmIdentifier`, `Certificate`,
//! `Name`, `Extensions`, `GeneralName`) come from `rasn-pkix`.

pub mod rfc3161;
pub mod rfc5652;

/// Collect values into a `SET OF`. DER element ordering is the encoder's
/// concern, not the caller's.
pub(crate) fn set_of<T: Eq + std::hash::Hash>(items: Vec<T>) -> rasn::types::SetOf<T> {
    let mut set = rasn::types::SetOf::new();
    for item in items {
        set.insert(item);
    }
    set
}
