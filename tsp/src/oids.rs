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

//! Object identifier arc tables shared by the codec and the signature
//! validators.

#![allow(dead_code)] // Usage varies by feature surface.

use rasn::types::ObjectIdentifier;

// Digest algorithms.
pub(crate) const SHA1: &[u32] = &[1, 3, 14, 3, 2, 26];
pub(crate) const SHA256: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 1];
pub(crate) const SHA384: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 2];
pub(crate) const SHA512: &[u32] = &[2, 16, 840, 1, 101, 3, 4, 2, 3];

// Signature algorithms.
pub(crate) const RSA_ENCRYPTION: &[u32] = &[1, 2, 840, 113549, 1, 1, 1];
pub(crate) const SHA256_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 11];
pub(crate) const SHA384_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 12];
pub(crate) const SHA512_WITH_RSA: &[u32] = &[1, 2, 840, 113549, 1, 1, 13];
pub(crate) const ECDSA_WITH_SHA256: &[u32] = &[1, 2, 840, 10045, 4, 3, 2];
pub(crate) const ECDSA_WITH_SHA384: &[u32] = &[1, 2, 840, 10045, 4, 3, 3];
pub(crate) const ED25519: &[u32] = &[1, 3, 101, 112];

// CMS content types and attributes.
pub(crate) const ID_DATA: &[u32] = &[1, 2, 840, 113549, 1, 7, 1];
pub(crate) const ID_SIGNED_DATA: &[u32] = &[1, 2, 840, 113549, 1, 7, 2];
pub(crate) const ID_CONTENT_TYPE: &[u32] = &[1, 2, 840, 113549, 1, 9, 3];
pub(crate) const ID_MESSAGE_DIGEST: &[u32] = &[1, 2, 840, 113549, 1, 9, 4];
pub(crate) const ID_SIGNING_TIME: &[u32] = &[1, 2, 840, 113549, 1, 9, 5];

/// Content type for Time-Stamp Token Info (1.2.840.113549.1.9.16.1.4).
pub(crate) const ID_CT_TST_INFO: &[u32] = &[1, 2, 840, 113549, 1, 9, 16, 1, 4];

/// Extended key usage purpose id-kp-timeStamping (1.3.6.1.5.5.7.3.8).
pub(crate) const EKU_TIME_STAMPING: &[u32] = &[1, 3, 6, 1, 5, 5, 7, 3, 8];

/// Build an owned object identifier from a static arc table.
pub(crate) fn oid(arcs: &'static [u32]) -> ObjectIdentifier {
    ObjectIdentifier::new_unchecked(arcs.into())
}

/// Compare an object identifier against an arc table.
pub(crate) fn oid_is(value: &ObjectIdentifier, arcs: &'static [u32]) -> bool {
    *value == oid(arcs)
}

/// Render an object identifier in dotted-decimal form.
pub(crate) fn oid_to_string(value: &ObjectIdentifier) -> String {
    value
        .iter()
        .map(|arc| arc.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
