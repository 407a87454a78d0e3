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

//! Digest algorithm lookup for message imprints.

use rasn::types::ObjectIdentifier;
use rasn_pkix::AlgorithmIdentifier;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::{
    error::TimeStampError,
    oids::{self, oid, oid_is},
};

/// A digest algorithm usable in a message imprint.
///
/// This is a stateless lookup type: names, dotted OID strings, and wire
/// algorithm identifiers all resolve to the same value, and digesting is a
/// pure function of the input bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DigestAlgorithm {
    /// SHA-1 (legacy; still common in deployed TSA clients).
    Sha1,

    /// SHA-256.
    Sha256,

    /// SHA-384.
    Sha384,

    /// SHA-512.
    Sha512,
}

impl DigestAlgorithm {
    /// Resolve a digest algorithm from a name (`"SHA1"`, `"sha-256"`, …)
    /// or a dotted OID string (`"2.16.840.1.101.3.4.2.1"`).
    pub fn resolve(name: &str) -> Result<Self, TimeStampError> {
        match name.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" | "1.3.14.3.2.26" => Ok(Self::Sha1),
            "SHA256" | "2.16.840.1.101.3.4.2.1" => Ok(Self::Sha256),
            "SHA384" | "2.16.840.1.101.3.4.2.2" => Ok(Self::Sha384),
            "SHA512" | "2.16.840.1.101.3.4.2.3" => Ok(Self::Sha512),
            _ => Err(TimeStampError::UnknownAlgorithm(name.to_string())),
        }
    }

    /// Resolve a digest algorithm from its object identifier.
    pub fn from_oid(value: &ObjectIdentifier) -> Option<Self> {
        if oid_is(value, oids::SHA1) {
            Some(Self::Sha1)
        } else if oid_is(value, oids::SHA256) {
            Some(Self::Sha256)
        } else if oid_is(value, oids::SHA384) {
            Some(Self::Sha384)
        } else if oid_is(value, oids::SHA512) {
            Some(Self::Sha512)
        } else {
            None
        }
    }

    /// Return the object identifier for this algorithm.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Self::Sha1 => oid(oids::SHA1),
            Self::Sha256 => oid(oids::SHA256),
            Self::Sha384 => oid(oids::SHA384),
            Self::Sha512 => oid(oids::SHA512),
        }
    }

    /// Return the wire algorithm identifier for this algorithm.
    ///
    /// Parameters are omitted rather than encoded as NULL, per RFC 5754.
    pub(crate) fn algorithm_identifier(&self) -> AlgorithmIdentifier {
        AlgorithmIdentifier {
            algorithm: self.oid(),
            parameters: None,
        }
    }

    /// Digest `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => Sha1::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// The length in bytes of digests this algorithm produces.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA-1"),
            Self::Sha256 => write!(f, "SHA-256"),
            Self::Sha384 => write!(f, "SHA-384"),
            Self::Sha512 => write!(f, "SHA-512"),
        }
    }
}
