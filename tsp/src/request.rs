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

use rand::{thread_rng, Rng};
use rasn::types::{Integer, ObjectIdentifier, OctetString};

use crate::{
    asn1::rfc3161::{MessageImprint, TimeStampReq},
    digest::DigestAlgorithm,
    error::TimeStampError,
    oids::oid_to_string,
};

/// Protocol version this crate speaks (RFC 3161 v1).
const VERSION: u8 = 1;

/// A client's time-stamp request: the digest of the data to be
/// time-stamped plus issuance preferences.
///
/// All fields are owned and fully replaceable: re-assigning a field
/// replaces the previous value outright, and the request stays
/// serializable afterwards. The same instance can be serialized any number
/// of times.
///
/// `hash_algorithm` and `message_imprint` must both be set before
/// [`to_der`](Self::to_der) will succeed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimestampRequest {
    hash_algorithm: Option<DigestAlgorithm>,
    message_imprint: Option<Vec<u8>>,
    policy_id: Option<ObjectIdentifier>,
    nonce: Option<Integer>,
    cert_requested: Option<bool>,
}

impl TimestampRequest {
    /// Create an empty request. Certificate inclusion defaults to
    /// requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the digest algorithm of the message imprint, by recognized name
    /// (`"SHA1"`, `"sha-256"`, …) or dotted OID string.
    pub fn set_hash_algorithm(&mut self, name: &str) -> Result<(), TimeStampError> {
        self.hash_algorithm = Some(DigestAlgorithm::resolve(name)?);
        Ok(())
    }

    /// The digest algorithm of the message imprint, if set.
    pub fn hash_algorithm(&self) -> Option<DigestAlgorithm> {
        self.hash_algorithm
    }

    /// Set the message imprint: the digest of the data being time-stamped,
    /// never the data itself.
    pub fn set_message_imprint(&mut self, digest: impl Into<Vec<u8>>) {
        self.message_imprint = Some(digest.into());
    }

    /// The message imprint bytes, if set.
    pub fn message_imprint(&self) -> Option<&[u8]> {
        self.message_imprint.as_deref()
    }

    /// Request a specific time-stamping policy by dotted OID string.
    pub fn set_policy_id(&mut self, policy: &str) -> Result<(), TimeStampError> {
        self.policy_id = Some(parse_policy_oid(policy)?);
        Ok(())
    }

    /// The requested policy in dotted-decimal form, if set.
    pub fn policy_id(&self) -> Option<String> {
        self.policy_id.as_ref().map(oid_to_string)
    }

    pub(crate) fn policy_oid(&self) -> Option<&ObjectIdentifier> {
        self.policy_id.as_ref()
    }

    /// Set the replay-binding nonce. Arbitrary precision; a conforming TSA
    /// echoes it back unchanged.
    pub fn set_nonce(&mut self, nonce: impl Into<Integer>) {
        self.nonce = Some(nonce.into());
    }

    /// Fill the nonce with a fresh 64-bit random value.
    pub fn set_random_nonce(&mut self) {
        let nonce: u64 = thread_rng().gen();
        self.nonce = Some(Integer::from(nonce));
    }

    /// The nonce, if set.
    pub fn nonce(&self) -> Option<&Integer> {
        self.nonce.as_ref()
    }

    /// Whether the TSA should embed its signing certificate (and chain) in
    /// the response. Defaults to true when never assigned.
    pub fn set_cert_requested(&mut self, requested: bool) {
        self.cert_requested = Some(requested);
    }

    /// Whether certificate inclusion is requested.
    pub fn cert_requested(&self) -> bool {
        self.cert_requested.unwrap_or(true)
    }

    /// Serialize to the DER `TimeStampReq` wire form.
    ///
    /// Fails unless both the hash algorithm and the message imprint have
    /// been set.
    pub fn to_der(&self) -> Result<Vec<u8>, TimeStampError> {
        let req = self.to_req()?;
        rasn::der::encode(&req).map_err(|e| TimeStampError::EncodeError(e.to_string()))
    }

    /// Build the decoded wire structure for this request.
    pub fn to_req(&self) -> Result<TimeStampReq, TimeStampError> {
        let hash_algorithm = self
            .hash_algorithm
            .ok_or(TimeStampError::MissingField("hash_algorithm"))?;

        let message_imprint = self
            .message_imprint
            .as_ref()
            .ok_or(TimeStampError::MissingField("message_imprint"))?;

        Ok(TimeStampReq {
            version: VERSION,
            message_imprint: MessageImprint {
                hash_algorithm: hash_algorithm.algorithm_identifier(),
                hashed_message: OctetString::from(message_imprint.clone()),
            },
            req_policy: self.policy_id.clone(),
            nonce: self.nonce.clone(),
            cert_req: self.cert_requested(),
            extensions: None,
        })
    }

    /// Parse a request from its DER wire form.
    pub fn from_der(data: &[u8]) -> Result<Self, TimeStampError> {
        let req: TimeStampReq =
            rasn::der::decode(data).map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

        Self::try_from(&req)
    }
}

impl TryFrom<&TimeStampReq> for TimestampRequest {
    type Error = TimeStampError;

    fn try_from(req: &TimeStampReq) -> Result<Self, Self::Error> {
        let alg_oid = &req.message_imprint.hash_algorithm.algorithm;
        let hash_algorithm = DigestAlgorithm::from_oid(alg_oid)
            .ok_or_else(|| TimeStampError::UnknownAlgorithm(oid_to_string(alg_oid)))?;

        Ok(Self {
            hash_algorithm: Some(hash_algorithm),
            message_imprint: Some(req.message_imprint.hashed_message.to_vec()),
            policy_id: req.req_policy.clone(),
            nonce: req.nonce.clone(),
            cert_requested: Some(req.cert_req),
        })
    }
}

impl TryFrom<TimeStampReq> for TimestampRequest {
    type Error = TimeStampError;

    fn try_from(req: TimeStampReq) -> Result<Self, Self::Error> {
        Self::try_from(&req)
    }
}

/// Parse and validate a dotted-decimal OID string.
pub(crate) fn parse_policy_oid(policy: &str) -> Result<ObjectIdentifier, TimeStampError> {
    let invalid = || TimeStampError::InvalidPolicy(policy.to_string());

    let arcs = policy
        .split('.')
        .map(|arc| arc.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    // X.660 shape: at least two arcs, first arc 0..=2, second arc < 40
    // under the first two roots.
    if arcs.len() < 2 || arcs[0] > 2 || (arcs[0] < 2 && arcs[1] >= 40) {
        return Err(invalid());
    }

    ObjectIdentifier::new(arcs).ok_or_else(invalid)
}
