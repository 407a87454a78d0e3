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

use rasn::types::Integer;

use crate::{
    digest::DigestAlgorithm, error::TimeStampError, request::TimestampRequest,
    tests::test_utils::sample_request,
};

#[test]
fn round_trip_reproduces_every_field() {
    let mut request = sample_request();
    request.set_cert_requested(false);

    let der = request.to_der().unwrap();
    let back = TimestampRequest::from_der(&der).unwrap();

    assert_eq!(back.hash_algorithm(), Some(DigestAlgorithm::Sha256));
    assert_eq!(back.message_imprint(), request.message_imprint());
    assert_eq!(back.policy_id().as_deref(), Some("1.2.3.4.5"));
    assert_eq!(back.nonce(), Some(&Integer::from(42u64)));
    assert!(!back.cert_requested());

    assert_eq!(back, request);
}

#[test]
fn parse_accepts_already_decoded_structure() {
    let mut request = sample_request();
    request.set_cert_requested(true);
    let req = request.to_req().unwrap();

    let back = TimestampRequest::try_from(&req).unwrap();

    assert_eq!(back, request);
}

#[test]
fn reassignment_fully_replaces_prior_values() {
    let mut request = sample_request();

    request.set_nonce(24u64);
    request.set_hash_algorithm("SHA1").unwrap();
    request.set_message_imprint(DigestAlgorithm::Sha1.digest(b"other"));
    request.set_policy_id("1.2.9").unwrap();

    let back = TimestampRequest::from_der(&request.to_der().unwrap()).unwrap();

    assert_eq!(back.nonce(), Some(&Integer::from(24u64)));
    assert_eq!(back.hash_algorithm(), Some(DigestAlgorithm::Sha1));
    assert_eq!(
        back.message_imprint(),
        Some(DigestAlgorithm::Sha1.digest(b"other").as_slice())
    );
    assert_eq!(back.policy_id().as_deref(), Some("1.2.9"));
}

#[test]
fn serialize_requires_algorithm_and_imprint() {
    let mut request = TimestampRequest::new();

    assert!(matches!(
        request.to_der(),
        Err(TimeStampError::MissingField("hash_algorithm"))
    ));

    request.set_hash_algorithm("SHA-256").unwrap();

    assert!(matches!(
        request.to_der(),
        Err(TimeStampError::MissingField("message_imprint"))
    ));

    request.set_message_imprint(DigestAlgorithm::Sha256.digest(b"x"));
    assert!(request.to_der().is_ok());
}

#[test]
fn unrecognized_algorithm_is_rejected() {
    let mut request = TimestampRequest::new();

    assert!(matches!(
        request.set_hash_algorithm("MD5"),
        Err(TimeStampError::UnknownAlgorithm(_))
    ));

    // OID-string spelling is accepted.
    request
        .set_hash_algorithm("2.16.840.1.101.3.4.2.1")
        .unwrap();
    assert_eq!(request.hash_algorithm(), Some(DigestAlgorithm::Sha256));
}

#[test]
fn malformed_policy_oid_is_rejected() {
    let mut request = TimestampRequest::new();

    for bad in ["", "1", "not.an.oid", "3.1.4", "1.40.5"] {
        assert!(
            matches!(
                request.set_policy_id(bad),
                Err(TimeStampError::InvalidPolicy(_))
            ),
            "expected {bad:?} to be rejected"
        );
    }

    request.set_policy_id("2.16.840.1.101").unwrap();
    assert_eq!(request.policy_id().as_deref(), Some("2.16.840.1.101"));
}

#[test]
fn cert_requested_defaults_to_true() {
    let request = TimestampRequest::new();
    assert!(request.cert_requested());
}

#[test]
fn random_nonce_is_set() {
    let mut request = TimestampRequest::new();
    request.set_random_nonce();
    assert!(request.nonce().is_some());
}
