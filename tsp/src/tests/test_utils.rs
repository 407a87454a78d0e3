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

//! In-memory Ed25519 certificate chains for exercising issuance and
//! verification: root CA -> intermediate CA -> TSA end-entity, with or
//! without the time-stamping extended key usage.

use chrono::{Duration, Utc};
use ed25519_dalek::{Signer as _, SigningKey, VerifyingKey};
use rand::{thread_rng, Rng};
use rasn::types::{Any, BitString, Integer, ObjectIdentifier, OctetString, PrintableString, SetOf};
use rasn_pkix::{
    AlgorithmIdentifier, AttributeTypeAndValue, BasicConstraints, Certificate, Extension,
    Extensions, Name, RelativeDistinguishedName, SubjectPublicKeyInfo, TbsCertificate, Time,
    Validity, Version,
};
use sha1::{Digest, Sha1};

use crate::{
    factory::ResponseFactory, oids, raw_signature::Ed25519Signer, request::TimestampRequest,
};

/// OID commonName (2.5.4.3)
const CN: &[u32] = &[2, 5, 4, 3];

/// OID id-ce-keyUsage (2.5.29.15)
const KEY_USAGE: &[u32] = &[2, 5, 29, 15];

/// OID id-ce-basicConstraints (2.5.29.19)
const BASIC_CONSTRAINTS: &[u32] = &[2, 5, 29, 19];

/// OID id-ce-subjectKeyIdentifier (2.5.29.14)
const SUBJECT_KEY_ID: &[u32] = &[2, 5, 29, 14];

/// OID id-ce-extKeyUsage (2.5.29.37)
const EXT_KEY_USAGE: &[u32] = &[2, 5, 29, 37];

/// OID id-kp-emailProtection (1.3.6.1.5.5.7.3.4)
const EKU_EMAIL_PROTECTION: &[u32] = &[1, 3, 6, 1, 5, 5, 7, 3, 4];

/// A generated TSA certificate chain.
pub(crate) struct TsaChain {
    pub root_der: Vec<u8>,
    pub intermediate_der: Vec<u8>,
    pub signer_cert_der: Vec<u8>,
    pub signer_key: SigningKey,
}

impl TsaChain {
    pub(crate) fn signer(&self) -> Ed25519Signer {
        Ed25519Signer::from_signing_key(self.signer_key.clone())
    }
}

/// Root -> intermediate -> TSA end-entity with the timeStamping EKU.
pub(crate) fn tsa_chain() -> TsaChain {
    build_chain(true)
}

/// Same shape, but the end-entity is certified for email protection only.
pub(crate) fn wrong_purpose_chain() -> TsaChain {
    build_chain(false)
}

/// A self-signed CA with no relationship to any generated chain.
pub(crate) fn unrelated_root_der() -> Vec<u8> {
    let key = generate_key();
    build_ca_cert("unrelated-root.test", &key, None)
}

/// Encode a DER certificate as a PEM CERTIFICATE block.
pub(crate) fn der_to_pem(der: &[u8]) -> String {
    pem::Pem::new("CERTIFICATE", der.to_vec()).to_string()
}

/// A request with algorithm, imprint, policy, and nonce populated.
pub(crate) fn sample_request() -> TimestampRequest {
    let mut request = TimestampRequest::new();
    request.set_hash_algorithm("SHA-256").unwrap();
    request.set_message_imprint(crate::DigestAlgorithm::Sha256.digest(b"test message"));
    request.set_policy_id("1.2.3.4.5").unwrap();
    request.set_nonce(42u64);
    request
}

/// A factory ready to issue: current gen time, serial 1.
pub(crate) fn granted_factory() -> ResponseFactory {
    let mut factory = ResponseFactory::new();
    factory.set_gen_time(Utc::now());
    factory.set_serial_number(1u64);
    factory
}

fn build_chain(time_stamping: bool) -> TsaChain {
    let root_key = generate_key();
    let intermediate_key = generate_key();
    let signer_key = generate_key();

    let root_der = build_ca_cert("tsa-root.test", &root_key, None);

    let root: Certificate = rasn::der::decode(&root_der).unwrap();
    let intermediate_der = build_ca_cert(
        "tsa-intermediate.test",
        &intermediate_key,
        Some((&root.tbs_certificate.subject, &root_key)),
    );

    let intermediate: Certificate = rasn::der::decode(&intermediate_der).unwrap();
    let signer_cert_der = build_end_entity_cert(
        "tsa-signer.test",
        &signer_key.verifying_key(),
        &intermediate.tbs_certificate.subject,
        &intermediate_key,
        time_stamping,
    );

    TsaChain {
        root_der,
        intermediate_der,
        signer_cert_der,
        signer_key,
    }
}

fn generate_key() -> SigningKey {
    let mut seed = [0u8; 32];
    thread_rng().fill(&mut seed);
    SigningKey::from_bytes(&seed)
}

fn serial_number() -> Integer {
    Integer::from(i64::from(thread_rng().gen::<u32>()) + 1)
}

fn ed25519_algorithm() -> AlgorithmIdentifier {
    AlgorithmIdentifier {
        algorithm: oids::oid(oids::ED25519),
        parameters: None,
    }
}

fn build_name(cn: &str) -> Name {
    let ps = PrintableString::try_from(cn.to_string()).unwrap();
    let value = rasn::der::encode(&ps).unwrap();

    let mut set = SetOf::new();
    set.insert(AttributeTypeAndValue {
        r#type: ObjectIdentifier::new_unchecked(CN.into()),
        value: Any::new(value),
    });

    Name::RdnSequence(vec![RelativeDistinguishedName::from(set)])
}

fn validity() -> Validity {
    let now = Utc::now();

    Validity {
        not_before: Time::Utc(now - Duration::days(1)),
        not_after: Time::Utc(now + Duration::days(365)),
    }
}

fn spki_for(verifying_key: &VerifyingKey) -> SubjectPublicKeyInfo {
    SubjectPublicKeyInfo {
        algorithm: ed25519_algorithm(),
        subject_public_key: BitString::from_slice(verifying_key.as_bytes()),
    }
}

fn subject_key_identifier(spki: &SubjectPublicKeyInfo) -> Extension {
    let spki_der = rasn::der::encode(spki).unwrap();

    Extension {
        extn_id: ObjectIdentifier::new_unchecked(SUBJECT_KEY_ID.into()),
        critical: false,
        extn_value: OctetString::from(Sha1::digest(&spki_der).to_vec()),
    }
}

fn sign_tbs(tbs: TbsCertificate, issuer_key: &SigningKey) -> Vec<u8> {
    let tbs_der = rasn::der::encode(&tbs).unwrap();
    let sig = issuer_key.sign(&tbs_der);

    let cert = Certificate {
        tbs_certificate: tbs,
        signature_algorithm: ed25519_algorithm(),
        signature_value: BitString::from_slice(sig.to_bytes().as_slice()),
    };

    rasn::der::encode(&cert).unwrap()
}

/// Build a CA certificate: self-signed when `issuer` is `None`, otherwise
/// signed by the given issuer name and key.
fn build_ca_cert(cn: &str, key: &SigningKey, issuer: Option<(&Name, &SigningKey)>) -> Vec<u8> {
    let subject = build_name(cn);
    let spki = spki_for(&key.verifying_key());

    let exts = vec![
        Extension {
            extn_id: ObjectIdentifier::new_unchecked(BASIC_CONSTRAINTS.into()),
            critical: true,
            extn_value: OctetString::from(
                rasn::der::encode(&BasicConstraints {
                    ca: true,
                    path_len_constraint: None,
                })
                .unwrap(),
            ),
        },
        Extension {
            extn_id: ObjectIdentifier::new_unchecked(KEY_USAGE.into()),
            critical: true,
            // digitalSignature (0), keyCertSign (5), cRLSign (6)
            extn_value: OctetString::from(
                rasn::der::encode(&BitString::from_slice(&[0x86])).unwrap(),
            ),
        },
        subject_key_identifier(&spki),
    ];

    let (issuer_name, issuer_key) = match issuer {
        Some((name, issuer_key)) => (name.clone(), issuer_key),
        None => (subject.clone(), key),
    };

    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: serial_number(),
        signature: ed25519_algorithm(),
        issuer: issuer_name,
        validity: validity(),
        subject,
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: Some(Extensions::from(exts)),
    };

    sign_tbs(tbs, issuer_key)
}

fn build_end_entity_cert(
    cn: &str,
    verifying_key: &VerifyingKey,
    issuer_name: &Name,
    issuer_key: &SigningKey,
    time_stamping: bool,
) -> Vec<u8> {
    let subject = build_name(cn);
    let spki = spki_for(verifying_key);

    let eku: rasn_pkix::ExtKeyUsageSyntax = if time_stamping {
        vec![oids::oid(oids::EKU_TIME_STAMPING)]
    } else {
        vec![ObjectIdentifier::new_unchecked(EKU_EMAIL_PROTECTION.into())]
    };

    let exts = vec![
        Extension {
            extn_id: ObjectIdentifier::new_unchecked(BASIC_CONSTRAINTS.into()),
            critical: true,
            // Minimal DER for cA=FALSE; the derive encoding omits the
            // default BOOLEAN, which strict validators reject.
            extn_value: OctetString::from(vec![0x30, 0x03, 0x01, 0x01, 0x00]),
        },
        Extension {
            extn_id: ObjectIdentifier::new_unchecked(KEY_USAGE.into()),
            critical: true,
            // digitalSignature (0)
            extn_value: OctetString::from(
                rasn::der::encode(&BitString::from_slice(&[0x80])).unwrap(),
            ),
        },
        Extension {
            extn_id: ObjectIdentifier::new_unchecked(EXT_KEY_USAGE.into()),
            // RFC 3161 wants the EKU critical on TSA certificates.
            critical: time_stamping,
            extn_value: OctetString::from(rasn::der::encode(&eku).unwrap()),
        },
        subject_key_identifier(&spki),
    ];

    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: serial_number(),
        signature: ed25519_algorithm(),
        issuer: issuer_name.clone(),
        validity: validity(),
        subject,
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: Some(Extensions::from(exts)),
    };

    sign_tbs(tbs, issuer_key)
}
