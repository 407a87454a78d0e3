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

use chrono::{DateTime, Timelike, Utc};
use rasn::types::{Any, Integer, ObjectIdentifier, OctetString};
use rasn_pkix::{Certificate, Time};

use crate::{
    asn1::{
        rfc3161::{Accuracy, MessageImprint, PkiStatusInfo, TimeStampResp, TstInfo},
        rfc5652::{
            Attribute, ContentInfo, EncapsulatedContentInfo, IssuerAndSerialNumber, SignedData,
            SignerIdentifier, SignerInfo,
        },
        set_of,
    },
    digest::DigestAlgorithm,
    error::TimeStampError,
    oids::{self, oid},
    raw_signature::{RawSigner, SigningAlg},
    request::TimestampRequest,
    token::{PkiStatus, TimestampToken},
};

/// TSTInfo version this crate issues (RFC 3161 v1).
const VERSION: u8 = 1;

/// CMS SignedData version when certificates of the v3 profile may be
/// present (RFC 5652 §5.1).
const SIGNED_DATA_VERSION: u8 = 3;

/// CMS SignerInfo version for issuer-and-serial signer identification.
const SIGNER_INFO_VERSION: u8 = 1;

/// Reusable issuer configuration: the TSA role.
///
/// `gen_time` and `serial_number` have no implicit defaults; both must be
/// set before issuance, and a real deployment assigns a unique serial per
/// token. Each [`create_timestamp`](Self::create_timestamp) call is
/// independent; the factory can issue any number of tokens.
#[derive(Clone, Debug, Default)]
pub struct ResponseFactory {
    gen_time: Option<DateTime<Utc>>,
    serial_number: Option<Integer>,
    default_policy_id: Option<ObjectIdentifier>,
    additional_certs: Vec<Vec<u8>>,
    accuracy: Option<Accuracy>,
    allowed_digests: Option<Vec<DigestAlgorithm>>,
}

impl ResponseFactory {
    /// Create an unconfigured factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time the next issued token asserts. Sub-second precision is
    /// dropped; GeneralizedTime on the wire carries whole seconds.
    pub fn set_gen_time(&mut self, gen_time: DateTime<Utc>) {
        self.gen_time = Some(gen_time.with_nanosecond(0).unwrap_or(gen_time));
    }

    /// Set the serial number for the next issued token.
    pub fn set_serial_number(&mut self, serial: impl Into<Integer>) {
        self.serial_number = Some(serial.into());
    }

    /// Set the policy used when a request names none.
    pub fn set_default_policy_id(&mut self, policy: &str) -> Result<(), TimeStampError> {
        self.default_policy_id = Some(crate::request::parse_policy_oid(policy)?);
        Ok(())
    }

    /// Bundle an extra certificate (DER) alongside the signer certificate
    /// when certificate inclusion is requested. Typically the intermediate
    /// CA chain.
    pub fn add_additional_cert(&mut self, cert_der: impl Into<Vec<u8>>) {
        self.additional_certs.push(cert_der.into());
    }

    /// Replace the additional certificate list.
    pub fn set_additional_certs(&mut self, certs_der: Vec<Vec<u8>>) {
        self.additional_certs = certs_der;
    }

    /// Declare the clock accuracy embedded in issued tokens.
    pub fn set_accuracy(
        &mut self,
        seconds: Option<u64>,
        millis: Option<u16>,
        micros: Option<u16>,
    ) {
        self.accuracy = Some(Accuracy {
            seconds,
            millis,
            micros,
        });
    }

    /// Restrict the imprint digest algorithms this authority will sign
    /// for. Unrestricted when never set.
    pub fn set_allowed_digests(&mut self, digests: Vec<DigestAlgorithm>) {
        self.allowed_digests = Some(digests);
    }

    /// Issue a GRANTED time-stamp token for `request`, signed with
    /// `signer` and identified by `signer_cert_der`.
    ///
    /// Issuance is all-or-nothing: any unmet precondition fails with
    /// [`TimeStampError`] and no token of any status is produced.
    pub fn create_timestamp(
        &self,
        signer: &dyn RawSigner,
        signer_cert_der: &[u8],
        request: &TimestampRequest,
    ) -> Result<TimestampToken, TimeStampError> {
        let hash_algorithm = request
            .hash_algorithm()
            .ok_or(TimeStampError::MissingField("hash_algorithm"))?;

        let message_imprint = request
            .message_imprint()
            .ok_or(TimeStampError::MissingField("message_imprint"))?;

        let gen_time = self
            .gen_time
            .ok_or(TimeStampError::MissingField("gen_time"))?;

        let serial_number = self
            .serial_number
            .clone()
            .ok_or(TimeStampError::MissingField("serial_number"))?;

        // The request's own policy always wins over the factory default.
        let policy = request
            .policy_oid()
            .or(self.default_policy_id.as_ref())
            .cloned()
            .ok_or(TimeStampError::MissingField("policy_id"))?;

        if let Some(allowed) = &self.allowed_digests {
            if !allowed.contains(&hash_algorithm) {
                return Err(TimeStampError::DigestNotAllowed);
            }
        }

        let signer_cert: Certificate = rasn::der::decode(signer_cert_der)
            .map_err(|e| TimeStampError::DecodeError(format!("signing certificate: {e}")))?;

        let tst_info = TstInfo {
            version: VERSION,
            policy,
            message_imprint: MessageImprint {
                hash_algorithm: hash_algorithm.algorithm_identifier(),
                hashed_message: OctetString::from(message_imprint.to_vec()),
            },
            serial_number,
            gen_time: gen_time.fixed_offset(),
            accuracy: self.accuracy,
            ordering: false,
            nonce: request.nonce().cloned(),
            tsa: None,
            extensions: None,
        };

        let tst_info_der = rasn::der::encode(&tst_info)
            .map_err(|e| TimeStampError::EncodeError(e.to_string()))?;

        let signed_data = sign_content(
            signer,
            &signer_cert,
            &tst_info_der,
            gen_time,
            self.embedded_certificates(request, &signer_cert)?,
        )?;

        log::debug!(
            "issued time stamp token, serial {:?}, gen time {gen_time}",
            tst_info.serial_number
        );

        let resp = TimeStampResp {
            status: PkiStatusInfo {
                status: PkiStatus::Granted as u8,
                status_string: None,
                fail_info: None,
            },
            time_stamp_token: Some(ContentInfo {
                content_type: oid(oids::ID_SIGNED_DATA),
                content: signed_data,
            }),
        };

        TimestampToken::from_resp(resp)
    }

    /// The certificate set to embed: the signer certificate plus any
    /// configured extras when requested, nothing otherwise.
    fn embedded_certificates(
        &self,
        request: &TimestampRequest,
        signer_cert: &Certificate,
    ) -> Result<Option<Vec<Certificate>>, TimeStampError> {
        if !request.cert_requested() {
            return Ok(None);
        }

        let mut certs = vec![signer_cert.clone()];

        for der in &self.additional_certs {
            let cert: Certificate = rasn::der::decode(der)
                .map_err(|e| TimeStampError::DecodeError(format!("additional certificate: {e}")))?;
            certs.push(cert);
        }

        Ok(Some(certs))
    }
}

/// Wrap DER content in a one-signer CMS SignedData with content-type,
/// signing-time, and message-digest signed attributes.
fn sign_content(
    signer: &dyn RawSigner,
    signer_cert: &Certificate,
    content_der: &[u8],
    signing_time: DateTime<Utc>,
    certificates: Option<Vec<Certificate>>,
) -> Result<SignedData, TimeStampError> {
    let digest_alg = attribute_digest_for(signer.alg());

    let signed_attrs = set_of(vec![
        attribute(
            oids::ID_CONTENT_TYPE,
            &oid(oids::ID_CT_TST_INFO),
        )?,
        attribute(oids::ID_SIGNING_TIME, &Time::Utc(signing_time))?,
        attribute(
            oids::ID_MESSAGE_DIGEST,
            &OctetString::from(digest_alg.digest(content_der)),
        )?,
    ]);

    // The signature covers the signed attributes re-encoded as a plain
    // SET OF, not the [0]-tagged form they take inside SignerInfo.
    let signed_attrs_der = rasn::der::encode(&signed_attrs)
        .map_err(|e| TimeStampError::EncodeError(e.to_string()))?;

    let signature = signer
        .sign(&signed_attrs_der)
        .map_err(|e| TimeStampError::SignerError(e.to_string()))?;

    let signer_info = SignerInfo {
        version: SIGNER_INFO_VERSION,
        sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
            issuer: signer_cert.tbs_certificate.issuer.clone(),
            serial_number: signer_cert.tbs_certificate.serial_number.clone(),
        }),
        digest_algorithm: digest_alg.algorithm_identifier(),
        signed_attrs: Some(signed_attrs),
        signature_algorithm: signature_algorithm_identifier(signer.alg()),
        signature: OctetString::from(signature),
        unsigned_attrs: None,
    };

    Ok(SignedData {
        version: SIGNED_DATA_VERSION,
        digest_algorithms: set_of(vec![digest_alg.algorithm_identifier()]),
        encap_content_info: EncapsulatedContentInfo {
            content_type: oid(oids::ID_CT_TST_INFO),
            content: Some(OctetString::from(content_der.to_vec())),
        },
        certificates: certificates.map(set_of),
        signer_infos: set_of(vec![signer_info]),
    })
}

/// Build a single-valued CMS attribute.
fn attribute<T: rasn::Encode>(
    attr_type: &'static [u32],
    value: &T,
) -> Result<Attribute, TimeStampError> {
    let value_der =
        rasn::der::encode(value).map_err(|e| TimeStampError::EncodeError(e.to_string()))?;

    Ok(Attribute {
        r#type: oid(attr_type),
        values: set_of(vec![Any::new(value_der)]),
    })
}

/// The digest used for the message-digest signed attribute. Ed25519
/// pairs with SHA-512 per RFC 8419; the others carry their own digest.
fn attribute_digest_for(alg: SigningAlg) -> DigestAlgorithm {
    match alg {
        SigningAlg::Ed25519 => DigestAlgorithm::Sha512,
        SigningAlg::Es256 | SigningAlg::Rsa256 => DigestAlgorithm::Sha256,
        SigningAlg::Es384 | SigningAlg::Rsa384 => DigestAlgorithm::Sha384,
        SigningAlg::Rsa512 => DigestAlgorithm::Sha512,
    }
}

fn signature_algorithm_identifier(alg: SigningAlg) -> rasn_pkix::AlgorithmIdentifier {
    let arcs = match alg {
        SigningAlg::Ed25519 => oids::ED25519,
        SigningAlg::Es256 => oids::ECDSA_WITH_SHA256,
        SigningAlg::Es384 => oids::ECDSA_WITH_SHA384,
        SigningAlg::Rsa256 => oids::SHA256_WITH_RSA,
        SigningAlg::Rsa384 => oids::SHA384_WITH_RSA,
        SigningAlg::Rsa512 => oids::SHA512_WITH_RSA,
    };

    rasn_pkix::AlgorithmIdentifier {
        algorithm: oid(arcs),
        parameters: None,
    }
}
