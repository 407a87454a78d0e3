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

use x509_parser::prelude::*;

use crate::{
    asn1::rfc5652::{Attribute, SignedData},
    digest::DigestAlgorithm,
    error::{CertificateValidationError, Error, TimeStampError},
    oids::{self, oid_is, oid_to_string},
    raw_signature::{signing_alg_for_oid, validator_for_signing_alg, RawSignatureValidationError},
    request::TimestampRequest,
    token::{self, TimestampToken},
    trust::CertificateSet,
};

/// Longest issuer path we will walk before declaring the chain unbuildable.
const MAX_CHAIN_DEPTH: usize = 8;

/// Verify a received time-stamp token against the originating request and
/// a set of trust anchors.
///
/// `trusted` must be non-empty; its members are the only acceptable chain
/// roots. `untrusted` may carry additional certificates usable to complete
/// the chain (intermediates, or the signer certificate itself when the
/// token embeds none); redundant entries are harmless.
///
/// Verification is boolean-by-exception: `Ok(())` means every check
/// passed, and every failure raises one of the three [`Error`] kinds.
/// The call mutates nothing and can be repeated with the same outcome.
pub fn verify_timestamp_token(
    token: &TimestampToken,
    request: &TimestampRequest,
    trusted: &CertificateSet,
    untrusted: &CertificateSet,
) -> Result<(), Error> {
    // An explicit trust source is non-negotiable; reject before any
    // protocol logic.
    if trusted.is_empty() {
        return Err(Error::BadArgument("trust anchor set is empty".to_string()));
    }

    // Replay binding: a request nonce must come back unchanged.
    if let Some(req_nonce) = request.nonce() {
        if token.nonce() != Some(req_nonce) {
            return Err(TimeStampError::NonceMismatch.into());
        }
    }

    // The token must answer this exact request.
    let request_alg = request
        .hash_algorithm()
        .ok_or(TimeStampError::AlgorithmMismatch)?;

    if token.hash_algorithm() != Some(request_alg) {
        return Err(TimeStampError::AlgorithmMismatch.into());
    }

    if token.message_imprint() != request.message_imprint() {
        return Err(TimeStampError::ImprintMismatch.into());
    }

    let sd = token.signed_data().ok_or_else(|| {
        TimeStampError::DecodeError("response contains no time stamp token".to_string())
    })?;

    // Identify the signer: the container's own certificates first, the
    // caller-supplied set second. Without either, the protocol cannot name
    // a signer at all, which is a protocol failure rather than a chain
    // failure.
    let signer_cert = locate_signer_certificate(sd, untrusted)?;

    let signer_cert_der = rasn::der::encode(&signer_cert)
        .map_err(|e| TimeStampError::EncodeError(e.to_string()))?;

    // Container signature over the signed attributes.
    verify_container_signature(sd, &signer_cert_der)?;

    // Chain from the signer through the available certificates (embedded
    // plus supplied) to a trust anchor.
    let gen_time = token
        .gen_time()
        .ok_or_else(|| TimeStampError::DecodeError("token has no gen time".to_string()))?;

    let mut pool: Vec<Vec<u8>> = token.certificates().map_err(Error::TimeStamp)?;
    pool.extend(untrusted.ders().iter().cloned());

    verify_certificate_chain(
        &signer_cert_der,
        &pool,
        trusted.ders(),
        gen_time.timestamp(),
    )?;

    // The signer must be certified for time stamping; a key that chains to
    // a trusted root but serves another purpose is a protocol failure, not
    // a trust failure.
    verify_timestamping_purpose(&signer_cert_der)?;

    log::debug!(
        "time stamp token verified, gen time {gen_time}, imprint {}",
        hex::encode(request.message_imprint().unwrap_or_default())
    );

    Ok(())
}

/// Locate the signer certificate: embedded in the container if possible,
/// otherwise among the caller-supplied certificates.
fn locate_signer_certificate(
    sd: &SignedData,
    untrusted: &CertificateSet,
) -> Result<rasn_pkix::Certificate, Error> {
    if let Some(cert) = token::embedded_signer_certificate(sd).map_err(Error::TimeStamp)? {
        return Ok(cert);
    }

    let si = token::signer_info(sd).map_err(Error::TimeStamp)?;

    let supplied: Vec<rasn_pkix::Certificate> = untrusted
        .ders()
        .iter()
        .filter_map(|der| match rasn::der::decode(der) {
            Ok(cert) => Some(cert),
            Err(e) => {
                log::warn!("skipping undecodable supplied certificate: {e}");
                None
            }
        })
        .collect();

    token::find_certificate_for_signer(si, supplied.iter().collect())
        .ok_or_else(|| TimeStampError::MissingSignerCertificate.into())
}

/// Check the container's internal consistency and its signature against
/// the signer certificate's public key.
fn verify_container_signature(sd: &SignedData, signer_cert_der: &[u8]) -> Result<(), Error> {
    let si = token::signer_info(sd).map_err(Error::TimeStamp)?;

    let content = sd
        .encap_content_info
        .content
        .as_ref()
        .ok_or_else(|| {
            Error::TimeStamp(TimeStampError::DecodeError(
                "signed content is absent".to_string(),
            ))
        })?;

    // Signed attributes are mandatory for TSTInfo content; the signed
    // message digest must match the content actually present.
    let signed_attrs = si
        .signed_attrs
        .as_ref()
        .ok_or(Error::TimeStamp(TimeStampError::InvalidData))?;

    let digest_alg = DigestAlgorithm::from_oid(&si.digest_algorithm.algorithm)
        .ok_or(Error::CertificateValidation(
            CertificateValidationError::UnsupportedAlgorithm,
        ))?;

    let attrs: Vec<&Attribute> = signed_attrs.to_vec();

    let signed_digest = single_attribute_value::<rasn::types::OctetString>(
        &attrs,
        oids::ID_MESSAGE_DIGEST,
    )?;

    if signed_digest.as_ref() != digest_alg.digest(content.as_ref()).as_slice() {
        return Err(TimeStampError::InvalidData.into());
    }

    // The content-type attribute, when present, must name TSTInfo.
    if let Ok(content_type) =
        single_attribute_value::<rasn::types::ObjectIdentifier>(&attrs, oids::ID_CONTENT_TYPE)
    {
        if !oid_is(&content_type, oids::ID_CT_TST_INFO) {
            return Err(TimeStampError::InvalidData.into());
        }
    }

    // The signature covers the signed attributes re-encoded as a plain
    // SET OF.
    let signed_attrs_der = rasn::der::encode(signed_attrs)
        .map_err(|e| TimeStampError::EncodeError(e.to_string()))?;

    let alg = signing_alg_for_oid(
        &oid_to_string(&si.signature_algorithm.algorithm),
        Some(digest_alg),
    )
    .ok_or(Error::CertificateValidation(
        CertificateValidationError::UnsupportedAlgorithm,
    ))?;

    let validator = validator_for_signing_alg(alg).ok_or(Error::CertificateValidation(
        CertificateValidationError::UnsupportedAlgorithm,
    ))?;

    let spki = signer_public_key(signer_cert_der)?;

    validator
        .validate(si.signature.as_ref(), &signed_attrs_der, &spki)
        .map_err(|e| match e {
            RawSignatureValidationError::UnsupportedAlgorithm => {
                CertificateValidationError::UnsupportedAlgorithm
            }
            RawSignatureValidationError::InvalidPublicKey => {
                CertificateValidationError::InvalidCertificate
            }
            _ => CertificateValidationError::SignatureMismatch,
        })?;

    Ok(())
}

/// Extract the single value of a single-valued attribute.
fn single_attribute_value<T: rasn::Decode>(
    attrs: &[&Attribute],
    attr_type: &'static [u32],
) -> Result<T, Error> {
    let attr = attrs
        .iter()
        .find(|attr| oid_is(&attr.r#type, attr_type))
        .ok_or(Error::TimeStamp(TimeStampError::InvalidData))?;

    let values = attr.values.to_vec();

    // Per CMS these attributes carry exactly one value.
    if values.len() != 1 {
        return Err(TimeStampError::InvalidData.into());
    }

    rasn::der::decode(values[0].as_bytes())
        .map_err(|e| TimeStampError::DecodeError(e.to_string()).into())
}

/// The DER SubjectPublicKeyInfo of a certificate.
fn signer_public_key(cert_der: &[u8]) -> Result<Vec<u8>, Error> {
    let (_, cert) = X509Certificate::from_der(cert_der)
        .map_err(|_| CertificateValidationError::InvalidCertificate)?;

    Ok(cert.public_key().raw.to_vec())
}

/// Walk issuer links from the signer certificate to one of the anchors.
///
/// Every certificate on the path must carry a verifiable signature by its
/// issuer and be inside its validity window at the stated signing time.
fn verify_certificate_chain(
    signer_der: &[u8],
    pool: &[Vec<u8>],
    anchors: &[Vec<u8>],
    signing_time_epoch: i64,
) -> Result<(), CertificateValidationError> {
    let mut current = signer_der.to_vec();

    for _ in 0..MAX_CHAIN_DEPTH {
        let (_, cert) = X509Certificate::from_der(&current)
            .map_err(|_| CertificateValidationError::InvalidCertificate)?;

        check_validity_window(&cert, signing_time_epoch)?;

        // Done if a trust anchor issued (and signed) this certificate.
        for anchor_der in anchors {
            let Ok((_, anchor)) = X509Certificate::from_der(anchor_der) else {
                continue;
            };

            if cert.issuer() == anchor.subject() && verify_issuer_link(&cert, &anchor)? {
                check_validity_window(&anchor, signing_time_epoch)?;
                return Ok(());
            }
        }

        // Otherwise advance to an issuer from the available pool.
        let next = pool.iter().find_map(|candidate_der| {
            if *candidate_der == current {
                return None;
            }

            let (_, candidate) = X509Certificate::from_der(candidate_der).ok()?;

            if cert.issuer() == candidate.subject()
                && verify_issuer_link(&cert, &candidate).ok()?
            {
                Some(candidate_der.clone())
            } else {
                None
            }
        });

        match next {
            Some(der) => current = der,
            None => return Err(CertificateValidationError::CertificateNotTrusted),
        }
    }

    Err(CertificateValidationError::CertificateNotTrusted)
}

fn check_validity_window(
    cert: &X509Certificate<'_>,
    signing_time_epoch: i64,
) -> Result<(), CertificateValidationError> {
    let at = x509_parser::time::ASN1Time::from_timestamp(signing_time_epoch)
        .map_err(|_| CertificateValidationError::InvalidCertificate)?;

    if !cert.validity().is_valid_at(at) {
        return Err(CertificateValidationError::CertificateExpired);
    }

    Ok(())
}

/// Check that `issuer` actually signed `child`.
///
/// Returns `Ok(false)` for a candidate whose key does not validate the
/// signature; raises only when the child's own signature algorithm has no
/// validator at all.
fn verify_issuer_link(
    child: &X509Certificate<'_>,
    issuer: &X509Certificate<'_>,
) -> Result<bool, CertificateValidationError> {
    let sig_alg = child.signature_algorithm.algorithm.to_id_string();

    let alg = signing_alg_for_oid(&sig_alg, None)
        .ok_or(CertificateValidationError::UnsupportedAlgorithm)?;

    let validator = validator_for_signing_alg(alg)
        .ok_or(CertificateValidationError::UnsupportedAlgorithm)?;

    match validator.validate(
        child.signature_value.as_ref(),
        child.tbs_certificate.as_ref(),
        issuer.public_key().raw,
    ) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Enforce the time-stamping extended key usage on the signer certificate.
fn verify_timestamping_purpose(signer_cert_der: &[u8]) -> Result<(), Error> {
    let (_, cert) = X509Certificate::from_der(signer_cert_der)
        .map_err(|_| CertificateValidationError::InvalidCertificate)?;

    let Ok(Some(eku)) = cert.extended_key_usage() else {
        return Err(TimeStampError::WrongPurpose.into());
    };

    if !eku.value.time_stamping {
        return Err(TimeStampError::WrongPurpose.into());
    }

    Ok(())
}
