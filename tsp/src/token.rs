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

use chrono::{DateTime, Utc};
use rasn::types::Integer;
use rasn_pkix::Certificate;

use crate::{
    asn1::{
        rfc3161::{TimeStampResp, TstInfo},
        rfc5652::{SignedData, SignerIdentifier, SignerInfo},
    },
    digest::DigestAlgorithm,
    error::TimeStampError,
    oids::{self, oid_is, oid_to_string},
};

/// Status of a time-stamp response (RFC 3161 PKIStatus).
///
/// The integer values are part of the protocol and must not be renumbered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PkiStatus {
    /// A token is present, exactly as requested.
    Granted = 0,

    /// A token is present, with modifications.
    GrantedWithMods = 1,

    /// The request was rejected.
    Rejection = 2,

    /// The request is queued; no token yet.
    Waiting = 3,

    /// Warning that a revocation is imminent.
    RevocationWarning = 4,

    /// Notification that a revocation has occurred.
    RevocationNotification = 5,
}

impl TryFrom<u8> for PkiStatus {
    type Error = TimeStampError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Granted),
            1 => Ok(Self::GrantedWithMods),
            2 => Ok(Self::Rejection),
            3 => Ok(Self::Waiting),
            4 => Ok(Self::RevocationWarning),
            5 => Ok(Self::RevocationNotification),
            _ => Err(TimeStampError::DecodeError(format!(
                "unknown PKIStatus value {value}"
            ))),
        }
    }
}

/// Reason a time-stamp request was rejected (RFC 3161 PKIFailureInfo).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PkiFailureInfo {
    /// Unrecognized or unsupported algorithm identifier.
    BadAlg,

    /// Transaction not permitted or supported.
    BadRequest,

    /// The data submitted has the wrong format.
    BadDataFormat,

    /// The TSA's time source is not available.
    TimeNotAvailable,

    /// The requested TSA policy is not supported.
    UnacceptedPolicy,

    /// The requested extension is not supported.
    UnacceptedExtension,

    /// The additional information requested is not available.
    AddInfoNotAvailable,

    /// The request cannot be handled due to system failure.
    SystemFailure,
}

impl PkiFailureInfo {
    /// Map a PKIFailureInfo bit position to its meaning.
    fn from_bit(bit: usize) -> Option<Self> {
        match bit {
            0 => Some(Self::BadAlg),
            2 => Some(Self::BadRequest),
            5 => Some(Self::BadDataFormat),
            14 => Some(Self::TimeNotAvailable),
            15 => Some(Self::UnacceptedPolicy),
            16 => Some(Self::UnacceptedExtension),
            17 => Some(Self::AddInfoNotAvailable),
            25 => Some(Self::SystemFailure),
            _ => None,
        }
    }
}

/// A parsed time-stamp response: status diagnostics plus, when a token is
/// present, the signed TSTInfo content and its backing signed-data
/// container.
///
/// A token does not own the request it answers; keep both and pass both to
/// [`verify_timestamp_token`](crate::verify_timestamp_token).
#[derive(Clone, Debug)]
pub struct TimestampToken {
    status: PkiStatus,
    status_text: Vec<String>,
    failure_info: Option<PkiFailureInfo>,
    info: Option<TstInfo>,
    resp: TimeStampResp,
}

impl TimestampToken {
    /// Parse a token from the DER `TimeStampResp` wire form.
    pub fn from_der(data: &[u8]) -> Result<Self, TimeStampError> {
        let resp: TimeStampResp =
            rasn::der::decode(data).map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

        Self::from_resp(resp)
    }

    /// Build a token from an already-decoded response structure.
    pub fn from_resp(resp: TimeStampResp) -> Result<Self, TimeStampError> {
        let status = PkiStatus::try_from(resp.status.status)?;

        let status_text = resp.status.status_string.clone().unwrap_or_default();

        let failure_info = resp
            .status
            .fail_info
            .as_ref()
            .and_then(|bits| bits.first_one())
            .and_then(PkiFailureInfo::from_bit);

        let info = match &resp.time_stamp_token {
            Some(token) => {
                if !oid_is(&token.content_type, oids::ID_SIGNED_DATA) {
                    return Err(TimeStampError::DecodeError(
                        "time stamp token is not signed data".to_string(),
                    ));
                }

                Some(tst_info_from_signed_data(&token.content)?)
            }
            None => None,
        };

        // A granted response carries a token; its mandatory fields are
        // enforced by the TSTInfo decode above.
        if matches!(status, PkiStatus::Granted | PkiStatus::GrantedWithMods) && info.is_none() {
            return Err(TimeStampError::DecodeError(
                "granted response has no time stamp token".to_string(),
            ));
        }

        Ok(Self {
            status,
            status_text,
            failure_info,
            info,
            resp,
        })
    }

    /// Serialize the full response back to DER.
    pub fn to_der(&self) -> Result<Vec<u8>, TimeStampError> {
        rasn::der::encode(&self.resp).map_err(|e| TimeStampError::EncodeError(e.to_string()))
    }

    /// The response status.
    pub fn status(&self) -> PkiStatus {
        self.status
    }

    /// Return `true` if the request was successful.
    pub fn is_granted(&self) -> bool {
        matches!(
            self.status,
            PkiStatus::Granted | PkiStatus::GrantedWithMods
        )
    }

    /// Free-text diagnostics from the TSA; empty on granted responses.
    pub fn status_text(&self) -> &[String] {
        &self.status_text
    }

    /// Failure reason on rejected responses.
    pub fn failure_info(&self) -> Option<PkiFailureInfo> {
        self.failure_info
    }

    /// The TSTInfo version, when a token is present.
    pub fn version(&self) -> Option<u8> {
        self.info.as_ref().map(|info| info.version)
    }

    /// The policy the token was issued under, in dotted-decimal form.
    pub fn policy_id(&self) -> Option<String> {
        self.info.as_ref().map(|info| oid_to_string(&info.policy))
    }

    /// The imprint digest algorithm, when recognized.
    pub fn hash_algorithm(&self) -> Option<DigestAlgorithm> {
        self.info
            .as_ref()
            .and_then(|info| DigestAlgorithm::from_oid(&info.message_imprint.hash_algorithm.algorithm))
    }

    /// The echoed message imprint bytes.
    pub fn message_imprint(&self) -> Option<&[u8]> {
        self.info
            .as_ref()
            .map(|info| info.message_imprint.hashed_message.as_ref())
    }

    /// The token serial number.
    pub fn serial_number(&self) -> Option<&Integer> {
        self.info.as_ref().map(|info| &info.serial_number)
    }

    /// The time the token asserts.
    pub fn gen_time(&self) -> Option<DateTime<Utc>> {
        self.info
            .as_ref()
            .map(|info| info.gen_time.with_timezone(&Utc))
    }

    /// The ordering flag (false when absent).
    pub fn ordering(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.ordering)
    }

    /// The echoed nonce, when the request carried one.
    pub fn nonce(&self) -> Option<&Integer> {
        self.info.as_ref().and_then(|info| info.nonce.as_ref())
    }

    /// The decoded TSTInfo content, when a token is present.
    pub fn tst_info(&self) -> Option<&TstInfo> {
        self.info.as_ref()
    }

    /// The signed-data container backing the token.
    pub fn signed_data(&self) -> Option<&SignedData> {
        self.resp
            .time_stamp_token
            .as_ref()
            .map(|token| &token.content)
    }

    /// The signer's certificate in DER form, if the TSA embedded it.
    pub fn tsa_certificate(&self) -> Result<Option<Vec<u8>>, TimeStampError> {
        let Some(sd) = self.signed_data() else {
            return Ok(None);
        };

        match embedded_signer_certificate(sd)? {
            Some(cert) => {
                let der = rasn::der::encode(&cert)
                    .map_err(|e| TimeStampError::EncodeError(e.to_string()))?;
                Ok(Some(der))
            }
            None => Ok(None),
        }
    }

    /// All certificates embedded in the signed container, in DER form.
    pub fn certificates(&self) -> Result<Vec<Vec<u8>>, TimeStampError> {
        let Some(sd) = self.signed_data() else {
            return Ok(Vec::new());
        };

        let Some(certs) = &sd.certificates else {
            return Ok(Vec::new());
        };

        certs
            .to_vec()
            .into_iter()
            .map(|cert| {
                rasn::der::encode(cert).map_err(|e| TimeStampError::EncodeError(e.to_string()))
            })
            .collect()
    }
}

/// Extract and decode the TSTInfo content of a signed-data container.
pub(crate) fn tst_info_from_signed_data(sd: &SignedData) -> Result<TstInfo, TimeStampError> {
    if !oid_is(&sd.encap_content_info.content_type, oids::ID_CT_TST_INFO) {
        return Err(TimeStampError::DecodeError(
            "signed content is not TSTInfo".to_string(),
        ));
    }

    let content = sd
        .encap_content_info
        .content
        .as_ref()
        .ok_or_else(|| TimeStampError::DecodeError("signed content is absent".to_string()))?;

    rasn::der::decode(content.as_ref()).map_err(|e| TimeStampError::DecodeError(e.to_string()))
}

/// The container's signer info. RFC 3161 tokens have exactly one.
pub(crate) fn signer_info(sd: &SignedData) -> Result<&SignerInfo, TimeStampError> {
    sd.signer_infos
        .to_vec()
        .into_iter()
        .next()
        .ok_or_else(|| TimeStampError::DecodeError("signed data has no signer info".to_string()))
}

/// Find the certificate embedded in `sd` that matches its signer info, if
/// any certificates are embedded at all.
pub(crate) fn embedded_signer_certificate(
    sd: &SignedData,
) -> Result<Option<Certificate>, TimeStampError> {
    let si = signer_info(sd)?;

    let Some(certs) = &sd.certificates else {
        return Ok(None);
    };

    Ok(find_certificate_for_signer(si, certs.to_vec()))
}

/// Match a signer identifier against a list of candidate certificates.
pub(crate) fn find_certificate_for_signer(
    si: &SignerInfo,
    candidates: Vec<&Certificate>,
) -> Option<Certificate> {
    candidates
        .into_iter()
        .find(|cert| certificate_matches_signer(si, cert))
        .cloned()
}

fn certificate_matches_signer(si: &SignerInfo, cert: &Certificate) -> bool {
    match &si.sid {
        SignerIdentifier::IssuerAndSerialNumber(isn) => {
            isn.issuer == cert.tbs_certificate.issuer
                && isn.serial_number == cert.tbs_certificate.serial_number
        }

        SignerIdentifier::SubjectKeyIdentifier(ski) => {
            let Some(extensions) = &cert.tbs_certificate.extensions else {
                return false;
            };

            extensions.iter().any(|ext| {
                // id-ce-subjectKeyIdentifier (2.5.29.14)
                oid_is(&ext.extn_id, &[2, 5, 29, 14])
                    && rasn::der::decode::<rasn::types::OctetString>(ext.extn_value.as_ref())
                        .map(|value| value == *ski)
                        .unwrap_or(false)
            })
        }
    }
}
