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

use thiserror::Error;

/// Describes protocol and validation failures when building, issuing, or
/// verifying an [RFC 3161] time stamp.
///
/// These are local-protocol-semantics failures: the data is reachable but
/// violates TSP rules. Trust-chain failures are reported separately via
/// [`CertificateValidationError`] so callers can distinguish protocol
/// misuse from an untrusted signer.
///
/// [RFC 3161]: https://www.ietf.org/rfc/rfc3161.txt
#[derive(Debug, Error)]
pub enum TimeStampError {
    /// A mandatory field was not set before the operation that needs it.
    #[error("mandatory field missing: {0}")]
    MissingField(&'static str),

    /// The digest algorithm name or OID is not recognized.
    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The policy identifier is not a syntactically valid dotted OID.
    #[error("invalid policy identifier: {0}")]
    InvalidPolicy(String),

    /// The request's imprint algorithm is not permitted by the issuing
    /// factory's allowed-digest restriction.
    #[error("digest algorithm not allowed by this authority")]
    DigestNotAllowed,

    /// The time stamp service did not echo the nonce from the request.
    #[error("nonce mismatch")]
    NonceMismatch,

    /// The token's message imprint does not match the request.
    #[error("message imprint does not match request")]
    ImprintMismatch,

    /// The token's imprint digest algorithm does not match the request.
    #[error("imprint digest algorithm does not match request")]
    AlgorithmMismatch,

    /// The token's signed container embeds no signer certificate and none
    /// was supplied out of band.
    #[error("no signer certificate in token and none supplied")]
    MissingSignerCertificate,

    /// The signer certificate's extended key usage does not include the
    /// time-stamping purpose.
    #[error("signer certificate not valid for time stamping (wrong purpose)")]
    WrongPurpose,

    /// The token's signed content is not internally consistent (missing or
    /// mismatched digest attributes, absent content).
    #[error("time stamp does not match its signed content")]
    InvalidData,

    /// An error was encountered while decoding a wire structure.
    #[error("decode error ({0})")]
    DecodeError(String),

    /// An error was encountered while encoding a wire structure.
    #[error("encode error ({0})")]
    EncodeError(String),

    /// The configured signer failed to produce a signature.
    #[error("signer error ({0})")]
    SignerError(String),

    /// An unexpected internal error occurred.
    #[error("internal error ({0})")]
    InternalError(String),
}

/// Describes failures to build or trust the signer's certificate chain.
///
/// Always raised instead of [`TimeStampError`] for pure trust failures,
/// even when the root cause is "wrong certificate supplied".
#[derive(Debug, Error)]
pub enum CertificateValidationError {
    /// No path from the signer certificate to a supplied trust anchor
    /// could be built and verified.
    #[error("certificate chain does not lead to a trust anchor")]
    CertificateNotTrusted,

    /// A certificate in the chain could not be parsed or used.
    #[error("invalid certificate")]
    InvalidCertificate,

    /// A chain certificate was outside its validity window at the stated
    /// signing time.
    #[error("certificate not valid at signing time")]
    CertificateExpired,

    /// A chain or container signature uses an algorithm with no available
    /// validator.
    #[error("unsupported signature algorithm in chain")]
    UnsupportedAlgorithm,

    /// The signed container's signature does not verify against the signer
    /// certificate.
    #[error("signed container signature does not verify")]
    SignatureMismatch,
}

/// The error type for timestamp verification.
///
/// Exactly three kinds, never conflated: argument misuse rejected before
/// any protocol logic runs, protocol/validation failures, and trust-chain
/// failures.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was unusable: an empty trust anchor set, or a trust
    /// source that could not be normalized into certificates.
    #[error("invalid argument: {0}")]
    BadArgument(String),

    /// A protocol or validation failure.
    #[error(transparent)]
    TimeStamp(#[from] TimeStampError),

    /// A trust-chain failure.
    #[error(transparent)]
    CertificateValidation(#[from] CertificateValidationError),
}
