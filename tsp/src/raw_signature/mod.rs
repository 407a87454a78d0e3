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

//! The narrow boundary to asymmetric-key primitives.
//!
//! Token issuance consumes a [`RawSigner`]; verification resolves a
//! [`RawSignatureValidator`] from the signature and digest algorithm
//! identifiers found on the wire. Neither side of the boundary knows
//! anything about CMS or RFC 3161.

use thiserror::Error;

mod signers;
pub use signers::{EcdsaSigner, Ed25519Signer};

mod validators;
pub(crate) use validators::signing_alg_for_oid;
pub use validators::validator_for_signing_alg;

/// An implementation of `RawSigner` generates a cryptographic signature
/// over an arbitrary byte array.
pub trait RawSigner {
    /// Return a raw signature over the original byte slice.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError>;

    /// Return the algorithm implemented by this signer.
    fn alg(&self) -> SigningAlg;
}

/// An implementation of `RawSignatureValidator` checks a signature encoded
/// using a specific signature algorithm against a public key.
///
/// The signature is always embedded in a wrapper (a CMS signer info or an
/// X.509 certificate); validators see only the raw bytes.
pub trait RawSignatureValidator {
    /// Return `Ok(())` if `sig` is valid for the content `data` and the
    /// DER-encoded SubjectPublicKeyInfo `public_key`.
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError>;
}

/// The signature algorithms this crate can produce or check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SigningAlg {
    /// ECDSA with SHA-256.
    Es256,

    /// ECDSA with SHA-384.
    Es384,

    /// Edwards curve 25519 (pure EdDSA).
    Ed25519,

    /// RSA PKCS#1 v1.5 with SHA-256 (verification only).
    Rsa256,

    /// RSA PKCS#1 v1.5 with SHA-384 (verification only).
    Rsa384,

    /// RSA PKCS#1 v1.5 with SHA-512 (verification only).
    Rsa512,
}

impl std::fmt::Display for SigningAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Es256 => write!(f, "es256"),
            Self::Es384 => write!(f, "es384"),
            Self::Ed25519 => write!(f, "ed25519"),
            Self::Rsa256 => write!(f, "rsa256"),
            Self::Rsa384 => write!(f, "rsa384"),
            Self::Rsa512 => write!(f, "rsa512"),
        }
    }
}

/// Describes errors that can be identified when generating a raw signature.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignerError {
    /// The public/private key material was unusable.
    #[error("invalid signing credentials ({0})")]
    InvalidSigningCredentials(String),

    /// An unexpected internal error occurred while signing.
    #[error("internal error ({0})")]
    InternalError(String),
}

/// Describes errors that can be identified when validating a raw signature.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignatureValidationError {
    /// The signature does not match the provided data or public key.
    #[error("the signature does not match the provided data or public key")]
    SignatureMismatch,

    /// An invalid public key was provided.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// An invalid signature value was provided.
    #[error("invalid signature value")]
    InvalidSignature,

    /// The signature uses an unsupported algorithm.
    #[error("signature uses an unsupported algorithm")]
    UnsupportedAlgorithm,
}
