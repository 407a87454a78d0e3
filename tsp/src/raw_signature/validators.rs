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

//! Built-in signature validators and algorithm-identifier dispatch.

use ed25519_dalek::Verifier;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::{
    digest::DigestAlgorithm,
    raw_signature::{RawSignatureValidationError, RawSignatureValidator, SigningAlg},
};

/// Resolve a signing algorithm from a dotted signature-algorithm OID and,
/// for algorithms that do not pin their own digest (plain `rsaEncryption`),
/// the accompanying digest algorithm.
pub(crate) fn signing_alg_for_oid(
    sig_oid: &str,
    digest_alg: Option<DigestAlgorithm>,
) -> Option<SigningAlg> {
    match sig_oid {
        // ecdsa-with-SHA256 / -SHA384
        "1.2.840.10045.4.3.2" => Some(SigningAlg::Es256),
        "1.2.840.10045.4.3.3" => Some(SigningAlg::Es384),

        // id-Ed25519
        "1.3.101.112" => Some(SigningAlg::Ed25519),

        // sha*WithRSAEncryption
        "1.2.840.113549.1.1.11" => Some(SigningAlg::Rsa256),
        "1.2.840.113549.1.1.12" => Some(SigningAlg::Rsa384),
        "1.2.840.113549.1.1.13" => Some(SigningAlg::Rsa512),

        // plain rsaEncryption: the digest algorithm decides
        "1.2.840.113549.1.1.1" => match digest_alg? {
            DigestAlgorithm::Sha256 => Some(SigningAlg::Rsa256),
            DigestAlgorithm::Sha384 => Some(SigningAlg::Rsa384),
            DigestAlgorithm::Sha512 => Some(SigningAlg::Rsa512),
            DigestAlgorithm::Sha1 => None,
        },

        _ => None,
    }
}

/// Return a built-in signature validator for the requested signing
/// algorithm.
pub fn validator_for_signing_alg(alg: SigningAlg) -> Option<Box<dyn RawSignatureValidator>> {
    match alg {
        SigningAlg::Ed25519 => Some(Box::new(Ed25519Validator {})),
        SigningAlg::Es256 => Some(Box::new(EcdsaValidator::Es256)),
        SigningAlg::Es384 => Some(Box::new(EcdsaValidator::Es384)),
        SigningAlg::Rsa256 => Some(Box::new(RsaLegacyValidator::Rsa256)),
        SigningAlg::Rsa384 => Some(Box::new(RsaLegacyValidator::Rsa384)),
        SigningAlg::Rsa512 => Some(Box::new(RsaLegacyValidator::Rsa512)),
    }
}

/// Validates raw signatures made with Ed25519.
struct Ed25519Validator {}

impl RawSignatureValidator for Ed25519Validator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        use ed25519_dalek::{pkcs8::DecodePublicKey, Signature, VerifyingKey};

        let vk = VerifyingKey::from_public_key_der(public_key)
            .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

        let signature = Signature::from_slice(sig)
            .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

        vk.verify(data, &signature)
            .map_err(|_| RawSignatureValidationError::SignatureMismatch)
    }
}

/// Validates raw signatures made with ECDSA over P-256 or P-384. The curve
/// is taken from the public key; the digest from the enum variant.
enum EcdsaValidator {
    Es256,
    Es384,
}

impl RawSignatureValidator for EcdsaValidator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        use p256::ecdsa::signature::hazmat::PrehashVerifier;

        let digest = match self {
            Self::Es256 => Sha256::digest(data).to_vec(),
            Self::Es384 => Sha384::digest(data).to_vec(),
        };

        // Certificates and CMS carry ECDSA signatures in DER form; accept a
        // fixed-size encoding as a fallback.
        if let Ok(vk) = {
            use p256::pkcs8::DecodePublicKey;
            p256::ecdsa::VerifyingKey::from_public_key_der(public_key)
        } {
            let signature = p256::ecdsa::Signature::from_der(sig)
                .or_else(|_| p256::ecdsa::Signature::from_slice(sig))
                .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

            return vk
                .verify_prehash(&digest, &signature)
                .map_err(|_| RawSignatureValidationError::SignatureMismatch);
        }

        if let Ok(vk) = {
            use p384::pkcs8::DecodePublicKey;
            p384::ecdsa::VerifyingKey::from_public_key_der(public_key)
        } {
            let signature = p384::ecdsa::Signature::from_der(sig)
                .or_else(|_| p384::ecdsa::Signature::from_slice(sig))
                .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

            return vk
                .verify_prehash(&digest, &signature)
                .map_err(|_| RawSignatureValidationError::SignatureMismatch);
        }

        Err(RawSignatureValidationError::InvalidPublicKey)
    }
}

/// Validates raw signatures made with RSA PKCS#1 v1.5, still the norm for
/// deployed TSA certificate chains.
enum RsaLegacyValidator {
    Rsa256,
    Rsa384,
    Rsa512,
}

impl RawSignatureValidator for RsaLegacyValidator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        use rsa::{pkcs1v15::Pkcs1v15Sign, pkcs8::DecodePublicKey, RsaPublicKey};

        let pk = RsaPublicKey::from_public_key_der(public_key)
            .map_err(|_| RawSignatureValidationError::InvalidPublicKey)?;

        let (digest, scheme) = match self {
            Self::Rsa256 => (
                Sha256::digest(data).to_vec(),
                Pkcs1v15Sign::new::<Sha256>(),
            ),
            Self::Rsa384 => (
                Sha384::digest(data).to_vec(),
                Pkcs1v15Sign::new::<Sha384>(),
            ),
            Self::Rsa512 => (
                Sha512::digest(data).to_vec(),
                Pkcs1v15Sign::new::<Sha512>(),
            ),
        };

        pk.verify(scheme, &digest, sig)
            .map_err(|_| RawSignatureValidationError::SignatureMismatch)
    }
}
