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

//! Built-in signer implementations.

use crate::raw_signature::{RawSigner, RawSignerError, SigningAlg};

/// Implements [`RawSigner`] using the `ed25519_dalek` crate (pure EdDSA).
pub struct Ed25519Signer {
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    /// Create a signer from a PKCS#8 PEM private key.
    pub fn from_pkcs8_pem(private_key_pem: &str) -> Result<Self, RawSignerError> {
        use ed25519_dalek::pkcs8::DecodePrivateKey;

        let signing_key = ed25519_dalek::SigningKey::from_pkcs8_pem(private_key_pem)
            .map_err(|e| RawSignerError::InvalidSigningCredentials(e.to_string()))?;

        Ok(Self { signing_key })
    }

    /// Create a signer from an in-memory signing key.
    pub fn from_signing_key(signing_key: ed25519_dalek::SigningKey) -> Self {
        Self { signing_key }
    }
}

impl RawSigner for Ed25519Signer {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError> {
        use ed25519_dalek::Signer;

        Ok(self
            .signing_key
            .try_sign(data)
            .map_err(|e| RawSignerError::InternalError(format!("signature error: {e}")))?
            .to_vec())
    }

    fn alg(&self) -> SigningAlg {
        SigningAlg::Ed25519
    }
}

/// Implements [`RawSigner`] using ECDSA over P-256 with SHA-256. Signatures
/// are emitted in DER form as CMS and X.509 expect.
pub struct EcdsaSigner {
    signing_key: p256::ecdsa::SigningKey,
}

impl EcdsaSigner {
    /// Create a signer from a PKCS#8 PEM private key.
    pub fn from_pkcs8_pem(private_key_pem: &str) -> Result<Self, RawSignerError> {
        use p256::pkcs8::DecodePrivateKey;

        let signing_key = p256::ecdsa::SigningKey::from_pkcs8_pem(private_key_pem)
            .map_err(|e| RawSignerError::InvalidSigningCredentials(e.to_string()))?;

        Ok(Self { signing_key })
    }

    /// Create a signer from an in-memory signing key.
    pub fn from_signing_key(signing_key: p256::ecdsa::SigningKey) -> Self {
        Self { signing_key }
    }
}

impl RawSigner for EcdsaSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError> {
        use p256::ecdsa::{signature::Signer, Signature};

        let signature: Signature = self.signing_key.sign(data);
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn alg(&self) -> SigningAlg {
        SigningAlg::Es256
    }
}
