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

use std::io::Read;

use x509_parser::{pem::Pem, prelude::*};

use crate::error::Error;

/// Upper bound on a trust-source read; certificate bundles are small.
const MAX_SOURCE_LEN: u64 = 1_000_000;

/// A normalized set of DER-encoded certificates.
///
/// This is the single convergence point for every shape of trust input:
/// a DER certificate, a PEM string, a concatenated PEM bundle, a list of
/// any of those, or a readable byte source. All of them produce the same
/// uniform set before any chain logic runs, for both trust anchors and
/// untrusted chain-completion certificates.
#[derive(Clone, Debug, Default)]
pub struct CertificateSet {
    ders: Vec<Vec<u8>>,
}

impl CertificateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of certificates in the set.
    pub fn len(&self) -> usize {
        self.ders.len()
    }

    /// Return `true` if the set holds no certificates.
    pub fn is_empty(&self) -> bool {
        self.ders.is_empty()
    }

    /// Add one DER-encoded certificate. The input must parse as a
    /// certificate; redundant entries are harmless.
    pub fn push_der(&mut self, der: impl Into<Vec<u8>>) -> Result<(), Error> {
        let der = der.into();

        X509Certificate::from_der(&der)
            .map_err(|e| Error::BadArgument(format!("input is not a certificate: {e}")))?;

        self.ders.push(der);
        Ok(())
    }

    /// Add every CERTIFICATE block of a PEM bundle.
    pub fn push_pem(&mut self, pem: &str) -> Result<(), Error> {
        let mut found = 0usize;

        for block in Pem::iter_from_buffer(pem.as_bytes()) {
            let block = block.map_err(|e| Error::BadArgument(format!("invalid PEM: {e}")))?;
            self.push_der(block.contents)?;
            found += 1;
        }

        if found == 0 {
            return Err(Error::BadArgument(
                "no certificates found in PEM input".to_string(),
            ));
        }

        Ok(())
    }

    /// Build a set from one DER-encoded certificate.
    pub fn from_der(der: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let mut set = Self::new();
        set.push_der(der)?;
        Ok(set)
    }

    /// Build a set from a list of DER-encoded certificates.
    pub fn from_ders<I, D>(ders: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = D>,
        D: Into<Vec<u8>>,
    {
        let mut set = Self::new();
        for der in ders {
            set.push_der(der)?;
        }
        Ok(set)
    }

    /// Build a set from a PEM string or bundle.
    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        let mut set = Self::new();
        set.push_pem(pem)?;
        Ok(set)
    }

    /// Build a set from bytes holding either PEM or a single DER
    /// certificate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let trimmed = bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .map(|start| &bytes[start..])
            .unwrap_or(&[]);

        if trimmed.starts_with(b"-----BEGIN") {
            let text = std::str::from_utf8(trimmed)
                .map_err(|e| Error::BadArgument(format!("invalid PEM encoding: {e}")))?;
            Self::from_pem(text)
        } else {
            Self::from_der(bytes.to_vec())
        }
    }

    /// Build a set from a readable byte source (a file, a socket). The
    /// source is consumed with a single bounded read.
    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let mut bytes = Vec::new();

        reader
            .take(MAX_SOURCE_LEN)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::BadArgument(format!("unreadable certificate source: {e}")))?;

        Self::from_bytes(&bytes)
    }

    /// Iterate the DER encodings in the set.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.ders.iter().map(Vec::as_slice)
    }

    /// Render the set as a concatenated PEM bundle.
    pub fn to_pem(&self) -> String {
        self.ders
            .iter()
            .map(|der| ::pem::Pem::new("CERTIFICATE", der.clone()).to_string())
            .collect()
    }

    pub(crate) fn ders(&self) -> &[Vec<u8>] {
        &self.ders
    }
}

impl TryFrom<&str> for CertificateSet {
    type Error = Error;

    fn try_from(pem: &str) -> Result<Self, Self::Error> {
        Self::from_pem(pem)
    }
}

impl TryFrom<&[u8]> for CertificateSet {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}
