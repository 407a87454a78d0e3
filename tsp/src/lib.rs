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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]

pub mod asn1;
mod digest;
mod error;
mod factory;
pub(crate) mod oids;
pub mod raw_signature;
mod request;
mod token;
mod trust;
mod verify;

pub use digest::DigestAlgorithm;
pub use error::{CertificateValidationError, Error, TimeStampError};
pub use factory::ResponseFactory;
pub use request::TimestampRequest;
pub use token::{PkiFailureInfo, PkiStatus, TimestampToken};
pub use trust::CertificateSet;
pub use verify::verify_timestamp_token;

#[cfg(test)]
pub(crate) mod tests;
