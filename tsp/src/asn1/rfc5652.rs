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

//! The subset of the CMS signed-data container ([RFC 5652]) a timestamp
//! token needs.
//!
//! The profile is issuer-complete: everything a token this crate mints can
//! contain is representable. On the decode side, `CertificateSet` accepts
//! only the `certificate` alternative of CertificateChoices and the unused
//! `crls` field is not modeled.
//!
//! [RFC 5652]: https://datatracker.ietf.org/doc/html/rfc5652

use rasn::{
    types::{Any, Integer, ObjectIdentifier, OctetString, SetOf},
    AsnType, Decode, Decoder, Encode, Encoder,
};
use rasn_pkix::{AlgorithmIdentifier, Certificate, Name};

/// CMS ContentInfo, profiled to signed-data content.
///
/// ```ASN.1
/// ContentInfo ::= SEQUENCE {
///     contentType ContentType,
///     content [0] EXPLICIT ANY DEFINED BY contentType }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct ContentInfo {
    pub content_type: ObjectIdentifier,

    #[rasn(tag(explicit(0)))]
    pub content: SignedData,
}

/// CMS SignedData.
///
/// ```ASN.1
/// SignedData ::= SEQUENCE {
///     version CMSVersion,
///     digestAlgorithms DigestAlgorithmIdentifiers,
///     encapContentInfo EncapsulatedContentInfo,
///     certificates [0] IMPLICIT CertificateSet OPTIONAL,
///     crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
///     signerInfos SignerInfos }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct SignedData {
    pub version: u8,

    pub digest_algorithms: SetOf<AlgorithmIdentifier>,

    pub encap_content_info: EncapsulatedContentInfo,

    #[rasn(tag(0))]
    pub certificates: Option<SetOf<Certificate>>,

    pub signer_infos: SetOf<SignerInfo>,
}

/// CMS EncapsulatedContentInfo.
///
/// ```ASN.1
/// EncapsulatedContentInfo ::= SEQUENCE {
///     eContentType ContentType,
///     eContent [0] EXPLICIT OCTET STRING OPTIONAL }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct EncapsulatedContentInfo {
    pub content_type: ObjectIdentifier,

    #[rasn(tag(explicit(0)))]
    pub content: Option<OctetString>,
}

/// CMS SignerInfo.
///
/// ```ASN.1
/// SignerInfo ::= SEQUENCE {
///     version CMSVersion,
///     sid SignerIdentifier,
///     digestAlgorithm DigestAlgorithmIdentifier,
///     signedAttrs [0] IMPLICIT SignedAttributes OPTIONAL,
///     signatureAlgorithm SignatureAlgorithmIdentifier,
///     signature SignatureValue,
///     unsignedAttrs [1] IMPLICIT UnsignedAttributes OPTIONAL }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq, Hash)]
pub struct SignerInfo {
    pub version: u8,

    pub sid: SignerIdentifier,

    pub digest_algorithm: AlgorithmIdentifier,

    #[rasn(tag(0))]
    pub signed_attrs: Option<SetOf<Attribute>>,

    pub signature_algorithm: AlgorithmIdentifier,

    pub signature: OctetString,

    #[rasn(tag(1))]
    pub unsigned_attrs: Option<SetOf<Attribute>>,
}

/// CMS SignerIdentifier.
///
/// ```ASN.1
/// SignerIdentifier ::= CHOICE {
///     issuerAndSerialNumber IssuerAndSerialNumber,
///     subjectKeyIdentifier [0] SubjectKeyIdentifier }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq, Hash)]
#[rasn(choice)]
pub enum SignerIdentifier {
    IssuerAndSerialNumber(IssuerAndSerialNumber),

    #[rasn(tag(0))]
    SubjectKeyIdentifier(OctetString),
}

/// CMS IssuerAndSerialNumber.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq, Hash)]
pub struct IssuerAndSerialNumber {
    pub issuer: Name,
    pub serial_number: Integer,
}

/// A CMS attribute: an attribute type and a set of values.
///
/// ```ASN.1
/// Attribute ::= SEQUENCE {
///     attrType OBJECT IDENTIFIER,
///     attrValues SET OF AttributeValue }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub r#type: ObjectIdentifier,
    pub values: SetOf<Any>,
}
