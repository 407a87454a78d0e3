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

//! ASN.1 types defined by [RFC 3161].
//!
//! [RFC 3161]: https://datatracker.ietf.org/doc/html/rfc3161

use rasn::{
    types::{BitString, GeneralizedTime, Integer, ObjectIdentifier, OctetString, SequenceOf},
    AsnType, Decode, Decoder, Encode, Encoder,
};
use rasn_pkix::{AlgorithmIdentifier, Extensions, GeneralName};

use crate::asn1::rfc5652::ContentInfo;

/// A time-stamp request.
///
/// ```ASN.1
/// TimeStampReq ::= SEQUENCE  {
///    version                  INTEGER  { v1(1) },
///    messageImprint           MessageImprint,
///    reqPolicy                TSAPolicyId                OPTIONAL,
///    nonce                    INTEGER                    OPTIONAL,
///    certReq                  BOOLEAN                    DEFAULT FALSE,
///    extensions               [0] IMPLICIT Extensions    OPTIONAL  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct TimeStampReq {
    pub version: u8,

    pub message_imprint: MessageImprint,

    pub req_policy: Option<ObjectIdentifier>,

    pub nonce: Option<Integer>,

    #[rasn(default)]
    pub cert_req: bool,

    #[rasn(tag(0))]
    pub extensions: Option<Extensions>,
}

/// Message imprint: a hash algorithm OID and the hash value of the data to
/// be time-stamped.
///
/// ```ASN.1
/// MessageImprint ::= SEQUENCE  {
///      hashAlgorithm                AlgorithmIdentifier,
///      hashedMessage                OCTET STRING  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct MessageImprint {
    pub hash_algorithm: AlgorithmIdentifier,
    pub hashed_message: OctetString,
}

/// A time-stamp response.
///
/// ```ASN.1
/// TimeStampResp ::= SEQUENCE  {
///      status                  PKIStatusInfo,
///      timeStampToken          TimeStampToken     OPTIONAL  }
/// ```
///
/// `TimeStampToken ::= ContentInfo`, profiled here to a CMS SignedData
/// envelope.
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct TimeStampResp {
    pub status: PkiStatusInfo,
    pub time_stamp_token: Option<ContentInfo>,
}

/// Status of a time-stamp response.
///
/// ```ASN.1
/// PKIStatusInfo ::= SEQUENCE {
///     status        PKIStatus,
///     statusString  PKIFreeText     OPTIONAL,
///     failInfo      PKIFailureInfo  OPTIONAL  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct PkiStatusInfo {
    pub status: u8,
    pub status_string: Option<PkiFreeText>,
    pub fail_info: Option<BitString>,
}

/// `PKIFreeText ::= SEQUENCE SIZE (1..MAX) OF UTF8String`
pub type PkiFreeText = SequenceOf<rasn::types::Utf8String>;

/// Time-stamp token info, the content a TSA actually signs.
///
/// ```ASN.1
/// TSTInfo ::= SEQUENCE  {
///     version                      INTEGER  { v1(1) },
///     policy                       TSAPolicyId,
///     messageImprint               MessageImprint,
///     serialNumber                 INTEGER,
///     genTime                      GeneralizedTime,
///     accuracy                     Accuracy                 OPTIONAL,
///     ordering                     BOOLEAN             DEFAULT FALSE,
///     nonce                        INTEGER                  OPTIONAL,
///     tsa                          [0] GeneralName          OPTIONAL,
///     extensions                   [1] IMPLICIT Extensions  OPTIONAL   }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq, Eq)]
pub struct TstInfo {
    pub version: u8,

    pub policy: ObjectIdentifier,

    pub message_imprint: MessageImprint,

    pub serial_number: Integer,

    pub gen_time: GeneralizedTime,

    pub accuracy: Option<Accuracy>,

    #[rasn(default)]
    pub ordering: bool,

    pub nonce: Option<Integer>,

    // `tsa` is a CHOICE, so its context tag is necessarily explicit.
    #[rasn(tag(explicit(0)))]
    pub tsa: Option<GeneralName>,

    #[rasn(tag(1))]
    pub extensions: Option<Extensions>,
}

/// Accuracy of the TSA's clock.
///
/// ```ASN.1
/// Accuracy ::= SEQUENCE {
///                 seconds        INTEGER           OPTIONAL,
///                 millis     [0] INTEGER  (1..999) OPTIONAL,
///                 micros     [1] INTEGER  (1..999) OPTIONAL  }
/// ```
#[derive(AsnType, Clone, Copy, Debug, Decode, Encode, PartialEq, Eq)]
pub struct Accuracy {
    pub seconds: Option<u64>,

    #[rasn(tag(0))]
    pub millis: Option<u16>,

    #[rasn(tag(1))]
    pub micros: Option<u16>,
}
