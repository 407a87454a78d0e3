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

use std::io::Cursor;

use crate::{
    error::Error,
    tests::test_utils::{der_to_pem, tsa_chain, unrelated_root_der},
    trust::CertificateSet,
};

#[test]
fn every_input_shape_yields_the_same_set() {
    let root = unrelated_root_der();
    let pem = der_to_pem(&root);

    let from_der = CertificateSet::from_der(root.clone()).unwrap();
    let from_pem = CertificateSet::from_pem(&pem).unwrap();
    let from_bytes_der = CertificateSet::from_bytes(&root).unwrap();
    let from_bytes_pem = CertificateSet::from_bytes(pem.as_bytes()).unwrap();
    let from_reader = CertificateSet::from_reader(Cursor::new(pem.as_bytes())).unwrap();

    for set in [
        &from_der,
        &from_pem,
        &from_bytes_der,
        &from_bytes_pem,
        &from_reader,
    ] {
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(root.as_slice()));
    }
}

#[test]
fn pem_bundles_yield_every_certificate() {
    let chain = tsa_chain();

    let bundle = format!(
        "{}{}",
        der_to_pem(&chain.root_der),
        der_to_pem(&chain.intermediate_der)
    );

    let set = CertificateSet::from_pem(&bundle).unwrap();
    assert_eq!(set.len(), 2);

    // And back out again.
    let round_tripped = CertificateSet::from_pem(&set.to_pem()).unwrap();
    assert_eq!(round_tripped.len(), 2);
}

#[test]
fn list_input_collects_in_order() {
    let chain = tsa_chain();

    let set = CertificateSet::from_ders(vec![
        chain.root_der.clone(),
        chain.intermediate_der.clone(),
        chain.signer_cert_der.clone(),
    ])
    .unwrap();

    assert_eq!(set.len(), 3);
    let ders: Vec<&[u8]> = set.iter().collect();
    assert_eq!(ders[0], chain.root_der.as_slice());
    assert_eq!(ders[2], chain.signer_cert_der.as_slice());
}

#[test]
fn garbage_input_is_rejected_before_any_protocol_logic() {
    assert!(matches!(
        CertificateSet::from_bytes(b"not a certificate"),
        Err(Error::BadArgument(_))
    ));

    assert!(matches!(
        CertificateSet::from_pem("-----BEGIN GARBAGE-----\nzz\n-----END GARBAGE-----\n"),
        Err(Error::BadArgument(_))
    ));

    assert!(matches!(
        CertificateSet::from_pem(""),
        Err(Error::BadArgument(_))
    ));
}
