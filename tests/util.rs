#![allow(dead_code)]

use selfcert::KeyAndCert;
use selfcert::cert::Certificate;
use selfcert::options::{SubjectAltName, SubjectAltNameType};

pub fn parse(key_and_cert: &KeyAndCert) -> Certificate {
    Certificate::from_pem(&key_and_cert.certificate).expect("certificate PEM should parse")
}

pub fn check_outputs_present(key_and_cert: &KeyAndCert) {
    assert!(!key_and_cert.private_key.is_empty());
    assert!(!key_and_cert.public_key.is_empty());
    assert!(!key_and_cert.certificate.is_empty());
    assert!(!key_and_cert.fingerprint.is_empty());
}

pub fn check_has_common_name(key_and_cert: &KeyAndCert, expected: &str) {
    let common_name = parse(key_and_cert).subject_common_name().unwrap();
    assert_eq!(common_name.as_deref(), Some(expected));
}

pub fn check_has_no_common_name(key_and_cert: &KeyAndCert) {
    assert_eq!(parse(key_and_cert).subject_common_name().unwrap(), None);
}

pub fn check_has_subject_alt_name(
    key_and_cert: &KeyAndCert,
    expected_type: SubjectAltNameType,
    expected_name: &str,
) {
    let alt_names = parse(key_and_cert).subject_alt_names().unwrap();
    assert!(
        alt_names.contains(&SubjectAltName::new(expected_type, expected_name)),
        "{expected_name} not found in {alt_names:?}"
    );
}
