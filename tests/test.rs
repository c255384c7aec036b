mod util;

use selfcert::cert::SignatureAlgorithm;
use selfcert::cert::extensions::{BasicConstraints, KeyUsage, SubjectAltNames};
use selfcert::cert::params::AttributeName;
use selfcert::fingerprint::{FINGERPRINT_LEN, fingerprint, fingerprint_pem};
use selfcert::options::{
    DEFAULT_VALIDITY_DAYS, GenerateInput, GenerateOptions, Subject, SubjectAltName,
    SubjectAltNameType, ValidityOptions,
};
use selfcert::{SelfCertError, generate};
use time::Duration;
use time::macros::datetime;

use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;

fn modulus_bits(public_key_pem: &str) -> usize {
    RsaPublicKey::from_public_key_pem(public_key_pem)
        .unwrap()
        .size()
        * 8
}

#[tokio::test]
async fn single_name_sets_common_name_and_dns_alt_name() {
    let key_and_cert = generate("a.example.com").await.unwrap();
    util::check_outputs_present(&key_and_cert);
    util::check_has_common_name(&key_and_cert, "a.example.com");
    util::check_has_subject_alt_name(&key_and_cert, SubjectAltNameType::DnsName, "a.example.com");

    let cert = util::parse(&key_and_cert);
    assert_eq!(
        cert.subject_alt_names().unwrap(),
        vec![SubjectAltName::dns("a.example.com")]
    );
    assert_eq!(modulus_bits(&key_and_cert.public_key), 2048);
    assert_eq!(cert.signature_algorithm().unwrap(), SignatureAlgorithm::Sha256WithRSA);

    let validity = cert.validity();
    assert_eq!(
        validity.not_after - validity.not_before,
        Duration::days(i64::from(DEFAULT_VALIDITY_DAYS))
    );
}

#[tokio::test]
async fn name_list_becomes_dns_alt_names_in_order() {
    let key_and_cert = generate(["a.example.com", "b.example.com", "c.example.com"])
        .await
        .unwrap();
    util::check_outputs_present(&key_and_cert);
    util::check_has_no_common_name(&key_and_cert);
    for name in ["a.example.com", "b.example.com", "c.example.com"] {
        util::check_has_subject_alt_name(&key_and_cert, SubjectAltNameType::DnsName, name);
    }
}

#[tokio::test]
async fn name_list_with_key_size() {
    let input = GenerateInput::from(["a.example.com", "b.example.com", "a.example.com"])
        .with_key_size(1024);
    let key_and_cert = generate(input).await.unwrap();
    util::check_has_no_common_name(&key_and_cert);
    assert_eq!(modulus_bits(&key_and_cert.public_key), 1024);

    let names: Vec<_> = util::parse(&key_and_cert)
        .subject_alt_names()
        .unwrap()
        .into_iter()
        .map(|name| name.value)
        .collect();
    assert_eq!(names, ["a.example.com", "b.example.com", "a.example.com"]);
}

#[tokio::test]
async fn full_option_set() {
    let not_before = datetime!(2018-01-01 12:00:00 UTC);
    let options = GenerateOptions::builder()
        .key_size_in_bits(1024)
        .digest_algorithm("sha1")
        .validity(
            ValidityOptions::builder()
                .not_before(not_before)
                .days(10)
                .build(),
        )
        .subject_alt_names(vec![
            SubjectAltName::dns("a.example.com"),
            SubjectAltName::dns("b.example.com"),
            SubjectAltName::ip("10.20.30.40"),
        ])
        .build();
    let key_and_cert = generate(options).await.unwrap();
    util::check_outputs_present(&key_and_cert);
    util::check_has_no_common_name(&key_and_cert);
    util::check_has_subject_alt_name(&key_and_cert, SubjectAltNameType::DnsName, "a.example.com");
    util::check_has_subject_alt_name(&key_and_cert, SubjectAltNameType::DnsName, "b.example.com");
    util::check_has_subject_alt_name(&key_and_cert, SubjectAltNameType::IpAddress, "10.20.30.40");

    let cert = util::parse(&key_and_cert);
    let validity = cert.validity();
    assert_eq!(validity.not_before, not_before);
    assert_eq!(validity.not_after, not_before + Duration::days(10));
    assert_eq!(cert.signature_algorithm().unwrap(), SignatureAlgorithm::Sha1WithRSA);
}

#[tokio::test]
async fn subject_fields_are_used_for_subject_and_issuer() {
    let options = GenerateOptions::builder()
        .key_size_in_bits(1024)
        .subject(
            Subject::builder()
                .common_name("internal.example")
                .state("Oregon")
                .country("US")
                .locality_name("Portland")
                .organization_name("Example Corp")
                .organizational_unit_name("Platform")
                .build(),
        )
        .build();
    let key_and_cert = generate(options).await.unwrap();
    let cert = util::parse(&key_and_cert);

    let subject = cert.subject().unwrap();
    assert_eq!(subject, cert.issuer().unwrap());
    let order: Vec<_> = subject.0.iter().map(|attr| attr.name).collect();
    assert_eq!(
        order,
        [
            AttributeName::CommonName,
            AttributeName::StateOrProvinceName,
            AttributeName::CountryName,
            AttributeName::LocalityName,
            AttributeName::OrganizationName,
            AttributeName::OrganizationalUnitName,
        ]
    );
    assert_eq!(subject.get(AttributeName::LocalityName), Some("Portland"));

    // No alt names were given, so the extension is left out.
    assert!(cert.extension::<SubjectAltNames>().unwrap().is_none());
    assert!(cert.subject_alt_names().unwrap().is_empty());
}

#[tokio::test]
async fn every_certificate_is_a_ca_with_fixed_key_usage() {
    let key_and_cert = generate(GenerateInput::from("ca.example").with_key_size(1024))
        .await
        .unwrap();
    let cert = util::parse(&key_and_cert);

    let bc = cert.extension::<BasicConstraints>().unwrap().unwrap();
    assert!(bc.is_ca);
    let ku = cert.extension::<KeyUsage>().unwrap().unwrap();
    assert_eq!(ku, selfcert::cert::builder::default_key_usage());

    let leading = cert.serial_number_hex().chars().next().unwrap();
    assert!(leading.to_digit(16).unwrap() < 8);
}

#[tokio::test]
async fn fingerprint_matches_certificate_bytes() {
    let key_and_cert = generate(GenerateInput::from("fp.example").with_key_size(1024))
        .await
        .unwrap();
    let cert = util::parse(&key_and_cert);
    let der_bytes = cert.to_der().unwrap();

    assert_eq!(key_and_cert.fingerprint, fingerprint(&der_bytes));
    assert_eq!(key_and_cert.fingerprint, fingerprint(&der_bytes));
    assert_eq!(
        key_and_cert.fingerprint,
        fingerprint_pem(&key_and_cert.certificate).unwrap()
    );
    assert_eq!(key_and_cert.fingerprint.split(':').count(), FINGERPRINT_LEN);
}

#[tokio::test]
async fn missing_identity_is_rejected() {
    let err = generate(GenerateOptions::default()).await.unwrap_err();
    assert_eq!(err, SelfCertError::InvalidIdentity);

    let only_org = GenerateOptions::builder()
        .subject(Subject::builder().organization_name("Example Corp").build())
        .build();
    assert_eq!(
        generate(only_org).await.unwrap_err(),
        SelfCertError::InvalidIdentity
    );
}

#[tokio::test]
async fn unsupported_digest_is_rejected() {
    let options = GenerateOptions::builder()
        .digest_algorithm("md5")
        .subject(Subject::with_common_name("a.example.com"))
        .build();
    assert_eq!(
        generate(options).await.unwrap_err(),
        SelfCertError::InvalidDigestAlgorithm("md5".to_string())
    );
}

#[tokio::test]
async fn alt_name_without_string_form_fails_before_key_generation() {
    let options = GenerateOptions::builder()
        .subject_alt_names(vec![SubjectAltName::new(
            SubjectAltNameType::OtherName,
            "anything",
        )])
        .build();
    assert!(matches!(
        generate(options).await.unwrap_err(),
        SelfCertError::EncodingError(_)
    ));
}

#[tokio::test]
async fn zero_key_size_and_days_use_defaults() {
    let options = GenerateOptions::builder()
        .key_size_in_bits(0)
        .validity(ValidityOptions::builder().days(0).build())
        .subject(Subject::with_common_name("a.example.com"))
        .build();
    let key_and_cert = generate(options).await.unwrap();
    assert_eq!(modulus_bits(&key_and_cert.public_key), 2048);

    let validity = util::parse(&key_and_cert).validity();
    assert_eq!(
        validity.not_after - validity.not_before,
        Duration::days(i64::from(DEFAULT_VALIDITY_DAYS))
    );
}

#[tokio::test]
async fn out_of_range_validity_fails_before_key_generation() {
    let options = GenerateOptions::builder()
        .validity(
            ValidityOptions::builder()
                .not_before(datetime!(2026-10-16 00:00:00 UTC))
                .days(3_000_000)
                .build(),
        )
        .subject(Subject::with_common_name("a.example.com"))
        .build();
    assert!(matches!(
        generate(options).await.unwrap_err(),
        SelfCertError::EncodingError(_)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_calls_are_independent() {
    let names = ["one.example", "two.example", "three.example"];
    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let input = GenerateInput::from(*name).with_key_size(1024);
            tokio::spawn(generate(input))
        })
        .collect();

    let mut fingerprints = Vec::new();
    for (handle, name) in handles.into_iter().zip(names) {
        let key_and_cert = handle.await.unwrap().unwrap();
        util::check_has_common_name(&key_and_cert, name);
        fingerprints.push(key_and_cert.fingerprint);
    }
    fingerprints.sort();
    fingerprints.dedup();
    assert_eq!(fingerprints.len(), names.len());
}
