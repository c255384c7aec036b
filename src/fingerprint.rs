//! Certificate fingerprints.
//!
//! The fingerprint is always SHA-1 over the DER encoding, whatever digest
//! the certificate itself was signed with.

use sha1::{Digest, Sha1};

use crate::error::Result;
use crate::pem_utils::pem_to_der;

/// Length of a SHA-1 digest in bytes.
pub const FINGERPRINT_LEN: usize = 20;

/// Lowercase hex SHA-1 of `der_bytes`, one colon between each octet.
pub fn fingerprint(der_bytes: &[u8]) -> String {
    Sha1::digest(der_bytes)
        .iter()
        .map(|byte| hex::encode([*byte]))
        .collect::<Vec<_>>()
        .join(":")
}

/// Fingerprints a PEM-encoded certificate.
pub fn fingerprint_pem(pem: &str) -> Result<String> {
    Ok(fingerprint(&pem_to_der(pem)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // SHA-1("abc")
        assert_eq!(
            fingerprint(b"abc"),
            "a9:99:3e:36:47:06:81:6a:ba:3e:25:71:78:50:c2:6c:9c:d0:d8:9d"
        );
    }

    #[test]
    fn test_shape() {
        let fp = fingerprint(&[0u8; 64]);
        let groups: Vec<_> = fp.split(':').collect();
        assert_eq!(groups.len(), FINGERPRINT_LEN);
        assert!(groups.iter().all(|g| {
            g.len() == 2 && g.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        }));
    }

    #[test]
    fn test_pem_and_der_agree() {
        let der_bytes = b"not really a certificate".to_vec();
        let pem = pem::encode(&pem::Pem::new("CERTIFICATE", der_bytes.clone()));
        assert_eq!(fingerprint_pem(&pem).unwrap(), fingerprint(&der_bytes));
    }

    #[test]
    fn test_malformed_pem_is_a_decoding_error() {
        let err = fingerprint_pem("no armour here").unwrap_err();
        assert!(matches!(err, crate::error::SelfCertError::DecodingError(_)));
    }
}
