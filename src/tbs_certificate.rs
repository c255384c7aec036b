use der::DateTime;
use der::asn1::{GeneralizedTime, OctetString, UtcTime};
use time::OffsetDateTime;
use x509_cert::Version;
use x509_cert::certificate::TbsCertificateInner;
use x509_cert::serial_number::SerialNumber;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::SignatureAlgorithm;
use crate::cert::params::{DistinguishedName, ExtensionParam, Validity};
use crate::error::Result;
use crate::serial::serial_to_der_bytes;

/// Represents the "To Be Signed" (TBS) portion of an X.509 certificate.
///
/// The value is immutable once built. Signing consumes it and produces a
/// separate [`crate::cert::Certificate`].
///
/// # Fields
/// * `serial_number_hex` - Positive serial number as hex.
/// * `signature_algorithm` - The algorithm used to sign the certificate.
/// * `issuer` - The distinguished name of the certificate issuer.
/// * `validity` - The validity window.
/// * `subject` - The distinguished name of the certificate subject.
/// * `subject_public_key` - The public key of the certificate subject.
/// * `extensions` - X.509 extensions, in encoding order.
#[derive(Clone, Debug)]
pub struct TbsCertificate {
    pub serial_number_hex: String,
    pub signature_algorithm: SignatureAlgorithm,
    pub issuer: DistinguishedName,
    pub validity: Validity,
    pub subject: DistinguishedName,
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    pub extensions: Vec<ExtensionParam>,
}

/// UTCTime covers 1950 through 2049, GeneralizedTime everything after.
fn to_x509_time(t: OffsetDateTime) -> Result<x509_cert::time::Time> {
    let date_time = DateTime::from_system_time(t.into())?;
    if date_time.year() < 2050 {
        Ok(x509_cert::time::Time::UtcTime(UtcTime::from_date_time(
            date_time,
        )?))
    } else {
        Ok(x509_cert::time::Time::GeneralTime(
            GeneralizedTime::from_date_time(date_time),
        ))
    }
}

impl TbsCertificate {
    /// Converts the `TbsCertificate` into a `TbsCertificateInner` for DER encoding.
    pub fn to_tbs_certificate_inner(&self) -> Result<TbsCertificateInner> {
        let algorithm_id: x509_cert::spki::AlgorithmIdentifierOwned =
            self.signature_algorithm.into();

        let extensions = self
            .extensions
            .iter()
            .map(|ext| -> Result<x509_cert::ext::Extension> {
                Ok(x509_cert::ext::Extension {
                    extn_id: ext.oid,
                    critical: ext.critical,
                    extn_value: OctetString::new(ext.value.clone())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let validity = x509_cert::time::Validity {
            not_before: to_x509_time(self.validity.not_before)?,
            not_after: to_x509_time(self.validity.not_after)?,
        };

        let serial_number =
            SerialNumber::new(serial_to_der_bytes(&self.serial_number_hex)?.as_slice())?;

        Ok(TbsCertificateInner {
            version: Version::V3,
            serial_number,
            signature: algorithm_id,
            issuer: self.issuer.as_x509_name()?,
            validity,
            subject: self.subject.as_x509_name()?,
            subject_public_key_info: self.subject_public_key.clone(),
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: if self.extensions.is_empty() {
                None
            } else {
                Some(extensions)
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn test_time_encoding_switches_at_2050() {
        // 2049-12-31T23:59:59Z
        let before = OffsetDateTime::from_unix_timestamp(2_524_607_999).unwrap();
        assert!(matches!(
            to_x509_time(before).unwrap(),
            x509_cert::time::Time::UtcTime(_)
        ));
        let after = before + Duration::seconds(1);
        assert!(matches!(
            to_x509_time(after).unwrap(),
            x509_cert::time::Time::GeneralTime(_)
        ));
    }

    #[test]
    fn test_sub_second_precision_is_dropped() {
        let t = OffsetDateTime::from_unix_timestamp(1_514_808_000).unwrap()
            + Duration::milliseconds(750);
        let encoded = to_x509_time(t).unwrap();
        assert_eq!(encoded.to_unix_duration().as_secs(), 1_514_808_000);
        assert_eq!(encoded.to_unix_duration().subsec_nanos(), 0);
    }
}
