pub mod builder;
pub mod extensions;
pub mod params;

use der::asn1::{Any, AnyRef};
use der::{Decode, DecodePem, Encode, EncodePem};
use extensions::{SubjectAltNames, ToAndFromX509Extension};
use params::{DistinguishedName, ExtensionParam, Validity};
use time::OffsetDateTime;
use x509_cert::certificate::CertificateInner;

use crate::error::{Result, SelfCertError};
use crate::options::SubjectAltName;

/// Represents the supported signature algorithms for certificates.
///
/// This enum provides a mapping to the corresponding OIDs for each algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-1 with RSA encryption.
    Sha1WithRSA,
    /// SHA-256 with RSA encryption.
    Sha256WithRSA,
}

impl From<SignatureAlgorithm> for x509_cert::spki::AlgorithmIdentifierOwned {
    /// Converts a `SignatureAlgorithm` into an `AlgorithmIdentifierOwned`.
    ///
    /// RSA PKCS#1 v1.5 identifiers carry an explicit NULL parameter.
    fn from(value: SignatureAlgorithm) -> Self {
        let oid = match value {
            SignatureAlgorithm::Sha1WithRSA => const_oid::db::rfc5912::SHA_1_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha256WithRSA => {
                const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION
            }
        };
        x509_cert::spki::AlgorithmIdentifierOwned {
            oid,
            parameters: Some(Any::from(AnyRef::NULL)),
        }
    }
}

/// Represents a signed X.509 certificate.
///
/// This struct provides methods to encode the certificate into DER or PEM formats
/// and to read back the fields this crate writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| SelfCertError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(pkcs8::LineEnding::LF)
            .map_err(|e| SelfCertError::EncodingError(e.to_string()))
    }

    pub fn from_der(der_bytes: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der_bytes)
            .map_err(|e| SelfCertError::DecodingError(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_pem(pem: &str) -> Result<Self> {
        let inner = CertificateInner::from_pem(pem)
            .map_err(|e| SelfCertError::DecodingError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// SHA-1 fingerprint of the DER encoding, see [`crate::fingerprint`].
    pub fn fingerprint(&self) -> Result<String> {
        Ok(crate::fingerprint::fingerprint(&self.to_der()?))
    }

    pub fn subject(&self) -> Result<DistinguishedName> {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.subject)
    }

    pub fn issuer(&self) -> Result<DistinguishedName> {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.issuer)
    }

    pub fn subject_common_name(&self) -> Result<Option<String>> {
        Ok(self
            .subject()?
            .get(params::AttributeName::CommonName)
            .map(str::to_string))
    }

    /// Extensions in the order they appear in the certificate.
    pub fn extensions(&self) -> Vec<ExtensionParam> {
        self.inner
            .tbs_certificate
            .extensions
            .iter()
            .flatten()
            .map(|ext| ExtensionParam {
                oid: ext.extn_id,
                critical: ext.critical,
                value: ext.extn_value.as_bytes().to_vec(),
            })
            .collect()
    }

    /// Decodes the first extension of type `E`, if present.
    pub fn extension<E: ToAndFromX509Extension>(&self) -> Result<Option<E>> {
        self.extensions()
            .iter()
            .find(|ext| ext.oid == E::OID)
            .map(|ext| ext.to_extension())
            .transpose()
    }

    /// Subject alternative names, empty when the extension is absent.
    pub fn subject_alt_names(&self) -> Result<Vec<SubjectAltName>> {
        Ok(self
            .extension::<SubjectAltNames>()?
            .map(|san| san.names)
            .unwrap_or_default())
    }

    pub fn validity(&self) -> Validity {
        let validity = &self.inner.tbs_certificate.validity;
        Validity {
            not_before: OffsetDateTime::from(validity.not_before.to_system_time()),
            not_after: OffsetDateTime::from(validity.not_after.to_system_time()),
        }
    }

    /// Serial number content octets as lowercase hex.
    pub fn serial_number_hex(&self) -> String {
        hex::encode(self.inner.tbs_certificate.serial_number.as_bytes())
    }

    pub fn signature_algorithm(&self) -> Result<SignatureAlgorithm> {
        match self.inner.signature_algorithm.oid {
            const_oid::db::rfc5912::SHA_1_WITH_RSA_ENCRYPTION => {
                Ok(SignatureAlgorithm::Sha1WithRSA)
            }
            const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION => {
                Ok(SignatureAlgorithm::Sha256WithRSA)
            }
            _ => Err(SelfCertError::DecodingError(
                "Unsupported signature algorithm".to_string(),
            )),
        }
    }
}
