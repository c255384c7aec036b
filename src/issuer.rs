use der::Encode;
use x509_cert::certificate::CertificateInner;

use crate::cert::Certificate;
use crate::cert::params::{DigestAlgorithm, DistinguishedName};
use crate::error::Result;
use crate::key::KeyPair;
use crate::tbs_certificate::TbsCertificate;

/// Represents an entity capable of signing certificates.
pub trait Issuer {
    /// Returns the distinguished name of the issuer.
    fn issuer_name(&self) -> &DistinguishedName;

    /// Returns the signing key of the issuer.
    fn signing_key(&self) -> &KeyPair;

    /// Signs a to-be-signed record and returns the finished certificate.
    ///
    /// The record's issuer name and signature algorithm are replaced by the
    /// issuer's own before encoding.
    fn sign(&self, tbs: TbsCertificate, digest: DigestAlgorithm) -> Result<Certificate> {
        let tbs = TbsCertificate {
            issuer: self.issuer_name().clone(),
            signature_algorithm: digest.signature_algorithm(),
            ..tbs
        };
        let tbs_cert_inner = tbs.to_tbs_certificate_inner()?;

        let signature = self
            .signing_key()
            .sign_data(&tbs_cert_inner.to_der()?, digest)?;

        let cert_inner = CertificateInner {
            tbs_certificate: tbs_cert_inner,
            signature_algorithm: digest.signature_algorithm().into(),
            signature: der::asn1::BitString::from_bytes(&signature)?,
        };

        Ok(Certificate { inner: cert_inner })
    }
}

/// Issuer for self-signed certificates: the subject signs itself.
pub struct SelfIssuer<'a> {
    pub name: DistinguishedName,
    pub key: &'a KeyPair,
}

impl Issuer for SelfIssuer<'_> {
    fn issuer_name(&self) -> &DistinguishedName {
        &self.name
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }
}
