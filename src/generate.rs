use tracing::{debug, instrument};

use crate::cert::builder::CertificateTemplate;
use crate::cert::params::Validity;
use crate::error::Result;
use crate::issuer::{Issuer, SelfIssuer};
use crate::key::KeyPair;
use crate::options::GenerateInput;
use crate::serial::random_serial_hex;
use crate::tbs_certificate::TbsCertificate;

/// PEM-encoded output of [`generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAndCert {
    /// PKCS#1 `RSA PRIVATE KEY`.
    pub private_key: String,
    /// SPKI `PUBLIC KEY`.
    pub public_key: String,
    pub certificate: String,
    /// Colon-separated lowercase hex SHA-1 of the DER certificate.
    pub fingerprint: String,
}

/// Issues a self-signed certificate with a fresh RSA key pair.
///
/// Accepts a common name, a list of DNS names or a full
/// [`GenerateOptions`](crate::options::GenerateOptions). Identity and digest
/// checks run before the key is generated; key generation runs on Tokio's
/// blocking pool, so this must be awaited inside a Tokio runtime.
#[instrument(skip_all)]
pub async fn generate(input: impl Into<GenerateInput>) -> Result<KeyAndCert> {
    let options = input.into().normalize()?;
    let digest = options.resolved_digest()?;
    let key_size = options.resolved_key_size();
    debug!(
        key_size,
        %digest,
        alt_names = options.subject_alt_names.len(),
        "generating self-signed certificate"
    );

    let template = CertificateTemplate::from_options(&options)?;
    let validity = Validity::from_options(&options.validity)?;
    let serial_number_hex = random_serial_hex()?;

    let key_pair = KeyPair::generate_rsa_async(key_size).await?;

    let tbs = TbsCertificate {
        serial_number_hex,
        signature_algorithm: digest.signature_algorithm(),
        issuer: template.attributes.clone(),
        validity,
        subject: template.attributes.clone(),
        subject_public_key: key_pair.as_spki()?,
        extensions: template.extensions,
    };
    let issuer = SelfIssuer {
        name: template.attributes,
        key: &key_pair,
    };
    let certificate = issuer.sign(tbs, digest)?;

    let fingerprint = certificate.fingerprint()?;
    debug!(%fingerprint, "certificate signed");

    Ok(KeyAndCert {
        private_key: key_pair.private_key_to_pem()?,
        public_key: key_pair.public_key_to_pem()?,
        certificate: certificate.to_pem()?,
        fingerprint,
    })
}
