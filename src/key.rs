use std::fmt;

use pkcs8::LineEnding;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey as RsaSigningKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::cert::params::DigestAlgorithm;
use crate::error::{Result, SelfCertError};

/// An RSA key pair owned by a single certificate.
#[derive(Clone)]
pub struct KeyPair {
    private: Box<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl fmt::Debug for KeyPair {
    // The private half never appears in formatted output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate an RSA key pair with the specified number of bits.
    ///
    /// This blocks the calling thread for as long as prime generation takes.
    pub fn generate_rsa(bits: usize) -> Result<Self> {
        let mut rng = rand_core::OsRng;
        let private = RsaPrivateKey::new(&mut rng, bits)?;
        let public = RsaPublicKey::from(&private);
        Ok(KeyPair {
            private: Box::new(private),
            public,
        })
    }

    /// Generate an RSA key pair on the blocking thread pool.
    ///
    /// Must be awaited from within a Tokio runtime.
    pub async fn generate_rsa_async(bits: usize) -> Result<Self> {
        debug!(bits, "generating RSA key pair");
        let key_pair = tokio::task::spawn_blocking(move || Self::generate_rsa(bits))
            .await
            .map_err(|e| SelfCertError::KeyGenerationError(e.to_string()))??;
        debug!(bits, "RSA key pair ready");
        Ok(key_pair)
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Returns the public key as an X.509 `SubjectPublicKeyInfo`.
    pub fn as_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        Ok(SubjectPublicKeyInfoOwned::from_key(self.public.clone())?)
    }

    /// Encodes the private key as PKCS#1 PEM (`RSA PRIVATE KEY`).
    pub fn private_key_to_pem(&self) -> Result<String> {
        let pem = self.private.to_pkcs1_pem(LineEnding::LF)?;
        Ok(pem.as_str().to_owned())
    }

    /// Encodes the public key as SPKI PEM (`PUBLIC KEY`).
    pub fn public_key_to_pem(&self) -> Result<String> {
        Ok(self.public.to_public_key_pem(LineEnding::LF)?)
    }

    /// Signs `data` with RSASSA-PKCS1-v1_5 over the chosen digest.
    pub fn sign_data(&self, data: &[u8], digest: DigestAlgorithm) -> Result<Vec<u8>> {
        let private = (*self.private).clone();
        let signature = match digest {
            DigestAlgorithm::Sha1 => RsaSigningKey::<Sha1>::new(private).try_sign(data)?,
            DigestAlgorithm::Sha256 => RsaSigningKey::<Sha256>::new(private).try_sign(data)?,
        };
        Ok(signature.to_vec())
    }
}
