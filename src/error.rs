//! use selfcert::error::SelfCertError;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, SelfCertError>;

/// Represents errors that can occur while issuing a self-signed certificate.
///
/// Validation failures (`InvalidIdentity`, `InvalidDigestAlgorithm`) are raised
/// before any key material is generated. Everything else comes from the
/// underlying cryptography and encoding crates and is passed through as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelfCertError {
    /// Neither a common name nor a subject alternative name was supplied.
    #[error("Either a commonName or subjectAltName is required")]
    InvalidIdentity,

    /// The requested digest is not one of the supported names.
    #[error("Invalid digest algorithm: {0}")]
    InvalidDigestAlgorithm(String),

    /// Error during RSA key generation.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error while producing the certificate signature.
    #[error("Signing error: {0}")]
    SigningError(String),
}

impl From<der::Error> for SelfCertError {
    /// Converts a `der::Error` into a `SelfCertError`.
    fn from(err: der::Error) -> Self {
        SelfCertError::EncodingError(err.to_string())
    }
}

impl From<spki::Error> for SelfCertError {
    fn from(err: spki::Error) -> Self {
        SelfCertError::EncodingError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for SelfCertError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        SelfCertError::EncodingError(err.to_string())
    }
}

impl From<rsa::Error> for SelfCertError {
    fn from(err: rsa::Error) -> Self {
        SelfCertError::KeyGenerationError(err.to_string())
    }
}

impl From<rsa::signature::Error> for SelfCertError {
    fn from(err: rsa::signature::Error) -> Self {
        SelfCertError::SigningError(err.to_string())
    }
}

impl From<pem::PemError> for SelfCertError {
    fn from(err: pem::PemError) -> Self {
        SelfCertError::DecodingError(err.to_string())
    }
}
