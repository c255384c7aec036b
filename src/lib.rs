//! # selfcert - Self-Signed Certificates in Pure Rust
//!
//! selfcert issues self-signed X.509 certificates backed by a freshly generated
//! RSA key pair, built entirely with rustcrypto libraries. Each call returns the
//! private key, public key and certificate as PEM text together with a SHA-1
//! fingerprint of the certificate.
//!
//! Every certificate is its own CA: basicConstraints carries `cA = true` and
//! keyUsage allows certificate signing, digital signatures, non-repudiation,
//! key encipherment and data encipherment.
//!
//! ## Call shapes
//!
//! [`generate`] accepts anything that converts into [`options::GenerateInput`]:
//!
//! - a single name, used as the subject common name and as one DNS alt name;
//! - a list of names, each becoming a DNS alt name, with no common name;
//! - a full [`options::GenerateOptions`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), selfcert::error::SelfCertError> {
//! let key_and_cert = selfcert::generate("a.example.com").await?;
//! println!("{}", key_and_cert.certificate);
//! println!("SHA-1 fingerprint: {}", key_and_cert.fingerprint);
//! # Ok(())
//! # }
//! ```
//!
//! ### Several names with a smaller key
//!
//! ```rust,no_run
//! use selfcert::options::GenerateInput;
//!
//! # async fn run() -> Result<(), selfcert::error::SelfCertError> {
//! let input = GenerateInput::from(["a.example.com", "b.example.com"]).with_key_size(1024);
//! let key_and_cert = selfcert::generate(input).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Full options
//!
//! ```rust,no_run
//! use selfcert::options::{GenerateOptions, Subject, SubjectAltName, ValidityOptions};
//!
//! # async fn run() -> Result<(), selfcert::error::SelfCertError> {
//! let options = GenerateOptions::builder()
//!     .key_size_in_bits(3072)
//!     .digest_algorithm("sha256")
//!     .validity(ValidityOptions::builder().days(30).build())
//!     .subject(
//!         Subject::builder()
//!             .common_name("internal.example")
//!             .organization_name("Example Corp")
//!             .country("US")
//!             .build(),
//!     )
//!     .subject_alt_names(vec![
//!         SubjectAltName::dns("internal.example"),
//!         SubjectAltName::ip("10.0.0.1"),
//!     ])
//!     .build();
//! let key_and_cert = selfcert::generate(options).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use selfcert::error::SelfCertError;
//! use selfcert::options::GenerateOptions;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! match selfcert::generate(GenerateOptions::default()).await {
//!     Err(SelfCertError::InvalidIdentity) => println!("need a name"),
//!     Err(e) => println!("Other error: {}", e),
//!     Ok(_) => unreachable!(),
//! }
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`options`]: Call shapes, canonical options and policy defaults
//! - [`cert`]: Certificate values, names, validity and extensions
//! - [`key`]: RSA key generation, PEM export and signing
//! - [`serial`]: Positive random serial numbers
//! - [`issuer`]: Signing a to-be-signed record
//! - [`fingerprint`]: SHA-1 certificate fingerprints
//! - [`error`]: Error types
//! - [`tbs_certificate`]: Low-level certificate structure

pub mod cert;
pub mod error;
pub mod fingerprint;
mod generate;
pub mod issuer;
pub mod key;
pub mod options;
pub mod pem_utils;
pub mod serial;
pub mod tbs_certificate;

pub use error::{Result, SelfCertError};
pub use generate::{KeyAndCert, generate};
pub use options::{GenerateInput, GenerateOptions, Subject, SubjectAltName, SubjectAltNameType};
