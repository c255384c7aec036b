use bon::Builder;
use time::OffsetDateTime;

use crate::cert::params::DigestAlgorithm;
use crate::error::{Result, SelfCertError};

/// RSA modulus size used when the caller does not pick one.
pub const DEFAULT_KEY_SIZE_IN_BITS: usize = 2048;

/// Validity period used when the caller does not pick one (ten years).
pub const DEFAULT_VALIDITY_DAYS: u32 = 10 * 365;

/// Digest used to sign the certificate when the caller does not pick one.
pub const DEFAULT_DIGEST_ALGORITHM: DigestAlgorithm = DigestAlgorithm::Sha256;

/// Subject name fields of the generated certificate.
///
/// Every field is optional. Unset or empty fields are left out of the
/// distinguished name instead of being emitted empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
pub struct Subject {
    #[builder(into)]
    pub common_name: Option<String>,
    #[builder(into)]
    pub state: Option<String>,
    #[builder(into)]
    pub country: Option<String>,
    #[builder(into)]
    pub locality_name: Option<String>,
    #[builder(into)]
    pub organization_name: Option<String>,
    #[builder(into)]
    pub organizational_unit_name: Option<String>,
}

impl Subject {
    /// A subject that only carries a common name.
    pub fn with_common_name(common_name: impl Into<String>) -> Self {
        Self {
            common_name: Some(common_name.into()),
            ..Self::default()
        }
    }

    /// Returns true when a non-empty common name is present.
    pub fn has_common_name(&self) -> bool {
        self.common_name.as_deref().is_some_and(|cn| !cn.is_empty())
    }
}

/// `GeneralName` choice tags, numbered as in RFC 5280.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SubjectAltNameType {
    OtherName = 0,
    Rfc822Name = 1,
    DnsName = 2,
    X400Address = 3,
    DirectoryName = 4,
    EdiPartyName = 5,
    Uri = 6,
    IpAddress = 7,
    RegisteredId = 8,
}

impl TryFrom<u8> for SubjectAltNameType {
    type Error = SelfCertError;

    fn try_from(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => Self::OtherName,
            1 => Self::Rfc822Name,
            2 => Self::DnsName,
            3 => Self::X400Address,
            4 => Self::DirectoryName,
            5 => Self::EdiPartyName,
            6 => Self::Uri,
            7 => Self::IpAddress,
            8 => Self::RegisteredId,
            other => {
                return Err(SelfCertError::DecodingError(format!(
                    "Unknown general name tag: {other}"
                )));
            }
        })
    }
}

/// A single subject alternative name entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubjectAltName {
    pub kind: SubjectAltNameType,
    pub value: String,
}

impl SubjectAltName {
    pub fn new(kind: SubjectAltNameType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn dns(value: impl Into<String>) -> Self {
        Self::new(SubjectAltNameType::DnsName, value)
    }

    pub fn ip(value: impl Into<String>) -> Self {
        Self::new(SubjectAltNameType::IpAddress, value)
    }
}

/// Requested validity window. `not_after` is always derived from `days`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
pub struct ValidityOptions {
    /// Defaults to the time of generation.
    pub not_before: Option<OffsetDateTime>,
    /// Defaults to [`DEFAULT_VALIDITY_DAYS`], also when zero.
    pub days: Option<u32>,
}

/// The canonical option set every call shape collapses into.
///
/// ```
/// use selfcert::options::{GenerateOptions, Subject, SubjectAltName};
///
/// let opts = GenerateOptions::builder()
///     .key_size_in_bits(1024)
///     .digest_algorithm("sha1")
///     .subject(Subject::builder().common_name("example.com").build())
///     .subject_alt_names(vec![SubjectAltName::dns("example.com")])
///     .build();
/// assert_eq!(opts.key_size_in_bits, Some(1024));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
pub struct GenerateOptions {
    pub key_size_in_bits: Option<usize>,
    /// Digest name, one of `sha1` or `sha256`.
    #[builder(into)]
    pub digest_algorithm: Option<String>,
    #[builder(default)]
    pub validity: ValidityOptions,
    #[builder(default)]
    pub subject: Subject,
    #[builder(default)]
    pub subject_alt_names: Vec<SubjectAltName>,
}

impl GenerateOptions {
    /// Checks that the options name at least one identity.
    pub fn validate_identity(&self) -> Result<()> {
        if !self.subject.has_common_name() && self.subject_alt_names.is_empty() {
            return Err(SelfCertError::InvalidIdentity);
        }
        Ok(())
    }

    /// Requested key size; zero counts as unset.
    pub fn resolved_key_size(&self) -> usize {
        self.key_size_in_bits
            .filter(|&bits| bits != 0)
            .unwrap_or(DEFAULT_KEY_SIZE_IN_BITS)
    }

    /// Resolves the requested digest name.
    pub fn resolved_digest(&self) -> Result<DigestAlgorithm> {
        match self.digest_algorithm.as_deref() {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_DIGEST_ALGORITHM),
        }
    }
}

/// The accepted call shapes of [`crate::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateInput {
    /// Used as both the subject common name and a single DNS alt name.
    CommonName {
        name: String,
        key_size_in_bits: Option<usize>,
    },
    /// One DNS alt name per entry, no common name.
    SubjectAltNames {
        names: Vec<String>,
        key_size_in_bits: Option<usize>,
    },
    Options(GenerateOptions),
}

impl GenerateInput {
    /// Overrides the key size of the string and list shapes.
    ///
    /// The options shape already carries its own key size and is left alone.
    pub fn with_key_size(self, bits: usize) -> Self {
        match self {
            GenerateInput::CommonName { name, .. } => GenerateInput::CommonName {
                name,
                key_size_in_bits: Some(bits),
            },
            GenerateInput::SubjectAltNames { names, .. } => GenerateInput::SubjectAltNames {
                names,
                key_size_in_bits: Some(bits),
            },
            options @ GenerateInput::Options(_) => options,
        }
    }

    /// Collapses the input into validated canonical options.
    pub fn normalize(self) -> Result<GenerateOptions> {
        let options = match self {
            GenerateInput::CommonName {
                name,
                key_size_in_bits,
            } => GenerateOptions {
                key_size_in_bits,
                subject: Subject::with_common_name(name.clone()),
                subject_alt_names: vec![SubjectAltName::dns(name)],
                ..GenerateOptions::default()
            },
            GenerateInput::SubjectAltNames {
                names,
                key_size_in_bits,
            } => GenerateOptions {
                key_size_in_bits,
                subject_alt_names: names.into_iter().map(SubjectAltName::dns).collect(),
                ..GenerateOptions::default()
            },
            GenerateInput::Options(options) => options,
        };
        options.validate_identity()?;
        Ok(options)
    }
}

impl From<&str> for GenerateInput {
    fn from(name: &str) -> Self {
        GenerateInput::from(name.to_string())
    }
}

impl From<String> for GenerateInput {
    fn from(name: String) -> Self {
        GenerateInput::CommonName {
            name,
            key_size_in_bits: None,
        }
    }
}

impl From<Vec<String>> for GenerateInput {
    fn from(names: Vec<String>) -> Self {
        GenerateInput::SubjectAltNames {
            names,
            key_size_in_bits: None,
        }
    }
}

impl From<Vec<&str>> for GenerateInput {
    fn from(names: Vec<&str>) -> Self {
        GenerateInput::from(names.into_iter().map(String::from).collect::<Vec<_>>())
    }
}

impl<const N: usize> From<[&str; N]> for GenerateInput {
    fn from(names: [&str; N]) -> Self {
        GenerateInput::from(Vec::from(names))
    }
}

impl From<GenerateOptions> for GenerateInput {
    fn from(options: GenerateOptions) -> Self {
        GenerateInput::Options(options)
    }
}
