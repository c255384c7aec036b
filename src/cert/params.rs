use std::fmt;
use std::str::FromStr;

use const_oid::ObjectIdentifier;
use const_oid::db::rfc4519;
use der::asn1::{Any, PrintableStringRef, SetOfVec};
use der::{Tag, Tagged};
use time::{Duration, OffsetDateTime};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};

use super::SignatureAlgorithm;
use super::extensions::ToAndFromX509Extension;
use crate::error::{Result, SelfCertError};
use crate::options::{DEFAULT_VALIDITY_DAYS, Subject, ValidityOptions};

/// Message digests accepted for signing the certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// The RSA signature algorithm that pairs with this digest.
    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        match self {
            DigestAlgorithm::Sha1 => SignatureAlgorithm::Sha1WithRSA,
            DigestAlgorithm::Sha256 => SignatureAlgorithm::Sha256WithRSA,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SelfCertError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(SelfCertError::InvalidDigestAlgorithm(name.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distinguished name attribute types, in the order they are emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeName {
    CommonName,
    StateOrProvinceName,
    CountryName,
    LocalityName,
    OrganizationName,
    OrganizationalUnitName,
}

impl AttributeName {
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            AttributeName::CommonName => rfc4519::CN,
            AttributeName::StateOrProvinceName => rfc4519::ST,
            AttributeName::CountryName => rfc4519::C,
            AttributeName::LocalityName => rfc4519::L,
            AttributeName::OrganizationName => rfc4519::O,
            AttributeName::OrganizationalUnitName => rfc4519::OU,
        }
    }

    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        [
            AttributeName::CommonName,
            AttributeName::StateOrProvinceName,
            AttributeName::CountryName,
            AttributeName::LocalityName,
            AttributeName::OrganizationName,
            AttributeName::OrganizationalUnitName,
        ]
        .into_iter()
        .find(|name| name.oid() == oid)
    }
}

/// A single name attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    pub value: String,
}

impl Attribute {
    fn to_x509(&self) -> Result<AttributeTypeAndValue> {
        let value = match self.name {
            AttributeName::CountryName => {
                PrintableStringRef::new(&self.value)?;
                Any::new(Tag::PrintableString, self.value.as_bytes())?
            }
            _ => Any::new(Tag::Utf8String, self.value.as_bytes())?,
        };
        Ok(AttributeTypeAndValue {
            oid: self.name.oid(),
            value,
        })
    }
}

/// Ordered attribute list used as both subject and issuer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinguishedName(pub Vec<Attribute>);

impl DistinguishedName {
    /// Flattens a [`Subject`] into attributes, skipping empty fields.
    pub fn from_subject(subject: &Subject) -> Self {
        let fields = [
            (AttributeName::CommonName, &subject.common_name),
            (AttributeName::StateOrProvinceName, &subject.state),
            (AttributeName::CountryName, &subject.country),
            (AttributeName::LocalityName, &subject.locality_name),
            (AttributeName::OrganizationName, &subject.organization_name),
            (
                AttributeName::OrganizationalUnitName,
                &subject.organizational_unit_name,
            ),
        ];
        let attributes = fields
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| Attribute {
                        name,
                        value: v.to_string(),
                    })
            })
            .collect();
        DistinguishedName(attributes)
    }

    pub fn get(&self, name: AttributeName) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Converts the attributes into an RDN sequence, one attribute per RDN.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::Name> {
        let rdns = self
            .0
            .iter()
            .map(|attr| -> Result<RelativeDistinguishedName> {
                let set = SetOfVec::try_from(vec![attr.to_x509()?])?;
                Ok(RelativeDistinguishedName(set))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RdnSequence(rdns))
    }

    /// Reads back the attributes this crate knows how to emit.
    ///
    /// Unknown attribute types are skipped.
    pub fn from_x509_name(name: &x509_cert::name::Name) -> Result<Self> {
        let mut attributes = Vec::new();
        for rdn in name.0.iter() {
            for atv in rdn.0.iter() {
                let Some(attr_name) = AttributeName::from_oid(atv.oid) else {
                    continue;
                };
                let value = match atv.value.tag() {
                    Tag::PrintableString => atv
                        .value
                        .decode_as::<PrintableStringRef<'_>>()?
                        .to_string(),
                    _ => atv.value.decode_as::<String>()?,
                };
                attributes.push(Attribute {
                    name: attr_name,
                    value,
                });
            }
        }
        Ok(DistinguishedName(attributes))
    }
}

/// Certificate validity period.
///
/// `not_after` is always `not_before` plus the requested number of days.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Fails when `not_after` would fall outside the representable date range.
    pub fn starting_at(not_before: OffsetDateTime, days: u32) -> Result<Self> {
        let not_after = not_before
            .checked_add(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                SelfCertError::EncodingError(format!(
                    "Validity of {days} days from {not_before} is out of range"
                ))
            })?;
        Ok(Self {
            not_before,
            not_after,
        })
    }

    /// Resolves caller options, defaulting to now and [`DEFAULT_VALIDITY_DAYS`].
    ///
    /// A zero day count counts as unset.
    pub fn from_options(options: &ValidityOptions) -> Result<Self> {
        let not_before = options.not_before.unwrap_or_else(OffsetDateTime::now_utc);
        let days = options
            .days
            .filter(|&days| days != 0)
            .unwrap_or(DEFAULT_VALIDITY_DAYS);
        Self::starting_at(not_before, days)
    }
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(
        extension: &E,
        critical: bool,
    ) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }
}
