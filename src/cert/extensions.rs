use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use const_oid::AssociatedOid;
pub use der::flagset::FlagSet;
use der::{
    Decode, Encode,
    asn1::{Ia5String, OctetString},
    oid::ObjectIdentifier,
};
use x509_cert::ext::pkix::KeyUsage as X509KeyUsage;
pub use x509_cert::ext::pkix::KeyUsages;
use x509_cert::ext::pkix::name::GeneralName;
use x509_cert::name::Name;

use crate::error::SelfCertError;
use crate::options::{SubjectAltName, SubjectAltNameType};

/// Trait for converting to and from X.509 extensions.
///
/// This trait provides methods to encode and decode X.509 extension values.
///
/// # Example
/// ```
/// use selfcert::cert::extensions::{SubjectAltNames, ToAndFromX509Extension};
/// use selfcert::options::SubjectAltName;
///
/// let san = SubjectAltNames { names: vec![SubjectAltName::dns("example.com")] };
/// let encoded = san.to_x509_extension_value().unwrap();
/// let decoded = SubjectAltNames::from_x509_extension_value(&encoded).unwrap();
/// assert_eq!(san.names, decoded.names);
/// ```
pub trait ToAndFromX509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// Encodes the extension into a DER-encoded byte vector.
    fn to_x509_extension_value(&self) -> Result<Vec<u8>, SelfCertError>;

    /// Decodes the extension from a DER-encoded byte slice.
    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, SelfCertError>
    where
        Self: Sized;
}

/// Represents the Subject Alternative Name (SAN) extension.
///
/// Entries are encoded in the order given, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAltNames {
    pub names: Vec<SubjectAltName>,
}

fn ia5(value: &str) -> Result<Ia5String, SelfCertError> {
    Ia5String::new(value).map_err(|e| SelfCertError::EncodingError(e.to_string()))
}

fn to_general_name(name: &SubjectAltName) -> Result<GeneralName, SelfCertError> {
    let value = name.value.as_str();
    Ok(match name.kind {
        SubjectAltNameType::Rfc822Name => GeneralName::Rfc822Name(ia5(value)?),
        SubjectAltNameType::DnsName => GeneralName::DnsName(ia5(value)?),
        SubjectAltNameType::Uri => GeneralName::UniformResourceIdentifier(ia5(value)?),
        SubjectAltNameType::IpAddress => {
            // Literals become network-order octets, anything else goes in verbatim.
            let octets = match value.parse::<IpAddr>() {
                Ok(IpAddr::V4(v4)) => v4.octets().to_vec(),
                Ok(IpAddr::V6(v6)) => v6.octets().to_vec(),
                Err(_) => value.as_bytes().to_vec(),
            };
            GeneralName::IpAddress(OctetString::new(octets)?)
        }
        SubjectAltNameType::DirectoryName => GeneralName::DirectoryName(Name::from_str(value)?),
        SubjectAltNameType::RegisteredId => GeneralName::RegisteredId(
            ObjectIdentifier::new(value)
                .map_err(|e| SelfCertError::EncodingError(e.to_string()))?,
        ),
        SubjectAltNameType::OtherName
        | SubjectAltNameType::X400Address
        | SubjectAltNameType::EdiPartyName => {
            return Err(SelfCertError::EncodingError(format!(
                "Alt name type {:?} cannot be built from a string value",
                name.kind
            )));
        }
    })
}

/// Recovers the string form of an iPAddress value.
///
/// Printable ASCII is read back as the verbatim text it was built from, so a
/// 4 or 16 byte value like `abcd` stays `abcd`. An address whose octets are
/// all printable (e.g. `97.98.99.100`) therefore also comes back as text.
fn ip_value(bytes: &[u8]) -> Result<String, SelfCertError> {
    let is_text = !bytes.is_empty()
        && bytes
            .iter()
            .all(|byte| byte.is_ascii_graphic() || *byte == b' ');
    if !is_text {
        if let Ok(v4) = <[u8; 4]>::try_from(bytes) {
            return Ok(Ipv4Addr::from(v4).to_string());
        }
        if let Ok(v6) = <[u8; 16]>::try_from(bytes) {
            return Ok(Ipv6Addr::from(v6).to_string());
        }
    }
    String::from_utf8(bytes.to_vec()).map_err(|e| SelfCertError::DecodingError(e.to_string()))
}

fn from_general_name(name: &GeneralName) -> Result<SubjectAltName, SelfCertError> {
    Ok(match name {
        GeneralName::Rfc822Name(v) => {
            SubjectAltName::new(SubjectAltNameType::Rfc822Name, v.to_string())
        }
        GeneralName::DnsName(v) => SubjectAltName::dns(v.to_string()),
        GeneralName::UniformResourceIdentifier(v) => {
            SubjectAltName::new(SubjectAltNameType::Uri, v.to_string())
        }
        GeneralName::IpAddress(octets) => SubjectAltName::ip(ip_value(octets.as_bytes())?),
        GeneralName::DirectoryName(dn) => {
            SubjectAltName::new(SubjectAltNameType::DirectoryName, dn.to_string())
        }
        GeneralName::RegisteredId(oid) => {
            SubjectAltName::new(SubjectAltNameType::RegisteredId, oid.to_string())
        }
        _ => {
            return Err(SelfCertError::DecodingError(
                "Unsupported general name type".to_string(),
            ));
        }
    })
}

impl ToAndFromX509Extension for SubjectAltNames {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::SubjectAltName::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, SelfCertError> {
        let san = x509_cert::ext::pkix::SubjectAltName(
            self.names
                .iter()
                .map(to_general_name)
                .collect::<Result<Vec<_>, _>>()?,
        );

        Ok(san.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, SelfCertError> {
        let san = x509_cert::ext::pkix::SubjectAltName::from_der(extension)?;
        let names = san
            .0
            .iter()
            .map(from_general_name)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { names })
    }
}

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u8>,
}

impl ToAndFromX509Extension for BasicConstraints {
    const OID: ObjectIdentifier = x509_cert::ext::pkix::BasicConstraints::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, SelfCertError> {
        let bc = x509_cert::ext::pkix::BasicConstraints {
            ca: self.is_ca,
            path_len_constraint: self.max_path_length,
        };

        Ok(bc.to_der()?)
    }

    fn from_x509_extension_value(der_bytes: &[u8]) -> Result<Self, SelfCertError> {
        let bc = x509_cert::ext::pkix::BasicConstraints::from_der(der_bytes)?;
        Ok(Self {
            is_ca: bc.ca,
            max_path_length: bc.path_len_constraint,
        })
    }
}

/// Represents the Key Usage extension.
///
/// This extension defines the purpose of the key contained in the certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyUsage(pub FlagSet<KeyUsages>);

impl ToAndFromX509Extension for KeyUsage {
    const OID: ObjectIdentifier = <X509KeyUsage as AssociatedOid>::OID;

    fn to_x509_extension_value(&self) -> Result<Vec<u8>, SelfCertError> {
        let ku = X509KeyUsage(self.0);
        Ok(ku.to_der()?)
    }

    fn from_x509_extension_value(extension: &[u8]) -> Result<Self, SelfCertError> {
        let ku = X509KeyUsage::from_der(extension)?;
        Ok(Self(ku.0))
    }
}
