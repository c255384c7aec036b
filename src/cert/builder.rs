use der::flagset::FlagSet;

use super::extensions::{BasicConstraints, KeyUsage, KeyUsages, SubjectAltNames};
use super::params::{DistinguishedName, ExtensionParam};
use crate::error::Result;
use crate::options::GenerateOptions;

/// Key usage bits set on every generated certificate.
pub fn default_key_usage() -> KeyUsage {
    let flags: FlagSet<KeyUsages> = KeyUsages::KeyCertSign
        | KeyUsages::DigitalSignature
        | KeyUsages::NonRepudiation
        | KeyUsages::KeyEncipherment
        | KeyUsages::DataEncipherment;
    KeyUsage(flags)
}

/// Name and extensions of a self-signed certificate, ready for signing.
///
/// `attributes` is used for both the subject and the issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateTemplate {
    pub attributes: DistinguishedName,
    pub extensions: Vec<ExtensionParam>,
}

impl CertificateTemplate {
    /// Maps canonical options onto the name and the extension list.
    ///
    /// Extensions come out as basicConstraints, keyUsage and, when any alt
    /// names were given, subjectAltName. Alt-name values are not checked here.
    pub fn from_options(options: &GenerateOptions) -> Result<Self> {
        let attributes = DistinguishedName::from_subject(&options.subject);

        let basic_constraints = BasicConstraints {
            is_ca: true,
            max_path_length: None,
        };

        let mut extensions = vec![
            ExtensionParam::from_extension(&basic_constraints, true)?,
            ExtensionParam::from_extension(&default_key_usage(), true)?,
        ];

        if !options.subject_alt_names.is_empty() {
            let san = SubjectAltNames {
                names: options.subject_alt_names.clone(),
            };
            extensions.push(ExtensionParam::from_extension(&san, false)?);
        }

        Ok(Self {
            attributes,
            extensions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::extensions::ToAndFromX509Extension;
    use crate::options::{Subject, SubjectAltName};

    #[test]
    fn test_extension_order_with_alt_names() {
        let options = GenerateOptions::builder()
            .subject_alt_names(vec![SubjectAltName::dns("a.example.com")])
            .build();
        let template = CertificateTemplate::from_options(&options).unwrap();
        let oids: Vec<_> = template.extensions.iter().map(|ext| ext.oid).collect();
        assert_eq!(
            oids,
            [BasicConstraints::OID, KeyUsage::OID, SubjectAltNames::OID]
        );

        let bc: BasicConstraints = template.extensions[0].to_extension().unwrap();
        assert!(bc.is_ca);
        let ku: KeyUsage = template.extensions[1].to_extension().unwrap();
        assert_eq!(ku, default_key_usage());
        assert!(!ku.0.contains(KeyUsages::CRLSign));
        let san: SubjectAltNames = template.extensions[2].to_extension().unwrap();
        assert_eq!(san.names, options.subject_alt_names);
    }

    #[test]
    fn test_alt_name_extension_is_omitted_when_empty() {
        let options = GenerateOptions::builder()
            .subject(Subject::with_common_name("example.com"))
            .build();
        let template = CertificateTemplate::from_options(&options).unwrap();
        assert_eq!(template.extensions.len(), 2);
        assert!(
            template
                .extensions
                .iter()
                .all(|ext| ext.oid != SubjectAltNames::OID)
        );
        assert_eq!(template.attributes.0.len(), 1);
    }
}
