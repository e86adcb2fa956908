use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::report::SignatureVerdict;
use crate::domain::types::SubjectAttribute;

// Human-friendly ("Common Name: X") and RFC 4514-like ("commonName=X") spellings.
static COMMON_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Common Name:\s*|\bcommonName=|\bCN=)([^,]+)").expect("common name pattern")
});
static SUBJECT_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:Serial Number:\s*|\bserialNumber=)CPF-([\d-]+)").expect("subject id pattern")
});
static ID_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CPF-([\d-]+)").expect("id value pattern"));

/// Signer name and identifier pulled out of a certificate subject.
/// Either component may be missing independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerIdentity {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl SignerIdentity {
    /// Parse a rendered subject such as
    /// `Common Name: Jane Doe, Serial Number: CPF-123-456`.
    pub fn from_subject_text(subject: &str) -> Self {
        let name = COMMON_NAME_RE
            .captures(subject)
            .and_then(|c| non_empty(c.get(1)?.as_str()));
        let id = SUBJECT_ID_RE
            .captures(subject)
            .and_then(|c| non_empty(c.get(1)?.as_str()));
        Self { name, id }
    }

    /// Pick the name and identifier out of structured subject attributes.
    /// Keys are matched loosely (`commonName`, `Common Name`, `CN`, `2.5.4.3`).
    pub fn from_attributes(attributes: &[SubjectAttribute]) -> Self {
        let mut identity = Self::default();
        for attr in attributes {
            match normalized_key(&attr.key).as_str() {
                "commonname" | "cn" | "2.5.4.3" => {
                    if let Some(name) = non_empty(&attr.value) {
                        identity.name = Some(name);
                    }
                }
                "serialnumber" | "2.5.4.5" => {
                    if let Some(id) = ID_VALUE_RE
                        .captures(&attr.value)
                        .and_then(|c| non_empty(c.get(1)?.as_str()))
                    {
                        identity.id = Some(id);
                    }
                }
                _ => {}
            }
        }
        identity
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.id.is_none()
    }

    /// Overwrite only the components that are present.
    pub fn merge_into(self, verdict: &mut SignatureVerdict) {
        if let Some(name) = self.name {
            verdict.signer_name = Some(name);
        }
        if let Some(id) = self.id {
            verdict.signer_id = Some(id);
        }
    }
}

fn normalized_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn non_empty(value: &str) -> Option<String> {
    // Engines often quote the whole rendered subject.
    let value = value.trim().trim_matches('"').trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_friendly_subject() {
        let id = SignerIdentity::from_subject_text(
            "Common Name: Jane Doe, Serial Number: CPF-123-456, Country: CR",
        );
        assert_eq!(id.name.as_deref(), Some("Jane Doe"));
        assert_eq!(id.id.as_deref(), Some("123-456"));
    }

    #[test]
    fn rfc4514_like_subject() {
        let id = SignerIdentity::from_subject_text("serialNumber=CPF-01-0234-0567,commonName=JUAN PEREZ (FIRMA)");
        assert_eq!(id.name.as_deref(), Some("JUAN PEREZ (FIRMA)"));
        assert_eq!(id.id.as_deref(), Some("01-0234-0567"));
    }

    #[test]
    fn serial_without_jurisdiction_prefix_is_not_an_id() {
        let id = SignerIdentity::from_subject_text("Common Name: Jane, Serial Number: 998877");
        assert_eq!(id.name.as_deref(), Some("Jane"));
        assert!(id.id.is_none());
    }

    #[test]
    fn attributes_with_assorted_key_spellings() {
        let attrs = vec![
            SubjectAttribute::new("2.5.4.5", "CPF-111-222"),
            SubjectAttribute::new("Common Name", " Ana Mora "),
            SubjectAttribute::new("organizationName", "Ministerio"),
        ];
        let id = SignerIdentity::from_attributes(&attrs);
        assert_eq!(id.name.as_deref(), Some("Ana Mora"));
        assert_eq!(id.id.as_deref(), Some("111-222"));
    }

    #[test]
    fn merge_keeps_existing_fields_for_absent_components() {
        let mut verdict = SignatureVerdict::new("Sig1");
        verdict.signer_id = Some("123".into());
        SignerIdentity { name: Some("Jane".into()), id: None }.merge_into(&mut verdict);
        assert_eq!(verdict.signer_name.as_deref(), Some("Jane"));
        assert_eq!(verdict.signer_id.as_deref(), Some("123"));
    }
}
