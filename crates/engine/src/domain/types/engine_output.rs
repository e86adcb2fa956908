use chrono::{DateTime, Utc};

/// Overall outcome an engine assigns to one embedded signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
    Indeterminate,
}

impl Validity {
    /// `None` means the engine did not commit to a verdict.
    pub fn as_verdict(self) -> Option<bool> {
        match self {
            Validity::Valid => Some(true),
            Validity::Invalid => Some(false),
            Validity::Indeterminate => None,
        }
    }
}

/// What the engine learned about the signer certificate's revocation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationFinding {
    Good,
    Revoked { detail: Option<String> },
    /// Revocation information was missing or could not be validated.
    Undetermined { detail: Option<String> },
}

/// One relative distinguished name component of a certificate subject,
/// e.g. `("commonName", "Jane Doe")` or `("2.5.4.5", "CPF-123-456")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAttribute {
    pub key: String,
    pub value: String,
}

impl SubjectAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// A certificate path the engine managed to validate for a signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificatePath {
    /// Subject of the signer (leaf) certificate.
    pub leaf_subject: Vec<SubjectAttribute>,
}

/// Per-signature result produced by a library-mode engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSignatureResult {
    /// The document's name for the signature field, when the engine knows it.
    pub field_name: Option<String>,
    pub validity: Validity,
    /// Human-readable summary; used as the invalidity reason when not valid.
    pub summary: String,
    /// `None` when no validated chain could be attached to the signature.
    pub path: Option<CertificatePath>,
    pub signing_time: Option<DateTime<Utc>>,
    pub revocation: Vec<RevocationFinding>,
}

impl EngineSignatureResult {
    pub fn new(validity: Validity, summary: impl Into<String>) -> Self {
        Self {
            field_name: None,
            validity,
            summary: summary.into(),
            path: None,
            signing_time: None,
            revocation: Vec::new(),
        }
    }
}

/// Whatever an engine adapter hands back before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEngineOutput {
    Structured(Vec<EngineSignatureResult>),
    /// Combined diagnostic text: stdout, a newline, then stderr.
    Text(String),
}
