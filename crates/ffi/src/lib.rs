use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use firma_engine::domain::error::EngineError;
use firma_engine::domain::types as dt;
use firma_engine::{
    normalize_engine_text, validate_document, validate_document_wire, CommandEngine, SignatureVerdict,
    ValidationReport,
};

uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("{message}")]
    TrustLoad { message: String },
    #[error("{message}")]
    EngineUnavailable { message: String },
    #[error("{message}")]
    Generic { message: String },
}

impl From<EngineError> for FfiError {
    fn from(e: EngineError) -> Self {
        let message = e.to_string();
        match e {
            EngineError::TrustLoad(_) => FfiError::TrustLoad { message },
            EngineError::EngineLaunch { .. } | EngineError::EngineTimeout { .. } => {
                FfiError::EngineUnavailable { message }
            }
            _ => FfiError::Generic { message },
        }
    }
}

// ===== FFI types mirroring the public Rust API (FFI-friendly) =====

#[derive(uniffi::Enum, Debug, Clone, Copy)]
pub enum FfiRevocationPolicy { SoftFail, ForceFetch, Disabled }

impl From<FfiRevocationPolicy> for dt::RevocationPolicy {
    fn from(v: FfiRevocationPolicy) -> Self {
        match v { FfiRevocationPolicy::SoftFail => dt::RevocationPolicy::SoftFail, FfiRevocationPolicy::ForceFetch => dt::RevocationPolicy::ForceFetch, FfiRevocationPolicy::Disabled => dt::RevocationPolicy::Disabled }
    }
}

#[derive(uniffi::Enum, Debug, Clone)]
pub enum FfiDocumentRef { Path(String), Bytes(Vec<u8>) }

impl From<FfiDocumentRef> for dt::DocumentRef {
    fn from(v: FfiDocumentRef) -> Self {
        match v {
            FfiDocumentRef::Path(p) => dt::DocumentRef::Path(PathBuf::from(p)),
            FfiDocumentRef::Bytes(b) => dt::DocumentRef::Bytes { data: b },
        }
    }
}

#[derive(uniffi::Record, Debug, Clone, Copy)]
pub struct FfiLimitsConfig {
    pub max_in_memory_document_size: u64,
    pub max_engine_output_size: u64,
}

impl From<FfiLimitsConfig> for dt::LimitsConfig {
    fn from(v: FfiLimitsConfig) -> Self {
        dt::LimitsConfig {
            max_in_memory_document_size: v.max_in_memory_document_size as usize,
            max_engine_output_size: v.max_engine_output_size as usize,
        }
    }
}

impl FfiLimitsConfig {
    pub fn defaults() -> Self {
        let d = dt::LimitsConfig::defaults();
        Self {
            max_in_memory_document_size: d.max_in_memory_document_size as u64,
            max_engine_output_size: d.max_engine_output_size as u64,
        }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiCommandConfig {
    pub program: Option<String>,
    pub subcommand: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub limits: Option<FfiLimitsConfig>,
}

impl From<FfiCommandConfig> for dt::CommandConfig {
    fn from(v: FfiCommandConfig) -> Self {
        let d = dt::CommandConfig::secure_default();
        dt::CommandConfig {
            program: v.program.map(PathBuf::from).unwrap_or(d.program),
            subcommand: v.subcommand.unwrap_or(d.subcommand),
            timeout: v.timeout_secs.map(Duration::from_secs).unwrap_or(d.timeout),
            limits: v.limits.map(Into::into).unwrap_or(d.limits),
        }
    }
}

// ===== Report mappings =====

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiSignatureVerdict {
    pub field_label: String,
    pub is_valid: Option<bool>,
    pub signer_name: Option<String>,
    pub signer_id: Option<String>,
    pub signing_time: Option<String>,
    pub invalidity_reason: Option<String>,
    pub revocation_status: Option<String>,
}

impl From<SignatureVerdict> for FfiSignatureVerdict {
    fn from(v: SignatureVerdict) -> Self {
        FfiSignatureVerdict {
            field_label: v.field_label,
            is_valid: v.is_valid,
            signer_name: v.signer_name,
            signer_id: v.signer_id,
            signing_time: v.signing_time,
            invalidity_reason: v.invalidity_reason,
            revocation_status: v.revocation_status,
        }
    }
}

#[derive(uniffi::Record, Debug, Clone)]
pub struct FfiValidationReport {
    pub verdicts: Vec<FfiSignatureVerdict>,
    pub warnings: Vec<String>,
    pub overall_ok: bool,
}

impl From<ValidationReport> for FfiValidationReport {
    fn from(r: ValidationReport) -> Self {
        FfiValidationReport {
            verdicts: r.verdicts.into_iter().map(Into::into).collect(),
            warnings: r.warnings,
            overall_ok: r.overall_ok,
        }
    }
}

// ===== Trust store handle =====

/// A loaded trust store, shared by every validation made through it.
#[derive(uniffi::Object, Debug)]
pub struct FfiTrustStore {
    inner: dt::TrustStore,
}

#[uniffi::export]
impl FfiTrustStore {
    #[uniffi::constructor]
    pub fn load(
        bundle_path: String,
        policy: FfiRevocationPolicy,
        allow_fetching: bool,
    ) -> Result<Arc<Self>, FfiError> {
        let inner = dt::TrustStore::load_with(
            dt::TrustSource::Path(PathBuf::from(bundle_path)),
            dt::TrustPolicyConfig { revocation: policy.into(), allow_fetching },
        )?;
        Ok(Arc::new(Self { inner }))
    }

    /// Load the bundle from its standard deployment path.
    #[uniffi::constructor]
    pub fn load_default(policy: FfiRevocationPolicy) -> Result<Arc<Self>, FfiError> {
        let inner = dt::TrustStore::load(dt::TrustSource::default_path(), policy.into())?;
        Ok(Arc::new(Self { inner }))
    }

    #[uniffi::constructor]
    pub fn from_bytes(bundle: Vec<u8>, policy: FfiRevocationPolicy) -> Result<Arc<Self>, FfiError> {
        let inner = dt::TrustStore::load(dt::TrustSource::Bytes { data: bundle }, policy.into())?;
        Ok(Arc::new(Self { inner }))
    }

    pub fn anchor_count(&self) -> u64 {
        self.inner.anchors().len() as u64
    }

    pub fn anchor_subjects(&self) -> Vec<String> {
        self.inner.anchors().iter().map(|a| a.subject.clone()).collect()
    }
}

// ===== High-level API, mirroring Rust surface =====

#[uniffi::export]
pub fn default_limits_ffi() -> FfiLimitsConfig {
    FfiLimitsConfig::defaults()
}

#[uniffi::export]
pub fn normalize_engine_text_ffi(text: String) -> FfiValidationReport {
    normalize_engine_text(&text).into()
}

#[uniffi::export]
pub fn validate_with_command_ffi(
    document: FfiDocumentRef,
    trust: Arc<FfiTrustStore>,
    command: Option<FfiCommandConfig>,
) -> Result<FfiValidationReport, FfiError> {
    let engine = command_engine(command);
    let report = validate_document(&document.into(), &trust.inner, &engine)?;
    Ok(report.into())
}

/// Same as [`validate_with_command_ffi`], returned as the downstream JSON
/// document. Engine failures are encoded in the JSON rather than raised.
#[uniffi::export]
pub fn validate_to_json_ffi(
    document: FfiDocumentRef,
    trust: Arc<FfiTrustStore>,
    command: Option<FfiCommandConfig>,
) -> Result<String, FfiError> {
    let engine = command_engine(command);
    let wire = validate_document_wire(&document.into(), &trust.inner, &engine);
    Ok(wire.to_json()?)
}

fn command_engine(command: Option<FfiCommandConfig>) -> CommandEngine {
    match command {
        Some(cfg) => CommandEngine::new(cfg.into()),
        None => CommandEngine::secure_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_mirror_the_engine() {
        let d = dt::LimitsConfig::defaults();
        let limits = default_limits_ffi();
        assert_eq!(limits.max_in_memory_document_size, d.max_in_memory_document_size as u64);
        assert_eq!(limits.max_engine_output_size, d.max_engine_output_size as u64);
    }

    #[test]
    fn engine_errors_keep_their_category() {
        let err: FfiError = EngineError::TrustLoad("trust bundle is empty".into()).into();
        assert!(matches!(err, FfiError::TrustLoad { .. }));
        let err: FfiError = EngineError::EngineTimeout { program: "pyhanko".into(), timeout: Duration::from_secs(1) }.into();
        assert!(matches!(err, FfiError::EngineUnavailable { .. }));
    }

    #[test]
    fn text_normalization_crosses_the_boundary() {
        let report = normalize_engine_text_ffi("Field 1: Sig1\nThe signature is judged VALID\n".into());
        assert!(report.overall_ok);
        assert_eq!(report.verdicts[0].invalidity_reason.as_deref(), Some("OK"));
    }
}
