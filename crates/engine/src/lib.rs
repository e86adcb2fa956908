// crates/engine/src/lib.rs

//! Public facade for the Firma engine.
//! Exposes a stable API and re-exports types for consumers (HTTP layer, FFI).

pub mod adapters;
pub mod crypto;
pub mod domain;

use domain::error::EngineResult;

/// Validate one document with the given engine and normalize what it reports.
///
/// Fails only when the engine could not be run (launch failure, timeout,
/// limits); invalid or revoked signatures come back as verdicts.
pub fn validate_document(
    document: &DocumentRef,
    trust: &TrustStore,
    engine: &dyn ValidationEngine,
) -> EngineResult<ValidationReport> {
    let raw = engine.validate(document, trust)?;
    Ok(domain::normalizer::normalize(raw))
}

/// Like [`validate_document`], but always produces the downstream wire shape,
/// carrying the error message when the engine could not be run.
pub fn validate_document_wire(
    document: &DocumentRef,
    trust: &TrustStore,
    engine: &dyn ValidationEngine,
) -> WireReport {
    match validate_document(document, trust, engine) {
        Ok(report) => report.to_wire(),
        Err(e) => {
            tracing::warn!(error = %e, "document validation failed");
            WireReport::from_error(&e)
        }
    }
}

/// Normalize diagnostic text captured from an engine run elsewhere.
pub fn normalize_engine_text(text: &str) -> ValidationReport {
    domain::normalizer::normalize_text(text)
}

// Re-exports for convenience
pub use adapters::{CommandEngine, LibraryEngine};
pub use crypto::anchors::TrustAnchor;
pub use domain::engine::{SignatureBackend, ValidationEngine};
pub use domain::error::EngineError;
pub use domain::normalizer::normalize;
pub use domain::report::{SignatureVerdict, ValidationReport, WireReport};
pub use domain::types::{
    CertificatePath, CommandConfig, DocumentRef, EngineDefaults, EngineSignatureResult,
    LimitsConfig, RawEngineOutput, RevocationFinding, RevocationPolicy, SubjectAttribute,
    TrustPolicyConfig, TrustSource, TrustStore, Validity,
};
