//! Turns raw engine output into a [`ValidationReport`].
//!
//! Both engine representations end up here: structured results map 1:1 to
//! verdicts, diagnostic text goes through the line scanner in [`text`].
//! Normalization is total; any input yields a well-formed report.

mod line_shape;
mod structured;
mod subject;
mod text;

pub use line_shape::{classify, LineEvent};
pub use structured::normalize_structured;
pub use subject::SignerIdentity;
pub use text::{normalize_text, TextNormalizer};

use super::report::ValidationReport;
use super::types::RawEngineOutput;

// Revocation wording surfaced to the wire contract.
pub const REVOKED_STATUS: &str = "Certificado revocado";
pub const REVOKED_REASON: &str = "El certificado del firmante ha sido revocado";
pub const REVOCATION_UNDETERMINED_STATUS: &str = "Estado de revocación no verificado";
pub const REVOCATION_UNDETERMINED_REASON: &str =
    "No se pudo validar la información de revocación del certificado";
pub const NOT_REVOKED_STATUS: &str = "No revocado";

/// Format used for signing times taken from structured results.
pub const SIGNING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn normalize(output: RawEngineOutput) -> ValidationReport {
    let report = match output {
        RawEngineOutput::Structured(results) => normalize_structured(results),
        RawEngineOutput::Text(text) => normalize_text(&text),
    };
    tracing::debug!(
        verdicts = report.verdicts.len(),
        warnings = report.warnings.len(),
        "engine output normalized"
    );
    report
}
