// crates/engine/src/domain/report.rs
use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use super::types::EngineDefaults;

/// Normalized outcome for one signature field.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct SignatureVerdict {
    /// The document's name for this signature field.
    pub field_label: String,
    /// `None` when the engine never asserted a verdict for this field.
    pub is_valid: Option<bool>,
    pub signer_name: Option<String>,
    /// Jurisdiction-specific identifier taken from the certificate subject.
    pub signer_id: Option<String>,
    pub signing_time: Option<String>,
    /// `"OK"` when valid; the engine's explanation otherwise.
    pub invalidity_reason: Option<String>,
    pub revocation_status: Option<String>,
}

impl SignatureVerdict {
    pub fn new(field_label: impl Into<String>) -> Self {
        Self {
            field_label: field_label.into(),
            ..Self::default()
        }
    }
}

/// Aggregate result of validating one document.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// One entry per signature field, in engine order.
    pub verdicts: Vec<SignatureVerdict>,
    /// Diagnostics not attributable to any signature field.
    pub warnings: Vec<String>,
    /// True when at least one signature field was found, whatever its validity.
    pub overall_ok: bool,
}

impl ValidationReport {
    pub fn new(verdicts: Vec<SignatureVerdict>, warnings: Vec<String>) -> Self {
        let overall_ok = !verdicts.is_empty();
        Self { verdicts, warnings, overall_ok }
    }

    /// Map to the downstream wire shape, filling unset fields with the sentinel.
    pub fn to_wire(&self) -> WireReport {
        WireReport {
            firmas: self.verdicts.iter().map(WireSignature::from).collect(),
            warnings: self.warnings.clone(),
            ok: self.overall_ok,
            error: None,
        }
    }

    pub fn to_json(&self) -> EngineResult<String> {
        self.to_wire().to_json()
    }
}

/// Wire representation consumed by the HTTP layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WireReport {
    pub firmas: Vec<WireSignature>,
    pub warnings: Vec<String>,
    pub ok: bool,
    /// Present only when the request failed before a report could be built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WireReport {
    /// The failure shape: no signatures, `ok = false`, and the error message.
    pub fn from_error(err: &EngineError) -> Self {
        Self {
            firmas: Vec::new(),
            warnings: Vec::new(),
            ok: false,
            error: Some(err.to_string()),
        }
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WireSignature {
    pub firma_valida: Option<bool>,
    pub datos: WireSignatureData,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WireSignatureData {
    pub razon_invalidez: String,
    pub nombre: String,
    pub cedula: String,
    pub fecha_firma: String,
}

impl From<&SignatureVerdict> for WireSignature {
    fn from(v: &SignatureVerdict) -> Self {
        let or_sentinel = |field: &Option<String>| {
            field
                .clone()
                .unwrap_or_else(|| EngineDefaults::NOT_AVAILABLE.to_string())
        };
        WireSignature {
            firma_valida: v.is_valid,
            datos: WireSignatureData {
                razon_invalidez: or_sentinel(&v.invalidity_reason),
                nombre: or_sentinel(&v.signer_name),
                cedula: or_sentinel(&v.signer_id),
                fecha_firma: or_sentinel(&v.signing_time),
            },
        }
    }
}
