use chrono::Local;

use crate::domain::report::{SignatureVerdict, ValidationReport};
use crate::domain::types::{EngineDefaults, EngineSignatureResult, RevocationFinding, Validity};
use super::subject::SignerIdentity;
use super::{
    NOT_REVOKED_STATUS, REVOCATION_UNDETERMINED_STATUS, REVOKED_STATUS, SIGNING_TIME_FORMAT,
};

/// Map library-mode results 1:1 onto verdicts, preserving engine order.
/// Structured results carry no unattributed diagnostics, so warnings stay empty.
pub fn normalize_structured(results: Vec<EngineSignatureResult>) -> ValidationReport {
    let verdicts = results
        .into_iter()
        .enumerate()
        .map(|(i, result)| verdict_from_result(i + 1, result))
        .collect();
    ValidationReport::new(verdicts, Vec::new())
}

fn verdict_from_result(position: usize, result: EngineSignatureResult) -> SignatureVerdict {
    let label = result
        .field_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| format!("Signature {position}"));
    let mut verdict = SignatureVerdict::new(label);

    verdict.is_valid = result.validity.as_verdict();
    verdict.invalidity_reason = Some(match result.validity {
        Validity::Valid => EngineDefaults::VALID_REASON.to_string(),
        Validity::Invalid | Validity::Indeterminate => result.summary,
    });

    // No path means no certificate could be attributed; identity stays unset.
    if let Some(path) = &result.path {
        SignerIdentity::from_attributes(&path.leaf_subject).merge_into(&mut verdict);
    }

    verdict.signing_time = result
        .signing_time
        .map(|ts| ts.with_timezone(&Local).format(SIGNING_TIME_FORMAT).to_string());
    verdict.revocation_status = revocation_status(&result.revocation).map(str::to_string);
    verdict
}

/// A revoked finding outranks an undetermined one, which outranks good.
fn revocation_status(findings: &[RevocationFinding]) -> Option<&'static str> {
    if findings.iter().any(|f| matches!(f, RevocationFinding::Revoked { .. })) {
        Some(REVOKED_STATUS)
    } else if findings.iter().any(|f| matches!(f, RevocationFinding::Undetermined { .. })) {
        Some(REVOCATION_UNDETERMINED_STATUS)
    } else if findings.is_empty() {
        None
    } else {
        Some(NOT_REVOKED_STATUS)
    }
}
