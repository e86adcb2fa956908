//! Single-pass scanner over an engine's combined diagnostic text.
//!
//! States are `NoRecordOpen` and `RecordOpen`. A field header always
//! finalizes the open record (if any) and opens a fresh one; lines seen
//! before the first header become warnings; recognized lines inside a
//! record overwrite its fields (last write wins); anything else is dropped.

use crate::domain::report::{SignatureVerdict, ValidationReport};
use crate::domain::types::EngineDefaults;
use super::line_shape::{classify, LineEvent};
use super::{
    REVOCATION_UNDETERMINED_REASON, REVOCATION_UNDETERMINED_STATUS, REVOKED_REASON,
    REVOKED_STATUS,
};

enum ScanState {
    NoRecordOpen,
    RecordOpen(OpenRecord),
}

struct OpenRecord {
    verdict: SignatureVerdict,
    /// Last VALID/INVALID line, used as the reason for an invalid verdict.
    judgement: Option<String>,
}

impl OpenRecord {
    fn new(label: String) -> Self {
        Self { verdict: SignatureVerdict::new(label), judgement: None }
    }

    fn apply(&mut self, event: LineEvent, line: &str) {
        let v = &mut self.verdict;
        match event {
            LineEvent::SetValid => {
                v.is_valid = Some(true);
                self.judgement = Some(line.trim().to_string());
            }
            LineEvent::SetInvalid => {
                v.is_valid = Some(false);
                self.judgement = Some(line.trim().to_string());
            }
            LineEvent::SetSubject(identity) => identity.merge_into(v),
            LineEvent::SetTime(time) => v.signing_time = Some(time),
            LineEvent::SetRevoked => {
                v.revocation_status = Some(REVOKED_STATUS.to_string());
                v.invalidity_reason = Some(REVOKED_REASON.to_string());
            }
            LineEvent::SetRevocationUndetermined => {
                v.revocation_status = Some(REVOCATION_UNDETERMINED_STATUS.to_string());
                v.invalidity_reason = Some(REVOCATION_UNDETERMINED_REASON.to_string());
            }
            LineEvent::OpenRecord { .. } | LineEvent::Unrecognized => {}
        }
    }

    fn finalize(self) -> SignatureVerdict {
        let mut verdict = self.verdict;
        if verdict.invalidity_reason.is_none() {
            verdict.invalidity_reason = match verdict.is_valid {
                Some(true) => Some(EngineDefaults::VALID_REASON.to_string()),
                Some(false) => self.judgement,
                None => None,
            };
        }
        verdict
    }
}

/// Incremental form of [`normalize_text`]; feed lines, then call `finish`.
/// Use one instance per validation.
pub struct TextNormalizer {
    state: ScanState,
    verdicts: Vec<SignatureVerdict>,
    warnings: Vec<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            state: ScanState::NoRecordOpen,
            verdicts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        let event = classify(line);

        if let LineEvent::OpenRecord { label } = event {
            self.finalize_open_record();
            tracing::trace!(label = %label, "signature record opened");
            self.state = ScanState::RecordOpen(OpenRecord::new(label));
            return;
        }

        match &mut self.state {
            ScanState::NoRecordOpen => {
                if !line.trim().is_empty() {
                    self.warnings.push(line.to_string());
                }
            }
            ScanState::RecordOpen(record) => record.apply(event, line),
        }
    }

    pub fn finish(mut self) -> ValidationReport {
        self.finalize_open_record();
        ValidationReport::new(self.verdicts, self.warnings)
    }

    fn finalize_open_record(&mut self) {
        if let ScanState::RecordOpen(record) =
            std::mem::replace(&mut self.state, ScanState::NoRecordOpen)
        {
            self.verdicts.push(record.finalize());
        }
    }
}

/// Normalize the combined diagnostic text of one engine run.
pub fn normalize_text(text: &str) -> ValidationReport {
    let mut normalizer = TextNormalizer::new();
    for line in text.lines() {
        normalizer.push_line(line);
    }
    normalizer.finish()
}
