//! Classification of single diagnostic lines into scanner events.
//! Matchers run in a fixed order and the first hit wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::subject::SignerIdentity;

static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*Field\s+\d+\s*:\s*(.*?)\s*$").expect("field pattern"));
static JUDGEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bjudged\s+(VALID|INVALID)\b").expect("judgement pattern"));
static REVOCATION_UNDETERMINED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\brevocation\b.*\b(?:could not|couldn't|cannot|unable to)\b.*\b(?:validated?|checked?|determined?|verified|verify)\b",
        r"|(?i)\b(?:could not|couldn't|unable to|failed to)\s+(?:validate|check|verify|determine)\b.*\brevocation\b",
    ))
    .expect("revocation pattern")
});

const SUBJECT_PREFIX: &str = "Certificate subject:";
const SIGNING_TIME_PREFIX: &str = "Signing time as reported by signer:";
const REVOKED_MARKER: &str = "REVOKED";

/// What a single line means to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// `Field <n>: <label>` starts a new signature record.
    OpenRecord { label: String },
    SetValid,
    SetInvalid,
    SetSubject(SignerIdentity),
    SetTime(String),
    SetRevoked,
    SetRevocationUndetermined,
    Unrecognized,
}

type LineMatcher = fn(&str) -> Option<LineEvent>;

const LINE_SHAPES: &[LineMatcher] = &[
    field_header,
    certificate_subject,
    signing_time,
    revoked,
    revocation_undetermined,
    judgement,
];

pub fn classify(line: &str) -> LineEvent {
    LINE_SHAPES
        .iter()
        .find_map(|shape| shape(line))
        .unwrap_or(LineEvent::Unrecognized)
}

fn field_header(line: &str) -> Option<LineEvent> {
    let caps = FIELD_RE.captures(line)?;
    Some(LineEvent::OpenRecord { label: caps[1].to_string() })
}

fn certificate_subject(line: &str) -> Option<LineEvent> {
    let subject = line.trim_start().strip_prefix(SUBJECT_PREFIX)?;
    Some(LineEvent::SetSubject(SignerIdentity::from_subject_text(subject)))
}

fn signing_time(line: &str) -> Option<LineEvent> {
    let line = line.trim_start();
    if !line.starts_with(SIGNING_TIME_PREFIX) {
        return None;
    }
    // Everything after the first ": ", so times like "10:00:00" stay whole.
    let value = line.split_once(": ").map(|(_, v)| v.trim()).unwrap_or_default();
    if value.is_empty() {
        return Some(LineEvent::Unrecognized);
    }
    Some(LineEvent::SetTime(value.to_string()))
}

fn revoked(line: &str) -> Option<LineEvent> {
    line.contains(REVOKED_MARKER).then_some(LineEvent::SetRevoked)
}

fn revocation_undetermined(line: &str) -> Option<LineEvent> {
    REVOCATION_UNDETERMINED_RE
        .is_match(line)
        .then_some(LineEvent::SetRevocationUndetermined)
}

fn judgement(line: &str) -> Option<LineEvent> {
    let caps = JUDGEMENT_RE.captures(line)?;
    match &caps[1] {
        "VALID" => Some(LineEvent::SetValid),
        _ => Some(LineEvent::SetInvalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_header_captures_label() {
        assert_eq!(
            classify("Field 1: Signature1"),
            LineEvent::OpenRecord { label: "Signature1".into() }
        );
        assert_eq!(
            classify("  Field 12:   Firma del director  "),
            LineEvent::OpenRecord { label: "Firma del director".into() }
        );
    }

    #[test]
    fn field_word_inside_prose_is_not_a_header() {
        assert_eq!(classify("Signature Field 1: missing"), LineEvent::Unrecognized);
    }

    #[test]
    fn judgement_distinguishes_invalid_from_valid() {
        assert_eq!(classify("The signature is judged VALID."), LineEvent::SetValid);
        assert_eq!(classify("The signature is judged INVALID."), LineEvent::SetInvalid);
    }

    #[test]
    fn signing_time_keeps_colons_in_value() {
        assert_eq!(
            classify("Signing time as reported by signer: 2024-01-02T10:00:00+00:00"),
            LineEvent::SetTime("2024-01-02T10:00:00+00:00".into())
        );
    }

    #[test]
    fn empty_signing_time_is_ignored() {
        assert_eq!(classify("Signing time as reported by signer:"), LineEvent::Unrecognized);
    }

    #[test]
    fn subject_line_yields_partial_identity() {
        match classify("Certificate subject: Common Name: Jane Doe") {
            LineEvent::SetSubject(id) => {
                assert_eq!(id.name.as_deref(), Some("Jane Doe"));
                assert!(id.id.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn revocation_markers() {
        assert_eq!(classify("The signer's certificate is REVOKED."), LineEvent::SetRevoked);
        assert_eq!(
            classify("Revocation data could not be validated."),
            LineEvent::SetRevocationUndetermined
        );
        assert_eq!(
            classify("Failed to validate revocation status of the signer"),
            LineEvent::SetRevocationUndetermined
        );
    }

    #[test]
    fn prose_is_unrecognized() {
        assert_eq!(classify("Bottom line: this needs a closer look"), LineEvent::Unrecognized);
        assert_eq!(classify(""), LineEvent::Unrecognized);
    }
}
