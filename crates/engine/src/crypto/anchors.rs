//! Trust anchor bundle parsing.
//! The engine only checks that anchors are loadable; path building and
//! signature math stay with the external validation engine.

use crate::domain::error::{EngineError, EngineResult};

/// One trusted root certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchor {
    /// DER encoding, handed to library-mode engines as-is.
    pub der: Vec<u8>,
    /// Subject rendered as `SN=value` pairs, e.g. `CN=Root CA,O=Example`.
    pub subject: String,
}

const PEM_MARKER: &[u8] = b"-----BEGIN";

/// Parse a PEM bundle (any number of certificates) or a single DER certificate.
///
/// Returns an empty list when the input holds no certificate at all; a
/// malformed certificate is reported as [`EngineError::TrustLoad`].
pub fn parse_trust_bundle(bundle: &[u8]) -> EngineResult<Vec<TrustAnchor>> {
    #[cfg(not(feature = "openssl"))]
    {
        let _ = bundle;
        return Err(EngineError::Feature("openssl"));
    }
    #[cfg(feature = "openssl")]
    {
        use openssl::x509::X509;

        let certs = if contains_pem_marker(bundle) {
            X509::stack_from_pem(bundle)
                .map_err(|e| EngineError::TrustLoad(format!("invalid PEM certificate: {e}")))?
        } else {
            match X509::from_der(bundle) {
                Ok(cert) => vec![cert],
                Err(_) => Vec::new(),
            }
        };

        certs.iter().map(to_anchor).collect()
    }
}

fn contains_pem_marker(bundle: &[u8]) -> bool {
    bundle.windows(PEM_MARKER.len()).any(|w| w == PEM_MARKER)
}

#[cfg(feature = "openssl")]
fn to_anchor(cert: &openssl::x509::X509) -> EngineResult<TrustAnchor> {
    let der = cert
        .to_der()
        .map_err(|e| EngineError::TrustLoad(format!("cannot encode certificate: {e}")))?;

    let subject = cert
        .subject_name()
        .entries()
        .filter_map(|entry| {
            let key = entry.object().nid().short_name().ok()?;
            let value = entry.data().as_utf8().ok()?;
            Some(format!("{key}={}", &*value))
        })
        .collect::<Vec<_>>()
        .join(",");

    Ok(TrustAnchor { der, subject })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pem_marker_detection() {
        assert!(contains_pem_marker(b"junk\n-----BEGIN CERTIFICATE-----\n"));
        assert!(!contains_pem_marker(b"\x30\x82\x01\x0a"));
    }

    #[cfg(feature = "openssl")]
    #[test]
    fn garbage_without_marker_yields_no_anchors() {
        let anchors = parse_trust_bundle(b"definitely not a certificate").unwrap();
        assert!(anchors.is_empty());
    }
}
