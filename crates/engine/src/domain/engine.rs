// crates/engine/src/domain/engine.rs

use super::error::EngineResult;
use super::types::{DocumentRef, EngineSignatureResult, RawEngineOutput, TrustStore};

/// Invokes the external validation engine against one document.
///
/// Implementations only transport: engine-side findings (bad signatures,
/// revoked certificates, corrupt documents) come back as output, and
/// `Err` is reserved for the engine being unreachable or timing out.
pub trait ValidationEngine: Send + Sync {
    fn validate(&self, document: &DocumentRef, trust: &TrustStore) -> EngineResult<RawEngineOutput>;
}

/// An engine callable in-process, returning one result per embedded signature.
pub trait SignatureBackend: Send + Sync {
    fn validate_signatures(
        &self,
        document: &[u8],
        trust: &TrustStore,
    ) -> EngineResult<Vec<EngineSignatureResult>>;
}

impl<F> SignatureBackend for F
where
    F: Fn(&[u8], &TrustStore) -> EngineResult<Vec<EngineSignatureResult>> + Send + Sync,
{
    fn validate_signatures(
        &self,
        document: &[u8],
        trust: &TrustStore,
    ) -> EngineResult<Vec<EngineSignatureResult>> {
        self(document, trust)
    }
}
