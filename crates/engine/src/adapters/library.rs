// adapters/library.rs

use crate::domain::engine::{SignatureBackend, ValidationEngine};
use crate::domain::error::EngineResult;
use crate::domain::types::{DocumentRef, LimitsConfig, RawEngineOutput, TrustStore};
use super::document::read_document;
use super::runtime::catch_engine_panic;

/// Wraps an in-process [`SignatureBackend`] so it can stand in wherever a
/// [`ValidationEngine`] is expected.
#[derive(Debug, Clone)]
pub struct LibraryEngine<B> {
  backend: B,
  limits: LimitsConfig,
}

impl<B: SignatureBackend> LibraryEngine<B> {
  pub fn new(backend: B) -> Self {
    Self { backend, limits: LimitsConfig::defaults() }
  }

  pub fn with_limits(backend: B, limits: LimitsConfig) -> Self {
    Self { backend, limits }
  }

  pub fn backend(&self) -> &B {
    &self.backend
  }
}

impl<B: SignatureBackend> ValidationEngine for LibraryEngine<B> {
  fn validate(&self, document: &DocumentRef, trust: &TrustStore) -> EngineResult<RawEngineOutput> {
    let bytes = read_document(document, self.limits)?;
    let results = catch_engine_panic(|| self.backend.validate_signatures(&bytes, trust))?;
    if results.is_empty() {
      tracing::debug!("library engine found no signatures");
    }
    Ok(RawEngineOutput::Structured(results))
  }
}
