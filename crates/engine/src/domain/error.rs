// crates/engine/src/domain/error.rs
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  /// The trust bundle is missing, empty, or holds no parseable certificate.
  #[error("trust store: {0}")]
  TrustLoad(String),

  /// The validation engine could not be started at all.
  #[error("failed to launch validation engine `{program}`: {source}")]
  EngineLaunch {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The engine exceeded its time bound and was terminated.
  #[error("validation engine `{program}` timed out after {timeout:?}")]
  EngineTimeout { program: String, timeout: Duration },

  /// A library-mode engine reported a failure it could not turn into results.
  #[error("validation engine failure: {0}")]
  Backend(String),

  #[error("configuration: {0}")]
  Config(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("feature not enabled: {0}")]
  Feature(&'static str),

  // Useful when we catch_unwind around library engines.
  #[error("internal panic: {0}")]
  Panic(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
