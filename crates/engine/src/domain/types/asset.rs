use std::path::PathBuf;

use super::config::EngineDefaults;

/// The document to validate.
///
/// - `Path`: an existing file; command engines read it in place.
/// - `Bytes`: in-memory content (e.g. an upload). Command engines get a
///   request-scoped temp copy that is removed when the call returns.
pub enum DocumentRef {
    Path(PathBuf),
    Bytes {
        data: Vec<u8>,
    },
}

impl std::fmt::Debug for DocumentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRef::Path(path) => f.debug_tuple("Path").field(path).finish(),
            DocumentRef::Bytes { data } => f.debug_struct("Bytes")
                .field("data_len", &data.len())
                .finish(),
        }
    }
}

/// Where the trust anchor bundle comes from.
#[derive(Clone)]
pub enum TrustSource {
    Path(PathBuf),
    /// PEM (one or more certificates) or a single DER certificate.
    Bytes {
        data: Vec<u8>,
    },
}

impl std::fmt::Debug for TrustSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            TrustSource::Bytes { data } => f.debug_struct("Bytes")
                .field("data_len", &data.len())
                .finish(),
        }
    }
}

impl TrustSource {
    /// The bundle shipped with the service deployment.
    pub fn default_path() -> Self {
        TrustSource::Path(PathBuf::from(EngineDefaults::TRUST_BUNDLE_PATH))
    }
}
