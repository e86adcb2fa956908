use std::path::PathBuf;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::{DocumentRef, LimitsConfig, TrustStore};
use super::constants::{COPY_CHUNK_SIZE, DOCUMENT_FILE_STEM, TRUST_BUNDLE_FILE_NAME};

/// Copy data from reader to writer with size limits to prevent memory exhaustion
pub fn copy_with_limits<R: std::io::Read, W: std::io::Write>(
  reader: &mut R,
  writer: &mut W,
  max_bytes: usize,
) -> EngineResult<u64> {
  let mut buffer = [0u8; COPY_CHUNK_SIZE];
  let mut total_bytes = 0usize;

  loop {
    let bytes_read = reader.read(&mut buffer)?;
    if bytes_read == 0 {
      break; // EOF reached
    }

    // Check if this chunk would exceed the limit
    let new_total = total_bytes + bytes_read;
    if new_total > max_bytes {
      return Err(EngineError::Config(
        format!("Document size limit exceeded: {} bytes (max: {})", new_total, max_bytes)
      ));
    }

    writer.write_all(&buffer[..bytes_read])?;
    total_bytes = new_total;
  }

  writer.flush()?;
  Ok(total_bytes as u64)
}

/// File name for a materialized document; PDFs keep their extension.
pub fn document_file_name(data: &[u8]) -> String {
  if data.starts_with(b"%PDF-") {
    format!("{DOCUMENT_FILE_STEM}.pdf")
  } else {
    DOCUMENT_FILE_STEM.to_string()
  }
}

/// Resolve a document to a path on disk. Byte documents are written to a
/// request-scoped temp dir, removed when the returned `TempDir` drops.
pub fn document_to_temp_path(
  document: &DocumentRef,
  limits: LimitsConfig,
) -> EngineResult<(PathBuf, Option<tempfile::TempDir>)> {
  match document {
    DocumentRef::Path(p) => Ok((p.clone(), None)),
    DocumentRef::Bytes { data } => {
      if data.len() > limits.max_in_memory_document_size {
        return Err(EngineError::Config("in-memory document too large".into()));
      }
      let dir = tempfile::tempdir()?;
      let path = dir.path().join(document_file_name(data));
      std::fs::write(&path, data)?;
      Ok((path, Some(dir)))
    }
  }
}

/// Load a document fully into memory for library-mode engines.
pub fn read_document(document: &DocumentRef, limits: LimitsConfig) -> EngineResult<Vec<u8>> {
  match document {
    DocumentRef::Bytes { data } => {
      if data.len() > limits.max_in_memory_document_size {
        return Err(EngineError::Config("in-memory document too large".into()));
      }
      Ok(data.clone())
    }
    DocumentRef::Path(p) => {
      let mut file = std::fs::File::open(p)?;
      let mut out = Vec::new();
      copy_with_limits(&mut file, &mut out, limits.max_in_memory_document_size)?;
      Ok(out)
    }
  }
}

/// Write the store's bundle to a temp dir for engines that take it on the
/// command line. The bytes are the ones parsed at load time, so the engine
/// never sees a bundle file edited after `TrustStore::load`.
pub fn trust_bundle_to_path(trust: &TrustStore) -> EngineResult<(PathBuf, tempfile::TempDir)> {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join(TRUST_BUNDLE_FILE_NAME);
  std::fs::write(&path, trust.bundle())?;
  Ok((path, dir))
}
