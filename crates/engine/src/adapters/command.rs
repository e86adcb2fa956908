// adapters/command.rs

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::domain::engine::ValidationEngine;
use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::{CommandConfig, DocumentRef, RawEngineOutput, RevocationPolicy, TrustStore};
use super::constants::{
  FLAG_FORCE_REVINFO, FLAG_NO_DIFF_ANALYSIS, FLAG_NO_REVOCATION_CHECK, FLAG_NO_STRICT_SYNTAX,
  FLAG_PRETTY_PRINT, FLAG_SOFT_REVOCATION_CHECK, FLAG_TRUST,
};
use super::document::{document_to_temp_path, trust_bundle_to_path};
use super::runtime::run_on_current_thread;

/// Runs the validation engine as an external process and returns its
/// combined diagnostic text, uninterpreted.
#[derive(Debug, Clone, Default)]
pub struct CommandEngine {
  config: CommandConfig,
}

impl CommandEngine {
  pub fn new(config: CommandConfig) -> Self {
    Self { config }
  }

  pub fn secure_default() -> Self {
    Self::new(CommandConfig::secure_default())
  }

  pub fn config(&self) -> &CommandConfig {
    &self.config
  }

  /// Arguments for one run, subcommand first and the document last.
  pub fn build_args(
    &self,
    document: &Path,
    trust_bundle: &Path,
    policy: RevocationPolicy,
  ) -> Vec<OsString> {
    let mut args: Vec<OsString> = self.config.subcommand.iter().map(OsString::from).collect();
    args.push(FLAG_NO_DIFF_ANALYSIS.into());
    args.push(revocation_flag(policy).into());
    args.push(FLAG_TRUST.into());
    args.push(trust_bundle.as_os_str().to_os_string());
    args.push(FLAG_NO_STRICT_SYNTAX.into());
    args.push(FLAG_PRETTY_PRINT.into());
    args.push(document.as_os_str().to_os_string());
    args
  }
}

pub fn revocation_flag(policy: RevocationPolicy) -> &'static str {
  match policy {
    RevocationPolicy::SoftFail => FLAG_SOFT_REVOCATION_CHECK,
    RevocationPolicy::ForceFetch => FLAG_FORCE_REVINFO,
    RevocationPolicy::Disabled => FLAG_NO_REVOCATION_CHECK,
  }
}

/// stdout, a newline, then stderr; invalid UTF-8 is replaced, not rejected.
pub fn combine_streams(stdout: &[u8], stderr: &[u8]) -> String {
  format!(
    "{}\n{}",
    String::from_utf8_lossy(stdout),
    String::from_utf8_lossy(stderr)
  )
}

impl ValidationEngine for CommandEngine {
  fn validate(&self, document: &DocumentRef, trust: &TrustStore) -> EngineResult<RawEngineOutput> {
    // Temp dirs must outlive the process run.
    let (doc_path, _doc_tmp) = document_to_temp_path(document, self.config.limits)?;
    let (trust_path, _trust_tmp) = trust_bundle_to_path(trust)?;
    let args = self.build_args(&doc_path, &trust_path, trust.policy());

    let text = run_on_current_thread(run_engine(
      &self.config.program,
      args,
      self.config.timeout,
      self.config.limits.max_engine_output_size,
    ))?;
    Ok(RawEngineOutput::Text(text))
  }
}

async fn run_engine(
  program: &Path,
  args: Vec<OsString>,
  timeout: Duration,
  max_output: usize,
) -> EngineResult<String> {
  let program_name = program.display().to_string();
  tracing::debug!(program = %program_name, ?args, "launching validation engine");

  let mut cmd = tokio::process::Command::new(program);
  cmd.args(&args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

  let mut child = cmd.spawn().map_err(|source| EngineError::EngineLaunch {
    program: program_name.clone(),
    source,
  })?;
  let stdout = child.stdout.take();
  let stderr = child.stderr.take();

  // The first stream to cross the cap, or the timeout, abandons the run;
  // `child` then drops and is killed, and partial output is discarded.
  let run = async {
    tokio::try_join!(
      read_capped(stdout, max_output),
      read_capped(stderr, max_output),
      async { child.wait().await.map_err(EngineError::from) },
    )
  };
  let (out, err, status) = match tokio::time::timeout(timeout, run).await {
    Ok(Ok(captured)) => captured,
    Ok(Err(e)) => {
      tracing::warn!(program = %program_name, error = %e, "validation engine run aborted");
      return Err(e);
    }
    Err(_) => {
      tracing::warn!(program = %program_name, ?timeout, "validation engine timed out");
      return Err(EngineError::EngineTimeout { program: program_name, timeout });
    }
  };

  // A non-zero exit is part of the diagnostics, not a transport failure.
  tracing::debug!(program = %program_name, ?status, "validation engine finished");

  let captured = out.len() + err.len();
  if captured > max_output {
    return Err(output_limit_exceeded(captured, max_output));
  }

  Ok(combine_streams(&out, &err))
}

/// Read a pipe to EOF, giving up once more than `max` bytes arrive.
async fn read_capped<R>(pipe: Option<R>, max: usize) -> EngineResult<Vec<u8>>
where
  R: AsyncRead + Unpin,
{
  let mut buf = Vec::new();
  if let Some(pipe) = pipe {
    let mut limited = pipe.take((max as u64).saturating_add(1));
    limited.read_to_end(&mut buf).await?;
  }
  if buf.len() > max {
    return Err(output_limit_exceeded(buf.len(), max));
  }
  Ok(buf)
}

fn output_limit_exceeded(captured: usize, max: usize) -> EngineError {
  EngineError::Config(format!(
    "engine output size limit exceeded: at least {} bytes (max: {})",
    captured, max
  ))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  #[test]
  fn args_follow_engine_contract() {
    let engine = CommandEngine::secure_default();
    let args = engine.build_args(
      Path::new("/tmp/doc.pdf"),
      Path::new("/app/bundle.pem"),
      RevocationPolicy::SoftFail,
    );
    let args: Vec<String> = args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(
      args,
      vec![
        "sign", "validate", "--no-diff-analysis", "--soft-revocation-check",
        "--trust", "/app/bundle.pem", "--no-strict-syntax", "--pretty-print", "/tmp/doc.pdf",
      ]
    );
  }

  #[test]
  fn revocation_flag_tracks_policy() {
    assert_eq!(revocation_flag(RevocationPolicy::ForceFetch), "--force-revinfo");
    assert_eq!(revocation_flag(RevocationPolicy::Disabled), "--no-revocation-check");
  }

  #[test]
  fn custom_program_keeps_its_subcommand() {
    let mut cfg = CommandConfig::secure_default();
    cfg.program = PathBuf::from("/opt/engine/bin/validate");
    cfg.subcommand = vec![];
    let engine = CommandEngine::new(cfg);
    let args = engine.build_args(Path::new("d"), Path::new("t"), RevocationPolicy::Disabled);
    assert_eq!(args.first().map(|a| a.to_string_lossy().into_owned()).as_deref(), Some("--no-diff-analysis"));
  }

  #[test]
  fn capped_reads_stop_past_the_limit() {
    let res = run_on_current_thread(read_capped(Some(&b"0123456789"[..]), 4));
    assert!(res.unwrap_err().to_string().contains("output size limit"));

    let res = run_on_current_thread(read_capped(Some(&b"0123"[..]), 4));
    assert_eq!(res.unwrap(), b"0123");

    let res = run_on_current_thread(read_capped(None::<&[u8]>, 4));
    assert!(res.unwrap().is_empty());
  }

  #[test]
  fn streams_are_joined_with_a_newline() {
    assert_eq!(combine_streams(b"out", b"err"), "out\nerr");
    assert_eq!(combine_streams(b"", b""), "\n");
  }
}
