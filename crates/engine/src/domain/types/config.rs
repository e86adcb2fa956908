use std::path::PathBuf;
use std::time::Duration;

use super::trust::RevocationPolicy;

/// Centralized defaults for the engine.
/// All opinionated defaults should be defined here for consistency.
pub struct EngineDefaults;

impl EngineDefaults {
    // Trust defaults
    pub const TRUST_BUNDLE_PATH: &'static str = "/app/cr-root-bundle.pem";
    pub const REVOCATION_POLICY: RevocationPolicy = RevocationPolicy::SoftFail; // Maximum compatibility
    pub const ALLOW_FETCHING: bool = true;

    // Command engine defaults
    pub const COMMAND_PROGRAM: &'static str = "pyhanko";
    pub const COMMAND_SUBCOMMAND: [&'static str; 2] = ["sign", "validate"];
    pub const ENGINE_TIMEOUT_SECS: u64 = 120;

    // Report sentinels, part of the downstream wire contract
    pub const VALID_REASON: &'static str = "OK";
    pub const NOT_AVAILABLE: &'static str = "No disponible";
}

/// Configurable per-call limits to control memory use.
#[derive(Debug, Clone, Copy)]
pub struct LimitsConfig {
    /// Max size allowed for a document, in memory or copied to a temp file.
    pub max_in_memory_document_size: usize,
    /// Max combined stdout + stderr accepted from a command engine.
    pub max_engine_output_size: usize,
}

impl LimitsConfig {
    /// Opinionated production defaults.
    pub fn defaults() -> Self {
        Self {
            max_in_memory_document_size: 64 * 1024 * 1024, // 64 MB
            max_engine_output_size: 8 * 1024 * 1024,       // 8 MB
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Configuration for running the validation engine as an external command.
#[derive(Debug, Clone)]
pub struct CommandConfig {
    pub program: PathBuf,
    /// Arguments placed before the validation flags (e.g. `sign validate`).
    pub subcommand: Vec<String>,
    /// The process is killed and the call fails once this elapses.
    pub timeout: Duration,
    pub limits: LimitsConfig,
}

impl CommandConfig {
    /// Secure opinionated defaults.
    pub fn secure_default() -> Self {
        Self {
            program: PathBuf::from(EngineDefaults::COMMAND_PROGRAM),
            subcommand: EngineDefaults::COMMAND_SUBCOMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout: Duration::from_secs(EngineDefaults::ENGINE_TIMEOUT_SECS),
            limits: LimitsConfig::defaults(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self::secure_default()
    }
}
