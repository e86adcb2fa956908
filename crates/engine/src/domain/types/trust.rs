use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::crypto::anchors::{parse_trust_bundle, TrustAnchor};
use crate::domain::error::{EngineError, EngineResult};
use super::asset::TrustSource;
use super::config::EngineDefaults;

#[derive(Debug, Error)]
pub enum RevocationPolicyError {
    #[error("Invalid revocation policy: expected 'soft-fail', 'force-fetch' or 'disabled'")]
    InvalidPolicy,
}

/// How the engine treats a certificate whose revocation status it cannot confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationPolicy {
    /// Proceed with a caveat when revocation info is unavailable.
    SoftFail,
    /// Require fresh revocation info; failing to obtain it fails the signature.
    ForceFetch,
    /// Skip revocation checks entirely.
    Disabled,
}

impl FromStr for RevocationPolicy {
    type Err = RevocationPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft-fail" | "soft_fail" | "softfail" => Ok(RevocationPolicy::SoftFail),
            "force-fetch" | "force_fetch" | "hard-fail" => Ok(RevocationPolicy::ForceFetch),
            "disabled" | "none" => Ok(RevocationPolicy::Disabled),
            _ => Err(RevocationPolicyError::InvalidPolicy),
        }
    }
}

/// Trust policy applied to every validation that uses a [`TrustStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustPolicyConfig {
    pub revocation: RevocationPolicy,
    /// Whether the engine may go to the network for revocation data.
    pub allow_fetching: bool,
}

impl TrustPolicyConfig {
    pub fn secure_default() -> Self {
        Self {
            revocation: EngineDefaults::REVOCATION_POLICY,
            allow_fetching: EngineDefaults::ALLOW_FETCHING,
        }
    }
}

impl Default for TrustPolicyConfig {
    fn default() -> Self {
        Self::secure_default()
    }
}

/// Trusted roots plus the revocation policy, loaded once per configuration.
///
/// The store is immutable after [`TrustStore::load`]; share it across
/// concurrent validations (e.g. behind an `Arc`) without extra locking.
#[derive(Debug, Clone)]
pub struct TrustStore {
    anchors: Vec<TrustAnchor>,
    bundle: Vec<u8>,
    bundle_path: Option<PathBuf>,
    policy: TrustPolicyConfig,
}

impl TrustStore {
    /// Load a bundle with the given revocation policy and default fetching.
    pub fn load(source: TrustSource, revocation: RevocationPolicy) -> EngineResult<Self> {
        Self::load_with(source, TrustPolicyConfig { revocation, ..TrustPolicyConfig::secure_default() })
    }

    pub fn load_with(source: TrustSource, policy: TrustPolicyConfig) -> EngineResult<Self> {
        let (bundle, bundle_path) = match source {
            TrustSource::Path(path) => {
                if !path.is_file() {
                    return Err(EngineError::TrustLoad(format!(
                        "trust bundle not found: {}",
                        path.display()
                    )));
                }
                let data = std::fs::read(&path).map_err(|e| {
                    EngineError::TrustLoad(format!("cannot read {}: {e}", path.display()))
                })?;
                (data, Some(path))
            }
            TrustSource::Bytes { data } => (data, None),
        };

        if bundle.iter().all(u8::is_ascii_whitespace) {
            return Err(EngineError::TrustLoad("trust bundle is empty".into()));
        }

        let anchors = parse_trust_bundle(&bundle)?;
        if anchors.is_empty() {
            return Err(EngineError::TrustLoad(
                "trust bundle contains no parseable certificate".into(),
            ));
        }

        tracing::debug!(anchors = anchors.len(), policy = ?policy, "trust store loaded");
        Ok(Self { anchors, bundle, bundle_path, policy })
    }

    pub fn policy(&self) -> RevocationPolicy {
        self.policy.revocation
    }

    pub fn allow_fetching(&self) -> bool {
        self.policy.allow_fetching
    }

    pub fn trust_policy(&self) -> TrustPolicyConfig {
        self.policy
    }

    pub fn anchors(&self) -> &[TrustAnchor] {
        &self.anchors
    }

    /// The bundle exactly as it was loaded.
    pub fn bundle(&self) -> &[u8] {
        &self.bundle
    }

    /// Set when the store was loaded from disk.
    pub fn bundle_path(&self) -> Option<&Path> {
        self.bundle_path.as_deref()
    }
}
