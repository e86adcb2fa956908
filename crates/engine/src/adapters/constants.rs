// Flags understood by the validation engine's command-line front end
pub const FLAG_NO_DIFF_ANALYSIS: &str = "--no-diff-analysis";
pub const FLAG_NO_STRICT_SYNTAX: &str = "--no-strict-syntax";
pub const FLAG_PRETTY_PRINT: &str = "--pretty-print";
pub const FLAG_TRUST: &str = "--trust";

// Revocation policy flags
pub const FLAG_SOFT_REVOCATION_CHECK: &str = "--soft-revocation-check";
pub const FLAG_FORCE_REVINFO: &str = "--force-revinfo";
pub const FLAG_NO_REVOCATION_CHECK: &str = "--no-revocation-check";

// Temp file names; the extension lets the engine sniff the format
pub const DOCUMENT_FILE_STEM: &str = "document";
pub const TRUST_BUNDLE_FILE_NAME: &str = "trust-bundle.pem";

pub const COPY_CHUNK_SIZE: usize = 8192; // 8KB chunks for efficient copying
