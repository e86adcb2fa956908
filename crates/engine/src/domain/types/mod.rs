// Re-export all types so callers can use `domain::types::*`
// while the code stays organized by concern internally.

pub use engine_output::*;
pub use asset::*;
pub use trust::*;
pub use config::*;

// Module declarations
mod engine_output;
mod asset;
mod trust;
mod config;
