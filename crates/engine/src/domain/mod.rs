pub mod engine;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod types;
