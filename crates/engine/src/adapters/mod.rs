// Engine adapters - re-exports all public interfaces

mod constants;
mod document;
mod runtime;
mod command;
mod library;

pub use constants::*;
pub use document::*;
pub use runtime::*;
pub use command::*;
pub use library::*;
