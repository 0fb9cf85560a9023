//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod numeric;

pub use config::Config;
pub use diagnostic::Diagnostic;
