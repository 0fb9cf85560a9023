//! High-level operations.
//!
//! This module contains the entry points the binary and embedders call.

pub mod load_cmdline;
pub mod preprocess;

pub use load_cmdline::load_cmdline;
pub use preprocess::strip_platform_args;
