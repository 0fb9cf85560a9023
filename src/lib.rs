//! modopts - Runtime option tables for module-contributed configuration
//!
//! The set of command-line flags a modular program accepts is only known
//! once its modules are loaded. This crate synthesizes `getopt_long`-style
//! long and short option tables from a registry of configuration items,
//! scans the argument vector, resolves deprecated aliases and writes the
//! parsed values into a configuration store.

pub mod core;
pub mod ops;
pub mod options;
pub mod util;

/// Test utilities for the unit tests.
///
/// This module is only available when compiling with `--cfg test`.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    ConfigItem, ConfigStore, ConfigValue, ItemType, MemoryStore, Module, ModuleBank, Registry,
};

pub use ops::{load_cmdline, strip_platform_args};
pub use options::{CmdlineError, ParseOptions, ParseReport};
