//! Registry manifest parsing.
//!
//! A manifest describes modules and their configuration items in TOML, so
//! the binary can synthesize option tables without compiled-in modules:
//!
//! ```toml
//! [[module]]
//! name = "core"
//!
//! [[module.item]]
//! name = "verbose"
//! type = "integer"
//! short = "v"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::item::ConfigItem;
use crate::core::registry::{Module, ModuleBank};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "modopts.toml";

/// A module entry in the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSpec {
    /// Module name, used in diagnostics
    pub name: String,

    /// Items in declaration order
    #[serde(default, rename = "item")]
    pub items: Vec<ConfigItem>,
}

/// The parsed registry manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryManifest {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleSpec>,
}

impl RegistryManifest {
    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse manifest text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge all modules into a validated bank.
    pub fn into_bank(self) -> Result<ModuleBank> {
        let modules = self
            .modules
            .into_iter()
            .map(|spec| Module::from((spec.name, spec.items)));

        Ok(ModuleBank::from_modules(modules)?)
    }
}

/// Load and validate a manifest in one step.
pub fn load_bank(path: &Path) -> Result<ModuleBank> {
    RegistryManifest::load(path)?
        .into_bank()
        .with_context(|| format!("invalid registry in {}", path.display()))
}
