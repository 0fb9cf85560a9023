//! Core data structures.
//!
//! - Configuration items and their types
//! - The module registry and its merge rules
//! - The configuration store interface
//! - Key-name translation for hotkey items

pub mod item;
pub mod keys;
pub mod manifest;
pub mod registry;
pub mod store;

pub use item::{ConfigItem, ItemType, Redirect};
pub use manifest::{load_bank, RegistryManifest, MANIFEST_NAME};
pub use registry::{Module, ModuleBank, Registry, RegistryError};
pub use store::{ConfigStore, ConfigValue, MemoryStore, StoreError};
