//! Test fixtures for common test scenarios.
//!
//! The sample registry mirrors a small media player: a core module with
//! the usual short flags and a legacy module holding retired options.

use crate::core::item::{ConfigItem, ItemType};
use crate::core::registry::{Module, ModuleBank};
use crate::core::store::ConfigValue;

/// Core module: verbosity, interface, video and hotkey items.
pub fn core_module() -> Module {
    Module::new("main")
        .with_item(ConfigItem::new("video-section", ItemType::Hint))
        .with_item(ConfigItem::new("verbose", ItemType::Integer).with_short('v'))
        .with_item(ConfigItem::new("quiet", ItemType::Boolean).with_short('q'))
        .with_item(ConfigItem::new("intf", ItemType::Module).with_short('I'))
        .with_item(ConfigItem::new("config", ItemType::File))
        .with_item(ConfigItem::new("width", ItemType::Integer).with_short('w'))
        .with_item(ConfigItem::new("fullscreen", ItemType::Boolean).with_short('f'))
        .with_item(
            ConfigItem::new("audio", ItemType::Boolean).with_default(ConfigValue::Bool(true)),
        )
        .with_item(ConfigItem::new("zoom", ItemType::Float).with_default(ConfigValue::Float(1.0)))
        .with_item(ConfigItem::new("key-quit", ItemType::Key))
}

/// Legacy module: one advisory redirect per kind, plus a removed option.
pub fn legacy_module() -> Module {
    Module::new("legacy")
        .with_item(ConfigItem::new("old-width", ItemType::Integer).deprecated_by("width"))
        .with_item(ConfigItem::new("old-fullscreen", ItemType::Boolean).deprecated_by("fullscreen"))
        .with_item(ConfigItem::new("gone", ItemType::Integer).removed_for("width"))
}

/// The merged sample registry.
pub fn sample_bank() -> ModuleBank {
    ModuleBank::from_modules([core_module(), legacy_module()])
        .expect("sample registry is valid")
}

/// Build an argument vector with a program name in front.
pub fn argv(args: &[&str]) -> Vec<String> {
    std::iter::once("prog")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}
