//! Configuration items contributed by modules.
//!
//! A [`ConfigItem`] is the unit the option tables are synthesized from. Items
//! are owned by the registry and treated as read-only by the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::store::ConfigValue;

/// The value type of a configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    String,
    Password,
    File,
    Directory,
    Module,
    ModuleList,
    #[serde(alias = "module-list-cat")]
    ModuleListCategory,
    #[serde(alias = "module-cat")]
    ModuleCategory,
    Integer,
    Float,
    Key,
    #[serde(alias = "bool")]
    Boolean,
    /// Documentation-only marker; never becomes an option.
    Hint,
}

impl ItemType {
    /// Hints only carry help text and are skipped by the table builder.
    pub fn is_hint(self) -> bool {
        matches!(self, ItemType::Hint)
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, ItemType::Boolean)
    }

    /// Types whose value is the raw argument text.
    pub fn is_string_like(self) -> bool {
        matches!(
            self,
            ItemType::String
                | ItemType::Password
                | ItemType::File
                | ItemType::Directory
                | ItemType::Module
                | ItemType::ModuleList
                | ItemType::ModuleListCategory
                | ItemType::ModuleCategory
        )
    }

    /// Whether the option needs an argument on the command line.
    pub fn takes_argument(self) -> bool {
        !self.is_boolean() && !self.is_hint()
    }

    /// Value an item of this type holds before anything writes to it.
    pub fn zero_value(self) -> Option<ConfigValue> {
        match self {
            t if t.is_string_like() => Some(ConfigValue::String(None)),
            ItemType::Integer | ItemType::Key => Some(ConfigValue::Int(0)),
            ItemType::Float => Some(ConfigValue::Float(0.0)),
            ItemType::Boolean => Some(ConfigValue::Bool(false)),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::String => "string",
            ItemType::Password => "password",
            ItemType::File => "file",
            ItemType::Directory => "directory",
            ItemType::Module => "module",
            ItemType::ModuleList => "module-list",
            ItemType::ModuleListCategory => "module-list-category",
            ItemType::ModuleCategory => "module-category",
            ItemType::Integer => "integer",
            ItemType::Float => "float",
            ItemType::Key => "key",
            ItemType::Boolean => "boolean",
            ItemType::Hint => "hint",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deprecation redirect from a retired option to its replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    /// Name of the item that replaces this one.
    pub replacement: String,

    /// When set, the old option was removed outright and its value is
    /// discarded instead of being forwarded to the replacement.
    #[serde(default)]
    pub strict: bool,
}

/// A single configuration item exported by a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    /// Unique option name (`--name` on the command line)
    pub name: String,

    /// Value type
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// Optional single-character alias (`-c`)
    #[serde(default)]
    pub short: Option<char>,

    /// Deprecation redirect, if this option was retired
    #[serde(default)]
    pub deprecated: Option<Redirect>,

    /// Value seeded into the store before parsing
    #[serde(default)]
    pub default: Option<ConfigValue>,
}

impl ConfigItem {
    /// Create an item with no short code, redirect or default.
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        ConfigItem {
            name: name.into(),
            item_type,
            short: None,
            deprecated: None,
            default: None,
        }
    }

    /// Attach a short option character.
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Mark as deprecated in favour of `replacement`; the value is forwarded.
    pub fn deprecated_by(mut self, replacement: impl Into<String>) -> Self {
        self.deprecated = Some(Redirect {
            replacement: replacement.into(),
            strict: false,
        });
        self
    }

    /// Mark as removed; `replacement` is only named in the diagnostic.
    pub fn removed_for(mut self, replacement: impl Into<String>) -> Self {
        self.deprecated = Some(Redirect {
            replacement: replacement.into(),
            strict: true,
        });
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: ConfigValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.item_type.is_boolean()
    }

    pub fn is_hint(&self) -> bool {
        self.item_type.is_hint()
    }
}
