//! Configuration store interface.
//!
//! The parser only needs typed writes and a name lookup. Persistence, locking
//! and defaults belong to the store implementation; [`MemoryStore`] is the
//! in-process one used by the binary and the tests.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::item::{ConfigItem, ItemType};
use crate::core::registry::Registry;

/// A stored configuration value.
///
/// Untagged so manifests can write `default = 3` and JSON dumps stay flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    String(Option<String>),
}

impl ConfigValue {
    /// Convert to the representation used by `item_type`, if compatible.
    ///
    /// Integers widen to floats; nothing else converts.
    pub fn coerce(self, item_type: ItemType) -> Option<ConfigValue> {
        match (self, item_type) {
            (v @ ConfigValue::String(_), t) if t.is_string_like() => Some(v),
            (v @ ConfigValue::Int(_), ItemType::Integer | ItemType::Key) => Some(v),
            (v @ ConfigValue::Float(_), ItemType::Float) => Some(v),
            (ConfigValue::Int(i), ItemType::Float) => Some(ConfigValue::Float(i as f32)),
            (v @ ConfigValue::Bool(_), ItemType::Boolean) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(Some(s)) => f.write_str(s),
            ConfigValue::String(None) => Ok(()),
        }
    }
}

/// Error writing to a configuration store.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum StoreError {
    #[error("no configuration item named `{name}`")]
    #[diagnostic(code(modopts::store::unknown_item))]
    UnknownItem { name: String },

    #[error("cannot store a {attempted} value in `{name}` (a {item_type} item)")]
    #[diagnostic(code(modopts::store::type_mismatch))]
    TypeMismatch {
        name: String,
        item_type: ItemType,
        attempted: &'static str,
    },
}

/// Typed write access plus name lookup, as consumed by the dispatcher.
pub trait ConfigStore {
    /// Look up the item registered under `name`.
    fn find(&self, name: &str) -> Option<&ConfigItem>;

    fn put_string(&mut self, name: &str, value: Option<&str>) -> Result<(), StoreError>;

    fn put_int(&mut self, name: &str, value: i64) -> Result<(), StoreError>;

    fn put_float(&mut self, name: &str, value: f32) -> Result<(), StoreError>;

    fn put_bool(&mut self, name: &str, value: bool) -> Result<(), StoreError>;
}

/// In-memory store seeded from a registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<ConfigItem>,
    values: Vec<ConfigValue>,
    index: HashMap<String, usize>,
}

impl MemoryStore {
    /// Create a store holding every non-hint item of `registry`, each set to
    /// its default (or the zero value of its type).
    pub fn from_registry<R: Registry + ?Sized>(registry: &R) -> Self {
        let mut store = MemoryStore::default();

        for module in registry.modules() {
            for item in module.items() {
                let Some(zero) = item.item_type.zero_value() else {
                    continue;
                };
                let value = item
                    .default
                    .clone()
                    .and_then(|v| v.coerce(item.item_type))
                    .unwrap_or(zero);

                store.index.insert(item.name.clone(), store.items.len());
                store.items.push(item.clone());
                store.values.push(value);
            }
        }

        store
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.index.get(name).map(|&i| &self.values[i])
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            ConfigValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ConfigValue::String(s) => s.as_deref(),
            _ => None,
        }
    }

    /// Name-ordered view of every value, suitable for serialization.
    pub fn snapshot(&self) -> BTreeMap<&str, &ConfigValue> {
        self.items
            .iter()
            .zip(&self.values)
            .map(|(item, value)| (item.name.as_str(), value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn slot(
        &mut self,
        name: &str,
        attempted: &'static str,
        accepts: impl Fn(ItemType) -> bool,
    ) -> Result<&mut ConfigValue, StoreError> {
        let &i = self.index.get(name).ok_or_else(|| StoreError::UnknownItem {
            name: name.to_string(),
        })?;
        let item_type = self.items[i].item_type;
        if !accepts(item_type) {
            return Err(StoreError::TypeMismatch {
                name: name.to_string(),
                item_type,
                attempted,
            });
        }
        Ok(&mut self.values[i])
    }
}

impl ConfigStore for MemoryStore {
    fn find(&self, name: &str) -> Option<&ConfigItem> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    fn put_string(&mut self, name: &str, value: Option<&str>) -> Result<(), StoreError> {
        let slot = self.slot(name, "string", ItemType::is_string_like)?;
        *slot = ConfigValue::String(value.map(str::to_string));
        Ok(())
    }

    fn put_int(&mut self, name: &str, value: i64) -> Result<(), StoreError> {
        let slot = self.slot(name, "integer", |t| {
            matches!(t, ItemType::Integer | ItemType::Key)
        })?;
        *slot = ConfigValue::Int(value);
        Ok(())
    }

    fn put_float(&mut self, name: &str, value: f32) -> Result<(), StoreError> {
        let slot = self.slot(name, "float", |t| t == ItemType::Float)?;
        *slot = ConfigValue::Float(value);
        Ok(())
    }

    fn put_bool(&mut self, name: &str, value: bool) -> Result<(), StoreError> {
        let slot = self.slot(name, "boolean", ItemType::is_boolean)?;
        *slot = ConfigValue::Bool(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_bank;

    #[test]
    fn test_seeded_from_defaults() {
        let store = MemoryStore::from_registry(&sample_bank());
        assert_eq!(store.get_int("width"), Some(0));
        assert_eq!(store.get_bool("audio"), Some(true));
        assert_eq!(store.get_float("zoom"), Some(1.0));
        assert_eq!(store.get_string("intf"), None);
        // hints are not stored
        assert!(store.find("video-section").is_none());
    }

    #[test]
    fn test_put_type_checked() {
        let mut store = MemoryStore::from_registry(&sample_bank());
        store.put_int("width", 640).unwrap();
        assert_eq!(store.get_int("width"), Some(640));

        let err = store.put_bool("width", true).unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));

        let err = store.put_int("nope", 1).unwrap_err();
        assert!(matches!(err, StoreError::UnknownItem { .. }));
    }

    #[test]
    fn test_coerce_int_to_float() {
        assert_eq!(
            ConfigValue::Int(2).coerce(ItemType::Float),
            Some(ConfigValue::Float(2.0))
        );
        assert_eq!(ConfigValue::Bool(true).coerce(ItemType::Integer), None);
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let mut store = MemoryStore::from_registry(&sample_bank());
        store.put_string("intf", Some("dummy")).unwrap();
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["intf"], "dummy");
        assert_eq!(json["width"], 0);
        assert_eq!(json["audio"], true);
    }
}
