//! Registry of configuration items.
//!
//! The registry is the ordered list of modules and the items each one
//! exports. Discovery lives outside this crate; [`ModuleBank`] is the merged
//! result and enforces the uniqueness rules the option tables depend on.

use std::collections::HashMap;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::item::ConfigItem;

/// A module and the configuration items it exports, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Module {
    name: String,
    items: Vec<ConfigItem>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append an item.
    pub fn with_item(mut self, item: ConfigItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[ConfigItem] {
        &self.items
    }

    /// Number of items that become options (everything except hints).
    pub fn config_items(&self) -> usize {
        self.items.iter().filter(|i| !i.is_hint()).count()
    }

    /// Number of boolean items.
    pub fn bool_items(&self) -> usize {
        self.items.iter().filter(|i| i.is_boolean()).count()
    }
}

impl From<(String, Vec<ConfigItem>)> for Module {
    fn from((name, items): (String, Vec<ConfigItem>)) -> Self {
        Module { name, items }
    }
}

/// A source of configuration items.
pub trait Registry {
    /// All modules, in registration order.
    fn modules(&self) -> &[Module];

    /// Find an item by name.
    fn find_item(&self, name: &str) -> Option<&ConfigItem> {
        self.modules()
            .iter()
            .flat_map(|m| m.items())
            .find(|i| i.name == name)
    }
}

impl Registry for [Module] {
    fn modules(&self) -> &[Module] {
        self
    }
}

impl Registry for Vec<Module> {
    fn modules(&self) -> &[Module] {
        self
    }
}

/// Error merging a module into the bank.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum RegistryError {
    #[error("module `{module}` declares an item with an invalid name `{name}`")]
    #[diagnostic(
        code(modopts::registry::invalid_name),
        help("Names must be non-empty, must not start with `-` and must not contain `=` or whitespace")
    )]
    InvalidName { module: String, name: String },

    #[error("option `--{name}` is declared by both `{first}` and `{second}`")]
    #[diagnostic(code(modopts::registry::duplicate_name))]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },

    #[error("`--{name}` uses `{code}` as a short option, which is not a printable ASCII character")]
    #[diagnostic(code(modopts::registry::invalid_short))]
    InvalidShortCode { name: String, code: char },

    #[error("short option `-{code}` is claimed by both `--{first}` and `--{second}`")]
    #[diagnostic(
        code(modopts::registry::short_collision),
        help("Each short option character can belong to a single item")
    )]
    ShortCodeCollision {
        code: char,
        first: String,
        second: String,
    },

    #[error("`--{name}` is redirected to `--{target}`, which does not exist")]
    #[diagnostic(code(modopts::registry::dangling_redirect))]
    DanglingRedirect { name: String, target: String },

    #[error("`--{name}` is redirected to `--{target}`, which takes a different kind of argument")]
    #[diagnostic(
        code(modopts::registry::redirect_arity),
        help("A redirect must point at an item that is boolean exactly when the old one is")
    )]
    RedirectArity { name: String, target: String },

    #[error("default value of `--{name}` does not fit its type ({item_type})")]
    #[diagnostic(code(modopts::registry::default_type))]
    DefaultTypeMismatch { name: String, item_type: String },
}

/// Where an item lives inside the bank.
#[derive(Debug, Clone, Copy)]
struct ItemRef {
    module: usize,
    item: usize,
}

/// The merged registry of every loaded module.
///
/// Merging rejects duplicate option names and short codes, so the option
/// tables never have to pick a winner.
#[derive(Debug, Clone, Default)]
pub struct ModuleBank {
    modules: Vec<Module>,
    names: HashMap<String, ItemRef>,
    shorts: HashMap<char, String>,
}

impl ModuleBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        ModuleBank::default()
    }

    /// Merge every module and check redirects once all are present.
    pub fn from_modules(
        modules: impl IntoIterator<Item = Module>,
    ) -> Result<Self, RegistryError> {
        let mut bank = ModuleBank::new();
        for module in modules {
            bank.add_module(module)?;
        }
        bank.validate()?;
        Ok(bank)
    }

    /// Merge a module. Nothing is inserted if any item is rejected.
    ///
    /// Redirect targets may live in modules added later, so they are checked
    /// by [`ModuleBank::validate`] instead.
    pub fn add_module(&mut self, module: Module) -> Result<(), RegistryError> {
        let mut names: HashMap<&str, &str> = HashMap::new();
        let mut shorts: HashMap<char, &str> = HashMap::new();

        for item in module.items() {
            if item.is_hint() {
                continue;
            }
            check_name(module.name(), &item.name)?;

            if let Some(existing) = self.names.get(&item.name) {
                return Err(RegistryError::DuplicateName {
                    name: item.name.clone(),
                    first: self.modules[existing.module].name().to_string(),
                    second: module.name().to_string(),
                });
            }
            if names.insert(&item.name, module.name()).is_some() {
                return Err(RegistryError::DuplicateName {
                    name: item.name.clone(),
                    first: module.name().to_string(),
                    second: module.name().to_string(),
                });
            }

            if let Some(default) = &item.default {
                if default.clone().coerce(item.item_type).is_none() {
                    return Err(RegistryError::DefaultTypeMismatch {
                        name: item.name.clone(),
                        item_type: item.item_type.to_string(),
                    });
                }
            }

            let Some(code) = item.short else { continue };
            if !code.is_ascii_graphic() || code == '-' || code == ':' {
                return Err(RegistryError::InvalidShortCode {
                    name: item.name.clone(),
                    code,
                });
            }
            let claimed = self
                .shorts
                .get(&code)
                .map(String::as_str)
                .or_else(|| shorts.get(&code).copied());
            if let Some(first) = claimed {
                return Err(RegistryError::ShortCodeCollision {
                    code,
                    first: first.to_string(),
                    second: item.name.clone(),
                });
            }
            shorts.insert(code, &item.name);
        }

        let module_idx = self.modules.len();
        for (item_idx, item) in module.items().iter().enumerate() {
            if item.is_hint() {
                continue;
            }
            self.names.insert(
                item.name.clone(),
                ItemRef {
                    module: module_idx,
                    item: item_idx,
                },
            );
            if let Some(code) = item.short {
                self.shorts.insert(code, item.name.clone());
            }
        }

        tracing::debug!(
            "registered module `{}` ({} options, {} boolean)",
            module.name(),
            module.config_items(),
            module.bool_items()
        );
        self.modules.push(module);
        Ok(())
    }

    /// Check that every redirect points at a compatible item.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for item in self.modules.iter().flat_map(|m| m.items()) {
            let Some(redirect) = &item.deprecated else {
                continue;
            };
            let target = self.get(&redirect.replacement).ok_or_else(|| {
                RegistryError::DanglingRedirect {
                    name: item.name.clone(),
                    target: redirect.replacement.clone(),
                }
            })?;
            if target.is_boolean() != item.is_boolean() {
                return Err(RegistryError::RedirectArity {
                    name: item.name.clone(),
                    target: target.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a non-hint item by name.
    pub fn get(&self, name: &str) -> Option<&ConfigItem> {
        self.names
            .get(name)
            .map(|r| &self.modules[r.module].items()[r.item])
    }

    /// Name of the item owning a short code.
    pub fn short_owner(&self, code: char) -> Option<&str> {
        self.shorts.get(&code).map(String::as_str)
    }

    /// Total number of options (non-hint items).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Registry for ModuleBank {
    fn modules(&self) -> &[Module] {
        &self.modules
    }

    fn find_item(&self, name: &str) -> Option<&ConfigItem> {
        self.get(name)
    }
}

fn check_name(module: &str, name: &str) -> Result<(), RegistryError> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidName {
            module: module.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::ItemType;
    use crate::core::store::ConfigValue;
    use crate::test_support::sample_bank;

    #[test]
    fn test_counts() {
        let module = Module::new("m")
            .with_item(ConfigItem::new("a", ItemType::Integer))
            .with_item(ConfigItem::new("b", ItemType::Boolean))
            .with_item(ConfigItem::new("c", ItemType::Hint));
        assert_eq!(module.config_items(), 2);
        assert_eq!(module.bool_items(), 1);
    }

    #[test]
    fn test_duplicate_name_across_modules() {
        let mut bank = ModuleBank::new();
        bank.add_module(Module::new("a").with_item(ConfigItem::new("width", ItemType::Integer)))
            .unwrap();
        let err = bank
            .add_module(Module::new("b").with_item(ConfigItem::new("width", ItemType::Integer)))
            .unwrap_err();
        match err {
            RegistryError::DuplicateName { first, second, .. } => {
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
        // the rejected module left nothing behind
        assert_eq!(bank.modules().len(), 1);
    }

    #[test]
    fn test_short_collision_rejected() {
        let mut bank = ModuleBank::new();
        bank.add_module(
            Module::new("a").with_item(ConfigItem::new("width", ItemType::Integer).with_short('w')),
        )
        .unwrap();
        let err = bank
            .add_module(
                Module::new("b")
                    .with_item(ConfigItem::new("wrap", ItemType::Boolean).with_short('w')),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ShortCodeCollision { code: 'w', .. }
        ));
        assert_eq!(bank.short_owner('w'), Some("width"));
    }

    #[test]
    fn test_short_collision_within_module() {
        let module = Module::new("a")
            .with_item(ConfigItem::new("x", ItemType::Boolean).with_short('x'))
            .with_item(ConfigItem::new("y", ItemType::Boolean).with_short('x'));
        assert!(ModuleBank::from_modules([module]).is_err());
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "-x", "a=b", "a b"] {
            let module = Module::new("m").with_item(ConfigItem::new(name, ItemType::String));
            let err = ModuleBank::from_modules([module]).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidName { .. }), "{name:?}");
        }
    }

    #[test]
    fn test_invalid_short_code() {
        let module =
            Module::new("m").with_item(ConfigItem::new("x", ItemType::String).with_short(':'));
        let err = ModuleBank::from_modules([module]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidShortCode { .. }));
    }

    #[test]
    fn test_redirect_validation() {
        let dangling = Module::new("m")
            .with_item(ConfigItem::new("old", ItemType::Integer).deprecated_by("missing"));
        assert!(matches!(
            ModuleBank::from_modules([dangling]).unwrap_err(),
            RegistryError::DanglingRedirect { .. }
        ));

        let arity = Module::new("m")
            .with_item(ConfigItem::new("new", ItemType::Integer))
            .with_item(ConfigItem::new("old", ItemType::Boolean).deprecated_by("new"));
        assert!(matches!(
            ModuleBank::from_modules([arity]).unwrap_err(),
            RegistryError::RedirectArity { .. }
        ));
    }

    #[test]
    fn test_redirect_to_later_module() {
        let first = Module::new("a")
            .with_item(ConfigItem::new("old", ItemType::Integer).deprecated_by("new"));
        let second = Module::new("b").with_item(ConfigItem::new("new", ItemType::Integer));
        let bank = ModuleBank::from_modules([first, second]).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_default_type_checked() {
        let module = Module::new("m").with_item(
            ConfigItem::new("x", ItemType::Boolean).with_default(ConfigValue::Int(3)),
        );
        assert!(matches!(
            ModuleBank::from_modules([module]).unwrap_err(),
            RegistryError::DefaultTypeMismatch { .. }
        ));
    }

    #[test]
    fn test_lookup() {
        let bank = sample_bank();
        assert_eq!(bank.get("width").unwrap().item_type, ItemType::Integer);
        assert!(bank.get("video-section").is_none());
        assert_eq!(bank.find_item("quiet").unwrap().short, Some('q'));
    }
}
