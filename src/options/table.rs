//! Option table synthesis.
//!
//! The recognized flags are not known until the registry is loaded, so the
//! long-option table, the short-option spec string and the short-code index
//! are built per parse from the registry:
//!
//! 1. A sizing pass counts one long entry per non-hint item and two more per
//!    boolean item (`no<name>` and `no-<name>`).
//! 2. Every table is reserved at its exact final size, fallibly.
//! 3. A fill pass walks the registry in order and writes the entries.

use std::fmt;

use crate::core::item::ConfigItem;
use crate::core::registry::Registry;
use crate::options::error::CmdlineError;

/// Short code whose occurrences are counted instead of overwritten.
pub const VERBOSE_SHORT: u8 = b'v';

/// Number of slots in the short-code index, one per byte value.
pub const SHORT_SLOTS: usize = 256;

/// Prefixes of the synthesized boolean negation forms.
pub const NEGATION_PREFIXES: [&str; 2] = ["no", "no-"];

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasArg {
    #[default]
    No,
    Required,
    Optional,
}

/// Whether a long entry is the item's own name or a synthesized negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionForm {
    #[default]
    Canonical,
    Negated,
}

/// One entry of the long-option table.
///
/// The all-default value is the terminating sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongOption {
    /// Name as typed after `--`
    pub name: String,
    /// Argument arity
    pub has_arg: HasArg,
    /// Canonical or negated form
    pub form: OptionForm,
    /// Index of the owning item in [`OptionTable::items`]
    pub item: usize,
}

impl LongOption {
    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty()
    }

    /// The item name this entry was synthesized from.
    pub fn canonical_name(&self) -> &str {
        match self.form {
            OptionForm::Canonical => &self.name,
            OptionForm::Negated => {
                let prefix = if self.name.as_bytes().get(2) == Some(&b'-') {
                    NEGATION_PREFIXES[1]
                } else {
                    NEGATION_PREFIXES[0]
                };
                &self.name[prefix.len()..]
            }
        }
    }
}

/// Sizes computed by the counting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSizing {
    /// Long entries excluding the sentinel
    pub long_entries: usize,
    /// Non-hint items
    pub items: usize,
}

impl TableSizing {
    /// Count the entries a registry needs.
    pub fn measure<R: Registry + ?Sized>(registry: &R) -> Self {
        let mut sizing = TableSizing {
            long_entries: 0,
            items: 0,
        };
        for module in registry.modules() {
            let items = module.config_items();
            sizing.items += items;
            sizing.long_entries += items + 2 * module.bool_items();
        }
        sizing
    }

    /// Upper bound for the short spec: every code plus an argument colon.
    pub fn short_spec_capacity(&self) -> usize {
        2 * self.long_entries + 1
    }
}

/// The synthesized option tables for one parse.
pub struct OptionTable<'r> {
    items: Vec<&'r ConfigItem>,
    long: Vec<LongOption>,
    short_spec: String,
    short_index: [Option<&'r ConfigItem>; SHORT_SLOTS],
}

impl<'r> OptionTable<'r> {
    /// Build the tables for every non-hint item of `registry`.
    pub fn build<R: Registry + ?Sized>(registry: &'r R) -> Result<Self, CmdlineError> {
        let sizing = TableSizing::measure(registry);

        let mut long = Vec::new();
        long.try_reserve_exact(sizing.long_entries + 1)
            .map_err(CmdlineError::oom("long option table"))?;

        let mut short_spec = String::new();
        short_spec
            .try_reserve_exact(sizing.short_spec_capacity())
            .map_err(CmdlineError::oom("short option string"))?;

        let mut items = Vec::new();
        items
            .try_reserve_exact(sizing.items)
            .map_err(CmdlineError::oom("option item list"))?;

        let mut table = OptionTable {
            items,
            long,
            short_spec,
            short_index: [None; SHORT_SLOTS],
        };

        for module in registry.modules() {
            for item in module.items().iter().filter(|i| !i.is_hint()) {
                table.push_item(item)?;
            }
        }

        table.long.push(LongOption::default());

        tracing::debug!(
            "synthesized {} long options and short spec `{}` for {} items",
            table.long.len() - 1,
            table.short_spec,
            table.items.len()
        );

        Ok(table)
    }

    fn push_item(&mut self, item: &'r ConfigItem) -> Result<(), CmdlineError> {
        let index = self.items.len();
        self.items.push(item);

        self.long.push(LongOption {
            name: item.name.clone(),
            has_arg: if item.is_boolean() {
                HasArg::No
            } else {
                HasArg::Required
            },
            form: OptionForm::Canonical,
            item: index,
        });

        if item.is_boolean() {
            for prefix in NEGATION_PREFIXES {
                self.long.push(LongOption {
                    name: synthesize(prefix, &item.name)?,
                    has_arg: HasArg::No,
                    form: OptionForm::Negated,
                    item: index,
                });
            }
        }

        let Some(short) = item.short else {
            return Ok(());
        };
        let Ok(code) = u8::try_from(short) else {
            tracing::warn!(
                "ignoring short option `{}` of `--{}`: not a single byte",
                short,
                item.name
            );
            return Ok(());
        };

        self.short_index[usize::from(code)] = Some(item);
        self.short_spec.push(char::from(code));
        if !item.is_boolean() {
            self.short_spec.push(':');
            if code == VERBOSE_SHORT {
                self.short_spec.push(':');
            }
        }

        Ok(())
    }

    /// Long entries, excluding the sentinel.
    pub fn long_options(&self) -> &[LongOption] {
        &self.long[..self.long.len() - 1]
    }

    /// Long entries including the terminating sentinel.
    pub fn raw_long_options(&self) -> &[LongOption] {
        &self.long
    }

    /// Short option spec (`getopt` syntax).
    pub fn short_spec(&self) -> &str {
        &self.short_spec
    }

    /// Bytes reserved for the short spec.
    pub fn short_spec_capacity(&self) -> usize {
        self.short_spec.capacity()
    }

    /// Item owning a short code.
    pub fn short_item(&self, code: u8) -> Option<&'r ConfigItem> {
        self.short_index[usize::from(code)]
    }

    /// Item a long entry maps back to.
    pub fn item(&self, index: usize) -> Option<&'r ConfigItem> {
        self.items.get(index).copied()
    }

    /// Items that became options, in registry order.
    pub fn items(&self) -> &[&'r ConfigItem] {
        &self.items
    }
}

impl fmt::Debug for OptionTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionTable")
            .field("items", &self.items.len())
            .field("long", &self.long)
            .field("short_spec", &self.short_spec)
            .finish()
    }
}

fn synthesize(prefix: &str, name: &str) -> Result<String, CmdlineError> {
    let mut out = String::new();
    out.try_reserve_exact(prefix.len() + name.len())
        .map_err(CmdlineError::oom("negated option name"))?;
    out.push_str(prefix);
    out.push_str(name);
    Ok(out)
}
