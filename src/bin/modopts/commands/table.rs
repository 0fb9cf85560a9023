//! `modopts table` command

use std::path::Path;

use anyhow::Result;

use crate::cli::TableArgs;
use modopts::core::load_bank;
use modopts::options::{HasArg, OptionForm, OptionTable, TableSizing};

pub fn execute(args: TableArgs, manifest: &Path) -> Result<()> {
    let bank = load_bank(manifest)?;
    let sizing = TableSizing::measure(&bank);
    let table = OptionTable::build(&bank)?;

    println!(
        "# {} long options for {} items (short spec capacity {})",
        sizing.long_entries,
        sizing.items,
        sizing.short_spec_capacity()
    );
    println!("short: {}", table.short_spec());

    let entries = if args.raw {
        table.raw_long_options()
    } else {
        table.long_options()
    };

    for entry in entries {
        if entry.is_sentinel() {
            println!("(sentinel)");
            continue;
        }
        let arity = match entry.has_arg {
            HasArg::No => "",
            HasArg::Required => "=<value>",
            HasArg::Optional => "[=<value>]",
        };
        let item = table
            .item(entry.item)
            .map(|i| format!("{} ({})", i.name, i.item_type))
            .unwrap_or_default();
        let negated = if entry.form == OptionForm::Negated {
            "  [negated]"
        } else {
            ""
        };
        println!("--{}{}  -> {}{}", entry.name, arity, item, negated);
    }

    Ok(())
}
