//! `modopts check` command

use std::path::Path;

use anyhow::Result;

use crate::cli::CheckArgs;
use modopts::core::{load_bank, Registry};

pub fn execute(args: CheckArgs, manifest: &Path) -> Result<()> {
    let bank = load_bank(manifest)?;

    let booleans: usize = bank.modules().iter().map(|m| m.bool_items()).sum();
    println!(
        "{}: {} modules, {} options ({} boolean)",
        manifest.display(),
        bank.modules().len(),
        bank.len(),
        booleans
    );

    if args.list {
        for module in bank.modules() {
            println!("[{}]", module.name());
            for item in module.items().iter().filter(|i| !i.is_hint()) {
                let short = item.short.map(|c| format!("-{}, ", c)).unwrap_or_default();
                let deprecated = match &item.deprecated {
                    Some(r) if r.strict => format!("  (removed, see --{})", r.replacement),
                    Some(r) => format!("  (deprecated, use --{})", r.replacement),
                    None => String::new(),
                };
                println!("  {}--{}  {}{}", short, item.name, item.item_type, deprecated);
            }
        }
    }

    Ok(())
}
