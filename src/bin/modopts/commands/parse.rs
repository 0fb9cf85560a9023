//! `modopts parse` command

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::{OutputFormat, ParseArgs};
use modopts::core::{load_bank, MemoryStore};
use modopts::ops::{load_cmdline, strip_platform_args};
use modopts::options::ParseOptions;
use modopts::util::diagnostic;
use modopts::util::Config;

pub fn execute(args: ParseArgs, manifest: &Path, config: &Config) -> Result<()> {
    let bank = load_bank(manifest)?;
    let defaults = MemoryStore::from_registry(&bank);
    let mut store = defaults.clone();

    let program_name = args
        .program_name
        .or_else(|| config.parser.program_name.clone())
        .unwrap_or_else(|| "modopts".to_string());
    let color = config.color().for_stderr();

    let options = ParseOptions {
        ignore_errors: args.ignore_errors || config.parser.ignore_errors,
        program_name: program_name.clone(),
        diagnostics: false,
        color,
    };

    let argv: Vec<String> = std::iter::once(program_name).chain(args.args).collect();
    let mut argv = strip_platform_args(&argv);

    let report = load_cmdline(&bank, &mut store, &mut argv, &options)?;

    for warning in &report.warnings {
        diagnostic::emit(warning, color);
    }

    let snapshot = store.snapshot();
    let baseline = defaults.snapshot();
    let values: Vec<_> = snapshot
        .iter()
        .filter(|(name, value)| !args.changed || baseline.get(*name) != Some(*value))
        .collect();

    match args.format {
        OutputFormat::Json => {
            let values: serde_json::Map<_, _> = values
                .into_iter()
                .map(|(name, value)| Ok((name.to_string(), serde_json::to_value(value)?)))
                .collect::<Result<_>>()?;
            let output = json!({
                "values": values,
                "positionals": report.positionals,
                "skipped": report.skipped,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("failed to serialize values")?
            );
        }
        OutputFormat::Lines => {
            for (name, value) in values {
                println!("{}={}", name, value);
            }
        }
    }

    Ok(())
}
