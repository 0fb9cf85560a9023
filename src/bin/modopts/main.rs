//! modopts CLI - option tables synthesized from a module registry

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modopts::core::MANIFEST_NAME;
use modopts::options::CmdlineError;
use modopts::util::config::{global_config_dir, load_config, project_config_path};
use modopts::util::diagnostic;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        match e.downcast_ref::<CmdlineError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), false),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("modopts=debug")
    } else {
        EnvFilter::new("modopts=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Tool configuration
    let cwd = std::env::current_dir()?;
    let global = global_config_dir().map(|dir| dir.join("config.toml"));
    let config = load_config(global.as_deref(), &project_config_path(&cwd));

    let manifest = cli
        .manifest
        .or_else(|| config.manifest.path.clone())
        .unwrap_or_else(|| PathBuf::from(MANIFEST_NAME));

    // Execute command
    match cli.command {
        Commands::Parse(args) => commands::parse::execute(args, &manifest, &config),
        Commands::Table(args) => commands::table::execute(args, &manifest),
        Commands::Check(args) => commands::check::execute(args, &manifest),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
