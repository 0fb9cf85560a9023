//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// modopts - Synthesize and run command-line option tables from a module registry
#[derive(Parser)]
#[command(name = "modopts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Registry manifest to load (defaults to ./modopts.toml)
    #[arg(short, long, global = true, env = "MODOPTS_MANIFEST")]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse arguments against the registry and print the resulting values
    Parse(ParseArgs),

    /// Show the synthesized long-option table and short-option spec
    Table(TableArgs),

    /// Validate the registry manifest
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Skip unknown options instead of failing
    #[arg(long)]
    pub ignore_errors: bool,

    /// Program name used in diagnostics
    #[arg(long)]
    pub program_name: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Only print values changed from their defaults
    #[arg(long)]
    pub changed: bool,

    /// Arguments to parse (after `--`)
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct TableArgs {
    /// Include the terminating sentinel entry
    #[arg(long)]
    pub raw: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Print every option the registry defines
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format for parsed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A JSON object with values, positionals and skipped tokens
    Json,
    /// One `name=value` line per item
    Lines,
}
