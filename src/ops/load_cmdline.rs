//! Load configuration values from the command line.
//!
//! This is the one-call entry point: synthesize the option tables for the
//! registry, scan the arguments and write every recognized option into the
//! store. All tables are dropped before returning, on success or failure.

use crate::core::registry::Registry;
use crate::core::store::ConfigStore;
use crate::options::{CmdlineError, Dispatcher, OptionTable, ParseOptions, ParseReport};

/// Parse `args` (element 0 is the program name) into `store`.
pub fn load_cmdline<R, S>(
    registry: &R,
    store: &mut S,
    args: &mut [String],
    options: &ParseOptions,
) -> Result<ParseReport, CmdlineError>
where
    R: Registry + ?Sized,
    S: ConfigStore + ?Sized,
{
    let table = OptionTable::build(registry)?;

    tracing::debug!(
        "parsing {} arguments ({} mode)",
        args.len().saturating_sub(1),
        if options.ignore_errors {
            "tolerant"
        } else {
            "strict"
        }
    );

    Dispatcher::new(&table, store, options).run(args)
}
