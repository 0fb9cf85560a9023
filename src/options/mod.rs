//! Command-line option synthesis and dispatch.
//!
//! - [`table`] builds the long/short option tables from a registry
//! - [`scanner`] walks the argument vector against those tables
//! - [`dispatch`] applies each match to a configuration store

pub mod dispatch;
pub mod error;
pub mod scanner;
pub mod table;

pub use dispatch::{Dispatcher, ParseOptions, ParseReport};
pub use error::CmdlineError;
pub use scanner::{Match, Scanner};
pub use table::{HasArg, LongOption, OptionForm, OptionTable, TableSizing};
