//! Command implementations

pub mod check;
pub mod completions;
pub mod parse;
pub mod table;
