//! Test utilities shared by the unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use modopts::test_support::{argv, sample_bank};
//!
//! #[test]
//! fn test_example() {
//!     let bank = sample_bank();
//!     let mut store = MemoryStore::from_registry(&bank);
//!     let mut args = argv(&["-f"]);
//!     // parse and inspect the store...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
