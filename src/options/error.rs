//! Command-line parse errors and their diagnostics.

use std::collections::TryReserveError;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::store::StoreError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while synthesizing option tables or scanning arguments.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum CmdlineError {
    #[error("out of memory while allocating the {what}")]
    #[diagnostic(code(modopts::cmdline::out_of_memory))]
    OutOfMemory {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("{program}: unknown option or missing mandatory argument `{option}`")]
    #[diagnostic(code(modopts::cmdline::unknown_option))]
    UnknownOption { program: String, option: String },

    #[error("option `--{name}` no longer exists")]
    #[diagnostic(code(modopts::cmdline::removed_option))]
    RemovedOption { name: String, replacement: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

impl CmdlineError {
    pub(crate) fn oom(what: &'static str) -> impl FnOnce(TryReserveError) -> CmdlineError {
        move |source| CmdlineError::OutOfMemory { what, source }
    }

    /// Convert to a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CmdlineError::UnknownOption { program, .. } => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::try_help(program))
            }

            CmdlineError::RemovedOption { replacement, .. } => {
                Diagnostic::error(self.to_string())
                    .with_suggestion(suggestions::use_instead(replacement))
            }

            CmdlineError::OutOfMemory { source, .. } => {
                Diagnostic::error(self.to_string()).with_context(source.to_string())
            }

            CmdlineError::Store(_) => Diagnostic::error(self.to_string()),
        }
    }
}
