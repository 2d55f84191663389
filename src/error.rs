//! Typed errors raised at the view-model boundary.
//!
//! The pipeline itself cannot fail; these cover inputs that arrive from the
//! configuration file, command line, or interactive command stream before they
//! are allowed to touch the view state.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// A page size of zero leaves the page count undefined.
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("page size '{0}' is not a positive number or 'all'")]
    InvalidPageSize(String),

    #[error("page size {0} is not one of the configured options")]
    UnsupportedPageSize(String),

    #[error("page {requested} is outside 1..={total_pages}")]
    PageOutOfRange { requested: usize, total_pages: usize },

    #[error("page '{0}' is not a positive number")]
    InvalidPage(String),

    #[error("unknown sort key '{0}' (expected title or rating)")]
    UnknownSortKey(String),

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("command '{command}' requires {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
}
