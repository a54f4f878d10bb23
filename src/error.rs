//! Error types for the data grid.
//!
//! The grid itself never fails on well-formed input. Errors come from two places:
//! closures supplied by the host (custom comparators and predicates), and handler
//! calls that name a column the grid does not know about.

use thiserror::Error;

/// Boxed error returned by host-supplied comparators and predicates.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors produced while processing or mutating grid state.
#[derive(Debug, Error)]
pub enum GridError {
    /// A custom comparator or predicate on `column` failed.
    ///
    /// When this is returned the processed view is left untouched, so the
    /// grid never shows a partially sorted or partially filtered result.
    #[error("callback for column `{column}` failed: {source}")]
    Callback {
        /// Identifier of the column whose closure failed.
        column: String,
        /// The error reported by the closure.
        #[source]
        source: CallbackError,
    },

    /// A handler was called with a column id that is not configured.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// Two columns were configured with the same identifier.
    #[error("duplicate column id `{0}`")]
    DuplicateColumn(String),
}

impl GridError {
    pub(crate) fn callback(column: &str, source: CallbackError) -> Self {
        GridError::Callback {
            column: column.to_string(),
            source,
        }
    }
}
