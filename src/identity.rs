//! Row identity for keyed rendering.
//!
//! Keys are resolved against the *processed* view. In order of preference a
//! row is identified by the configured key, by a column with id `"id"`, and
//! finally by its position in the processed output. Positional keys are only
//! stable within one processed view; cross-render stability depends on the
//! host keeping its own row identities stable.

use crate::column::{self, Column};
use crate::pipeline::ProcessedRows;
use std::fmt;
use std::sync::Arc;

/// Column id consulted when no key is configured.
pub const DEFAULT_KEY_COLUMN: &str = "id";

/// How a grid derives a stable key for each row.
pub enum RowKeyConfig<T> {
    /// Use the displayed value of the named column.
    Column(String),
    /// Use a host-supplied function.
    Accessor(Arc<dyn Fn(&T) -> String + Send + Sync>),
}

impl<T> RowKeyConfig<T> {
    /// Key rows by a column's value.
    pub fn column(id: impl Into<String>) -> Self {
        RowKeyConfig::Column(id.into())
    }

    /// Key rows with a function.
    pub fn accessor<F>(key: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        RowKeyConfig::Accessor(Arc::new(key))
    }
}

impl<T> Clone for RowKeyConfig<T> {
    fn clone(&self) -> Self {
        match self {
            RowKeyConfig::Column(id) => RowKeyConfig::Column(id.clone()),
            RowKeyConfig::Accessor(f) => RowKeyConfig::Accessor(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowKeyConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKeyConfig::Column(id) => f.debug_tuple("Column").field(id).finish(),
            RowKeyConfig::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

/// A resolved row key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// Key taken from the row's data.
    Value(String),
    /// Fallback: position in the processed view.
    Index(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Value(v) => f.write_str(v),
            RowKey::Index(i) => write!(f, "#{i}"),
        }
    }
}

fn column_key<T>(column: &Column<T>, row: &T) -> Option<String> {
    column
        .value(row)
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
}

/// Resolves the key of `row`, shown at `position` of the processed view.
pub fn resolve_key<T>(
    row: &T,
    position: usize,
    columns: &[Column<T>],
    config: Option<&RowKeyConfig<T>>,
) -> RowKey {
    let from_data = match config {
        Some(RowKeyConfig::Accessor(key)) => Some(key(row)),
        Some(RowKeyConfig::Column(id)) => {
            column::find(columns, id).and_then(|c| column_key(c, row))
        }
        None => column::find(columns, DEFAULT_KEY_COLUMN).and_then(|c| column_key(c, row)),
    };
    from_data
        .map(RowKey::Value)
        .unwrap_or(RowKey::Index(position))
}

/// Resolves keys for every row of a processed view, in display order.
pub fn resolve_keys<T>(
    processed: &ProcessedRows,
    rows: &[T],
    columns: &[Column<T>],
    config: Option<&RowKeyConfig<T>>,
) -> Vec<RowKey> {
    processed
        .iter(rows)
        .enumerate()
        .map(|(position, row)| resolve_key(row, position, columns, config))
        .collect()
}
