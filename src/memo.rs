//! Memoization of the processed view.
//!
//! The processed view is pure derived data of (rows, columns, filters, sort).
//! Rows and columns are owned by the grid and tracked by revision counters
//! bumped on every replacement; filters and sort are compared by value. The
//! cached view is reused only while all four inputs are unchanged.

use crate::error::Result;
use crate::pipeline::{ProcessedRows, EMPTY_VIEW};
use crate::state::{FilterState, SortState};

/// Inputs a processed view was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoKey {
    /// Revision of the row collection.
    pub rows_revision: u64,
    /// Revision of the column set.
    pub columns_revision: u64,
    /// Filter state at computation time.
    pub filters: FilterState,
    /// Sort state at computation time.
    pub sort: SortState,
}

/// Single-entry cache for the processed view.
#[derive(Debug, Clone, Default)]
pub struct MemoizedView {
    entry: Option<(MemoKey, ProcessedRows)>,
}

impl MemoizedView {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached view for `key`, computing and storing it on a miss.
    ///
    /// A failed computation leaves the previous entry in place.
    pub fn get_or_compute<F>(&mut self, key: MemoKey, compute: F) -> Result<&ProcessedRows>
    where
        F: FnOnce() -> Result<ProcessedRows>,
    {
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if hit {
            log::trace!("processed view cache hit");
        } else {
            let processed = compute()?;
            log::debug!("recomputed processed view: {} rows", processed.len());
            self.entry = Some((key, processed));
        }
        Ok(self.current().unwrap_or(&EMPTY_VIEW))
    }

    /// The most recently computed view, if any.
    pub fn current(&self) -> Option<&ProcessedRows> {
        self.entry.as_ref().map(|(_, processed)| processed)
    }

    /// Drops the cached view.
    pub fn clear_cache(&mut self) {
        self.entry = None;
    }
}
