//! The filter and sort pipeline.
//!
//! [`process`] derives the view a grid renders from four inputs: the host's
//! rows, the column descriptors, the active [`FilterState`] and the active
//! [`SortState`]. It never touches the rows themselves. The result is a list of
//! source indices, so every processed entry maps back to exactly one host row
//! and no row can be duplicated or invented.
//!
//! # Filtering
//!
//! Active filters are combined with logical AND. For each entry:
//!
//! 1. Empty text always passes.
//! 2. A custom predicate decides on its own.
//! 3. Otherwise the accessor's displayed value must contain the filter text,
//!    ignoring case. Null values display as `""`.
//! 4. Columns with neither a predicate nor an accessor are skipped, as are ids
//!    that do not name a configured column.
//!
//! # Sorting
//!
//! A custom comparator has full authority. Otherwise accessor values are
//! compared with nulls placed after every non-null value in both directions,
//! text compared with [`locale_compare`](crate::value::locale_compare), numbers
//! numerically and everything else by displayed text. Sorting is stable, so
//! rows with equal keys keep their input order in both directions.
//!
//! # Failure
//!
//! When a host closure returns an error the whole pass is abandoned and the
//! error is returned. Callers never receive a partially sorted or filtered view.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_datagrid::pipeline::process;
//! use bubbletea_datagrid::{Column, FilterState, SortDirection, SortState};
//!
//! struct Row { id: u32, name: &'static str, age: Option<u32> }
//!
//! let rows = vec![
//!     Row { id: 1, name: "Bob", age: Some(30) },
//!     Row { id: 2, name: "alice", age: Some(25) },
//!     Row { id: 3, name: "Amy", age: None },
//! ];
//! let columns = vec![
//!     Column::new("name").accessor(|r: &Row| r.name.into()).filterable(true),
//!     Column::new("age").accessor(|r: &Row| r.age.into()).sortable(true),
//! ];
//! let filters: FilterState = [("name", "a")].into_iter().collect();
//! let sort = SortState::new("age", SortDirection::Ascending);
//!
//! let view = process(&rows, &columns, &filters, &sort)?;
//! let ids: Vec<u32> = view.iter(&rows).map(|row| row.id).collect();
//! assert_eq!(ids, vec![2, 3]);
//! # Ok::<(), bubbletea_datagrid::GridError>(())
//! ```

use crate::column::{self, Column};
use crate::error::{CallbackError, GridError, Result};
use crate::state::{FilterState, SortDirection, SortState};
use crate::value::{compare_values, CellValue};
use std::cmp::Ordering;

/// Result of one pipeline pass: source row indices in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessedRows {
    indices: Vec<usize>,
}

/// View with no rows, used before the first successful pass.
pub(crate) static EMPTY_VIEW: ProcessedRows = ProcessedRows {
    indices: Vec::new(),
};

impl ProcessedRows {
    /// Every row of a `len`-row source, in source order.
    pub fn identity(len: usize) -> Self {
        Self {
            indices: (0..len).collect(),
        }
    }

    /// Source indices in display order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of rows in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Source index of the row displayed at `position`.
    pub fn source_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Row displayed at `position`.
    pub fn get<'a, T>(&self, rows: &'a [T], position: usize) -> Option<&'a T> {
        self.source_index(position).and_then(|i| rows.get(i))
    }

    /// Iterates the processed rows in display order.
    pub fn iter<'a, T>(&'a self, rows: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.indices.iter().filter_map(move |&i| rows.get(i))
    }
}

struct ActiveFilter<'a, T> {
    column: &'a Column<T>,
    needle: String,
    raw: &'a str,
}

impl<T> ActiveFilter<'_, T> {
    fn matches(&self, row: &T) -> Result<bool> {
        if let Some(predicate) = self.column.custom_predicate() {
            return predicate(row, self.raw)
                .map_err(|source| GridError::callback(self.column.id(), source));
        }
        Ok(self
            .column
            .value(row)
            .map(|value| value.to_string().to_lowercase().contains(&self.needle))
            .unwrap_or(true))
    }
}

fn active_filters<'a, T>(
    columns: &'a [Column<T>],
    filters: &'a FilterState,
) -> Vec<ActiveFilter<'a, T>> {
    filters
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .filter_map(|(id, text)| {
            let column = column::find(columns, id)?;
            if column.custom_predicate().is_none() && !column.has_accessor() {
                return None;
            }
            Some(ActiveFilter {
                column,
                needle: text.to_lowercase(),
                raw: text,
            })
        })
        .collect()
}

fn passes<T>(row: &T, active: &[ActiveFilter<'_, T>]) -> Result<bool> {
    for filter in active {
        if !filter.matches(row)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Tests one row against every active filter (logical AND).
pub fn filter_row<T>(row: &T, columns: &[Column<T>], filters: &FilterState) -> Result<bool> {
    passes(row, &active_filters(columns, filters))
}

fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b);
            if direction == SortDirection::Descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

/// Compares two rows under `column`'s ordering in `direction`.
pub fn compare_rows<T>(
    a: &T,
    b: &T,
    column: &Column<T>,
    direction: SortDirection,
) -> Result<Ordering> {
    if let Some(compare) = column.custom_comparator() {
        return compare(a, b, direction).map_err(|source| GridError::callback(column.id(), source));
    }
    match (column.value(a), column.value(b)) {
        (Some(va), Some(vb)) => Ok(compare_cells(&va, &vb, direction)),
        _ => Ok(Ordering::Equal),
    }
}

fn sort_indices<T>(
    indices: &mut Vec<usize>,
    rows: &[T],
    column: &Column<T>,
    direction: SortDirection,
) -> Result<()> {
    if let Some(compare) = column.custom_comparator() {
        let mut failure: Option<CallbackError> = None;
        indices.sort_by(|&a, &b| {
            if failure.is_some() {
                return Ordering::Equal;
            }
            compare(&rows[a], &rows[b], direction).unwrap_or_else(|err| {
                failure = Some(err);
                Ordering::Equal
            })
        });
        return match failure {
            Some(source) => Err(GridError::callback(column.id(), source)),
            None => Ok(()),
        };
    }

    if !column.has_accessor() {
        return Ok(());
    }
    let mut keyed: Vec<(usize, CellValue)> = indices
        .iter()
        .map(|&i| (i, column.value(&rows[i]).unwrap_or_default()))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_cells(a, b, direction));
    *indices = keyed.into_iter().map(|(i, _)| i).collect();
    Ok(())
}

/// Runs the full pipeline: filter (if any filter is active), then sort (if a
/// column is actively sorted).
///
/// A sort naming an unknown column leaves the filtered order unchanged.
pub fn process<T>(
    rows: &[T],
    columns: &[Column<T>],
    filters: &FilterState,
    sort: &SortState,
) -> Result<ProcessedRows> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();

    if !filters.is_empty() {
        let active = active_filters(columns, filters);
        if !active.is_empty() {
            let mut kept = Vec::with_capacity(indices.len());
            for i in indices {
                if passes(&rows[i], &active)? {
                    kept.push(i);
                }
            }
            indices = kept;
        }
    }

    if let (true, Some(id)) = (sort.is_active(), sort.column()) {
        match column::find(columns, id) {
            Some(column) => sort_indices(&mut indices, rows, column, sort.direction())?,
            None => log::warn!("sort references unknown column `{id}`, leaving order unchanged"),
        }
    }

    Ok(ProcessedRows { indices })
}
