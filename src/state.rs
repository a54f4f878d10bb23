//! Sort and filter state, with their pure transition functions.
//!
//! Both values are owned by a single grid and only change through its
//! handlers. Each transition is a function of the prior state alone, so rapid
//! repeated header clicks need no debouncing.
//!
//! ```text
//! header click on a sortable column c:
//!   (other | none)  ──▶ (c, Ascending)
//!   (c, Ascending)  ──▶ (c, Descending)
//!   (c, Descending) ──▶ unsorted
//! ```

use crate::column::Column;
use std::collections::BTreeMap;
use std::fmt;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SortDirection {
    /// No sort applied.
    #[default]
    None,
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns `true` for [`SortDirection::None`].
    pub fn is_none(self) -> bool {
        self == SortDirection::None
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::None => "none",
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        })
    }
}

/// The single active `(column, direction)` pair, or unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct SortState {
    column: Option<String>,
    direction: SortDirection,
}

impl SortState {
    /// Sort by `column` in `direction`. A `None` direction yields the unsorted state.
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        if direction.is_none() {
            return Self::default();
        }
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// The unsorted state.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Column currently sorted, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Current direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether a column is actively sorted.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && !self.direction.is_none()
    }

    /// Direction shown for `column_id`: the active direction for the sorted
    /// column, [`SortDirection::None`] for every other column.
    pub fn direction_for(&self, column_id: &str) -> SortDirection {
        match &self.column {
            Some(c) if c == column_id => self.direction,
            _ => SortDirection::None,
        }
    }

    /// State after a header click on `column`.
    ///
    /// Returns `None` when the column is not sortable, meaning the click is a no-op.
    pub fn toggle<T>(&self, column: &Column<T>) -> Option<SortState> {
        if !column.is_sortable() {
            return None;
        }
        let next = match self.direction_for(column.id()) {
            SortDirection::None => SortState::new(column.id(), SortDirection::Ascending),
            SortDirection::Ascending => SortState::new(column.id(), SortDirection::Descending),
            SortDirection::Descending => SortState::unsorted(),
        };
        Some(next)
    }

    /// The pair reported to the host's sort callback.
    ///
    /// An active sort reports `(Some(id), Some(direction))`. The unsorted state
    /// reports `(None, None)`, which means "no sort" and never "ascending on an
    /// unnamed column".
    pub fn callback_args(&self) -> (Option<&str>, Option<SortDirection>) {
        if self.is_active() {
            (self.column.as_deref(), Some(self.direction))
        } else {
            (None, None)
        }
    }
}

/// Active free-text filters keyed by column id.
///
/// Keys are removed rather than stored with an empty value, so [`len`](Self::len)
/// is always the number of active filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct FilterState {
    entries: BTreeMap<String, String>,
}

impl FilterState {
    /// Empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter text for `column`. An empty `value` removes the entry.
    ///
    /// Returns `true` when the state changed.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) -> bool {
        let column = column.into();
        let value = value.into();
        if value.is_empty() {
            return self.entries.remove(&column).is_some();
        }
        match self.entries.get(&column) {
            Some(existing) if *existing == value => false,
            _ => {
                self.entries.insert(column, value);
                true
            }
        }
    }

    /// Removes the filter for `column`. Returns `true` when one was present.
    pub fn remove(&mut self, column: &str) -> bool {
        self.entries.remove(column).is_some()
    }

    /// Removes every filter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Filter text for `column`, if active.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    /// Number of active filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(column, text)` pairs in column-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (k, v) in iter {
            state.set(k, v);
        }
        state
    }
}
