#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datagrid/")]

//! # bubbletea-datagrid
//!
//! A sortable, filterable, paginated data grid for terminal applications
//! built with [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The grid displays rows of any host type through a list of column
//! descriptors. Each column says how to extract a cell value, and optionally
//! how to render, compare and filter it. The grid owns the sort and filter
//! state, derives the processed view from it and reports every change to the
//! host through callbacks, so hosts can also do the processing themselves and
//! only use the grid for display and input.
//!
//! Like the other bubbletea components it follows the Elm Architecture with
//! `init()`, `update()` and `view()`.
//!
//! ## Features
//!
//! - **Three-state header sort** (ascending, descending, unsorted) with nulls last
//! - **Per-column text filters** combined with AND, case-insensitive by default
//! - **Custom comparators, predicates and renderers** per column
//! - **Local or remote processing** of filters, sort and pages
//! - **Memoized processing**: the view is only rebuilt when its inputs change
//! - **Stable row keys** from a key column, a key accessor or the row position
//!
//! ## Quick start
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//!
//! #[derive(Clone)]
//! struct Book { isbn: &'static str, title: &'static str, year: Option<i32> }
//!
//! let mut grid = Grid::new(vec![
//!     Column::new("isbn").header("ISBN").accessor(|b: &Book| b.isbn.into()),
//!     Column::new("title")
//!         .header("Title")
//!         .accessor(|b: &Book| b.title.into())
//!         .sortable(true)
//!         .filterable(true),
//!     Column::new("year")
//!         .header("Year")
//!         .accessor(|b: &Book| b.year.into())
//!         .sortable(true),
//! ])
//! .with_rows(vec![
//!     Book { isbn: "978-0", title: "Dune", year: Some(1965) },
//!     Book { isbn: "978-1", title: "Neuromancer", year: Some(1984) },
//!     Book { isbn: "978-2", title: "Unknown Draft", year: None },
//! ])
//! .with_row_key(RowKeyConfig::column("isbn"))
//! .with_pagination(Pagination::new(25));
//!
//! grid.toggle_sort("year")?;
//! grid.toggle_sort("year")?;
//! let titles: Vec<&str> = grid.visible_rows().iter().map(|b| b.title).collect();
//! assert_eq!(titles, vec!["Neuromancer", "Dune", "Unknown Draft"]);
//! # Ok::<(), bubbletea_datagrid::GridError>(())
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`value`] | `CellValue` and value ordering |
//! | [`column`] | Column descriptors |
//! | [`state`] | Sort and filter state |
//! | [`pipeline`] | The filter and sort pass |
//! | [`memo`] | Caching of the processed view |
//! | [`identity`] | Row keys |
//! | [`pagination`] | Page state and data modes |
//! | [`grid`] | The interactive component |
//! | [`key`] | Key bindings |
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: state
//! changes at `debug`, cache hits at `trace`, ignored input at `warn` and
//! failed processing at `error`. Install any `log` backend to see them.

pub mod column;
pub mod error;
pub mod grid;
pub mod identity;
pub mod key;
pub mod memo;
pub mod pagination;
pub mod pipeline;
pub mod state;
pub mod value;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input; a blurred one ignores it.
///
/// ```rust
/// use bubbletea_datagrid::prelude::*;
///
/// struct Row;
///
/// let mut grid: Grid<Row> = Grid::new(vec![Column::new("id")]);
/// assert!(grid.focused());
/// grid.blur();
/// assert!(!grid.focused());
/// let _ = grid.focus();
/// assert!(grid.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Whether the component is focused.
    fn focused(&self) -> bool;
}

pub use column::{Column, FilterConfig, FilterKind, Filterable};
pub use error::{GridError, Result};
pub use grid::{GridErrorMsg, GridKeyMap, GridStyles, Model as Grid};
pub use identity::{RowKey, RowKeyConfig};
pub use key::{Binding, KeyMap, KeyPress};
pub use pagination::{DataMode, Pagination};
pub use pipeline::ProcessedRows;
pub use state::{FilterState, SortDirection, SortState};
pub use value::CellValue;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datagrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::column::{Column, FilterConfig, FilterKind, Filterable};
    pub use crate::error::GridError;
    pub use crate::grid::{GridErrorMsg, GridKeyMap, GridStyles, Model as Grid};
    pub use crate::identity::{RowKey, RowKeyConfig};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::pagination::{DataMode, Pagination};
    pub use crate::state::{FilterState, SortDirection, SortState};
    pub use crate::value::CellValue;
    pub use crate::Component;
}
