//! Sortable, filterable, paginated data grid.
//!
//! The grid renders rows of any host type `T` through a list of [`Column`]
//! descriptors. It owns the sort and filter state, derives the processed view
//! through [`crate::pipeline`] and caches it until rows, columns, filters or
//! sort change.
//!
//! ## State changes
//!
//! Every state handler (`toggle_sort`, `set_filter`, `next_page` and friends)
//! updates the grid first and then tells the host through the matching
//! callback. When processing fails because a host closure returned an error,
//! the handler rolls its change back, keeps the previous view and returns the
//! error. Key handling inside [`Model::update`] reports such errors as a
//! [`GridErrorMsg`].
//!
//! ## Data modes
//!
//! In [`DataMode::Local`](crate::DataMode::Local) the grid filters, sorts
//! and slices pages itself. In [`DataMode::Remote`](crate::DataMode::Remote)
//! the host does that work: the grid shows the rows it is given in the order
//! given, takes the record total from
//! [`Model::set_total_records`] and only reports state changes.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_datagrid::grid::Model;
//! use bubbletea_datagrid::{Column, SortDirection};
//! use std::sync::{Arc, Mutex};
//!
//! struct Runner { id: u32, name: &'static str }
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! let mut grid = Model::new(vec![
//!     Column::new("id").accessor(|r: &Runner| r.id.into()),
//!     Column::new("name").accessor(|r: &Runner| r.name.into()).sortable(true),
//! ])
//! .with_rows(vec![Runner { id: 1, name: "Zoe" }, Runner { id: 2, name: "Al" }])
//! .on_sort(move |column, direction| {
//!     log.lock().unwrap().push((column.map(str::to_string), direction));
//! });
//!
//! grid.toggle_sort("name")?;
//! assert_eq!(grid.visible_rows()[0].name, "Al");
//! assert_eq!(
//!     seen.lock().unwrap()[0],
//!     (Some("name".to_string()), Some(SortDirection::Ascending))
//! );
//! # Ok::<(), bubbletea_datagrid::GridError>(())
//! ```

pub mod keys;
pub mod style;

mod model;
mod rendering;

#[cfg(test)]
mod tests;

pub use keys::GridKeyMap;
pub use model::{FilterCallback, Model, PageCallback, RowClickCallback, SortCallback};
pub use style::GridStyles;

use crate::column::Column;
use crate::error::GridError;
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use model::FilterEdit;

/// Reports a failure that happened while handling a key press.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::grid::GridErrorMsg;
///
/// let msg = GridErrorMsg {
///     err: "callback for column `name` failed: boom".to_string(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct GridErrorMsg {
    /// The error message.
    pub err: String,
}

fn error_cmd(err: GridError) -> Cmd {
    log::error!("{err}");
    let err = err.to_string();
    bubbletea_rs::tick(std::time::Duration::from_nanos(1), move |_| {
        Box::new(GridErrorMsg { err: err.clone() }) as Msg
    })
}

impl<T> Model<T> {
    /// Handles key presses.
    ///
    /// ## Browsing
    ///
    /// Rows, columns and pages move with the bindings in [`GridKeyMap`]. The
    /// sort key cycles the focused column, the filter key starts editing the
    /// focused column's filter and enter reports the selected row.
    ///
    /// ## Editing a filter
    ///
    /// Typed characters and backspace change the filter immediately. Enter or
    /// tab keeps the text; escape restores the filter that was active before
    /// editing started.
    ///
    /// Failures are returned as a command producing [`GridErrorMsg`].
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        let result = if self.editing.is_some() {
            self.update_filter_edit(key_msg)
        } else {
            self.update_browsing(key_msg)
        };
        result.err().map(error_cmd)
    }

    fn focused_column_id(&self) -> Option<String> {
        self.columns
            .get(self.focused_column)
            .map(|c| c.id().to_string())
    }

    fn update_browsing(&mut self, key_msg: &KeyMsg) -> crate::Result<()> {
        if self.keymap.row_up.matches(key_msg) {
            self.select_prev();
        } else if self.keymap.row_down.matches(key_msg) {
            self.select_next();
        } else if self.keymap.column_left.matches(key_msg) {
            self.focus_prev_column();
        } else if self.keymap.column_right.matches(key_msg) {
            self.focus_next_column();
        } else if self.keymap.sort.matches(key_msg) {
            if let Some(id) = self.focused_column_id() {
                self.toggle_sort(&id)?;
            }
        } else if self.keymap.filter.matches(key_msg) {
            self.start_filter_edit();
        } else if self.keymap.clear_filters.matches(key_msg) {
            self.clear_filters()?;
        } else if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.page_size.matches(key_msg) {
            self.cycle_page_size();
        } else if self.keymap.select_row.matches(key_msg) {
            self.click_row(self.cursor);
        }
        Ok(())
    }

    fn start_filter_edit(&mut self) {
        let Some(column) = self.columns.get(self.focused_column) else {
            return;
        };
        if !column.is_filterable() {
            return;
        }
        let current = self.filters.get(column.id()).unwrap_or_default().to_string();
        self.editing = Some(FilterEdit {
            column: column.id().to_string(),
            buffer: current.clone(),
            original: current,
        });
    }

    fn update_filter_edit(&mut self, key_msg: &KeyMsg) -> crate::Result<()> {
        let Some(mut edit) = self.editing.take() else {
            return Ok(());
        };

        if self.keymap.cancel_filter.matches(key_msg) {
            return self.set_filter(&edit.column, &edit.original);
        }
        if self.keymap.accept_filter.matches(key_msg) {
            return Ok(());
        }

        match key_msg.key {
            KeyCode::Char(c) => edit.buffer.push(c),
            KeyCode::Backspace => {
                edit.buffer.pop();
            }
            _ => {
                self.editing = Some(edit);
                return Ok(());
            }
        }

        let result = self.set_filter(&edit.column, &edit.buffer);
        if result.is_err() {
            // Keep the text on screen in step with the filter that is actually applied.
            edit.buffer = self
                .filters
                .get(&edit.column)
                .unwrap_or_default()
                .to_string();
        }
        self.editing = Some(edit);
        result
    }

    fn set_focus(&mut self, focus: bool) {
        self.focus = focus;
        if !focus {
            self.editing = None;
        }
    }
}

impl<T> key::KeyMap for Model<T> {
    fn short_help(&self) -> Vec<&Binding> {
        if self.editing.is_some() {
            return vec![&self.keymap.accept_filter, &self.keymap.cancel_filter];
        }
        let mut bindings = vec![
            &self.keymap.row_up,
            &self.keymap.row_down,
            &self.keymap.sort,
            &self.keymap.filter,
        ];
        if !self.filters.is_empty() {
            bindings.push(&self.keymap.clear_filters);
        }
        if self.pagination.is_some() {
            bindings.push(&self.keymap.next_page);
            bindings.push(&self.keymap.prev_page);
        }
        bindings
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        if self.editing.is_some() {
            return vec![vec![&self.keymap.accept_filter, &self.keymap.cancel_filter]];
        }
        let mut groups = vec![
            vec![
                &self.keymap.row_up,
                &self.keymap.row_down,
                &self.keymap.column_left,
                &self.keymap.column_right,
                &self.keymap.select_row,
            ],
            vec![
                &self.keymap.sort,
                &self.keymap.filter,
                &self.keymap.clear_filters,
            ],
        ];
        if let Some(pagination) = &self.pagination {
            let mut paging = vec![&self.keymap.next_page, &self.keymap.prev_page];
            if !pagination.page_size_options.is_empty() {
                paging.push(&self.keymap.page_size);
            }
            groups.push(paging);
        }
        groups
    }
}

// BubbleTeaModel implementation - lets the grid run as a standalone program
impl<T: Send + 'static> BubbleTeaModel for Model<T> {
    /// Creates a grid with no columns and no rows.
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::<Column<T>>::new()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

impl<T> Component for Model<T> {
    fn focus(&mut self) -> Option<Cmd> {
        self.set_focus(true);
        None
    }

    fn blur(&mut self) {
        self.set_focus(false);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
