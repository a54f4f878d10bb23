//! Grid model: construction, state handlers and read access.

use super::keys::GridKeyMap;
use super::style::GridStyles;
use crate::column::{self, Column};
use crate::error::{GridError, Result};
use crate::identity::{self, RowKey, RowKeyConfig};
use crate::memo::{MemoKey, MemoizedView};
use crate::pagination::{DataMode, Pagination};
use crate::pipeline::{self, ProcessedRows, EMPTY_VIEW};
use crate::state::{FilterState, SortDirection, SortState};
use std::collections::HashSet;

/// Called with `(column, direction)` after every sort change.
///
/// `(None, None)` means the sort was cleared.
pub type SortCallback = Box<dyn FnMut(Option<&str>, Option<SortDirection>) + Send>;
/// Called with the complete filter state after every filter change.
pub type FilterCallback = Box<dyn FnMut(&FilterState) + Send>;
/// Called with the clicked row and its index in the processed view.
pub type RowClickCallback<T> = Box<dyn FnMut(&T, usize) + Send>;
/// Called with the new zero-based page, or the new page size.
pub type PageCallback = Box<dyn FnMut(usize) + Send>;

pub(super) struct Callbacks<T> {
    pub(super) on_sort: Option<SortCallback>,
    pub(super) on_filter: Option<FilterCallback>,
    pub(super) on_row_click: Option<RowClickCallback<T>>,
    pub(super) on_page_change: Option<PageCallback>,
    pub(super) on_page_size_change: Option<PageCallback>,
}

impl<T> Default for Callbacks<T> {
    fn default() -> Self {
        Self {
            on_sort: None,
            on_filter: None,
            on_row_click: None,
            on_page_change: None,
            on_page_size_change: None,
        }
    }
}

/// Filter text being typed into the focused column.
#[derive(Debug, Clone)]
pub(super) struct FilterEdit {
    pub(super) column: String,
    pub(super) buffer: String,
    pub(super) original: String,
}

/// A sortable, filterable, paginated grid over rows of type `T`.
///
/// The grid owns the sort and filter state and derives the processed view
/// from them. Hosts supply rows and columns, listen to the callbacks, and
/// either let the grid slice pages locally or serve pages themselves (see
/// [`DataMode`]).
///
/// # Examples
///
/// ```rust
/// use bubbletea_datagrid::grid::Model;
/// use bubbletea_datagrid::{Column, Pagination};
///
/// #[derive(Clone)]
/// struct Race { id: u32, name: String, distance_km: f64 }
///
/// let races = vec![
///     Race { id: 1, name: "Harbour 10k".into(), distance_km: 10.0 },
///     Race { id: 2, name: "Hill Marathon".into(), distance_km: 42.2 },
///     Race { id: 3, name: "Harbour Half".into(), distance_km: 21.1 },
/// ];
///
/// let mut grid = Model::new(vec![
///     Column::new("id").accessor(|r: &Race| r.id.into()),
///     Column::new("name")
///         .header("Race")
///         .accessor(|r: &Race| r.name.as_str().into())
///         .sortable(true)
///         .filterable(true),
///     Column::new("distance")
///         .header("km")
///         .accessor(|r: &Race| r.distance_km.into())
///         .sortable(true),
/// ])
/// .with_rows(races)
/// .with_pagination(Pagination::new(2));
///
/// grid.set_filter("name", "harbour")?;
/// grid.toggle_sort("distance")?;
/// let names: Vec<&str> = grid.visible_rows().iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, vec!["Harbour 10k", "Harbour Half"]);
/// # Ok::<(), bubbletea_datagrid::GridError>(())
/// ```
pub struct Model<T> {
    pub(super) columns: Vec<Column<T>>,
    pub(super) rows: Vec<T>,
    pub(super) rows_revision: u64,
    pub(super) columns_revision: u64,
    pub(super) sort: SortState,
    pub(super) filters: FilterState,
    pub(super) memo: MemoizedView,
    pub(super) mode: DataMode,
    pub(super) pagination: Option<Pagination>,
    pub(super) row_key: Option<RowKeyConfig<T>>,
    pub(super) loading: bool,
    pub(super) empty_message: String,
    pub(super) height: Option<usize>,
    pub(super) error: Option<String>,

    // Interaction
    pub(super) cursor: usize,
    pub(super) focused_column: usize,
    pub(super) editing: Option<FilterEdit>,
    pub(super) focus: bool,

    pub(super) styles: GridStyles,
    pub(super) keymap: GridKeyMap,
    pub(super) callbacks: Callbacks<T>,
}

fn validate_columns<T>(columns: &[Column<T>]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.id()) {
            return Err(GridError::DuplicateColumn(column.id().to_string()));
        }
    }
    Ok(())
}

impl<T> Model<T> {
    /// Creates an empty grid with the given columns.
    ///
    /// Duplicate column ids are logged; lookups then resolve to the first
    /// column with that id. Use [`set_columns`](Self::set_columns) to have
    /// duplicates rejected instead.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        if let Err(err) = validate_columns(&columns) {
            log::warn!("{err}");
        }
        let mut grid = Self {
            columns,
            rows: Vec::new(),
            rows_revision: 0,
            columns_revision: 0,
            sort: SortState::unsorted(),
            filters: FilterState::new(),
            memo: MemoizedView::new(),
            mode: DataMode::Local,
            pagination: None,
            row_key: None,
            loading: false,
            empty_message: "No records found".to_string(),
            height: None,
            error: None,
            cursor: 0,
            focused_column: 0,
            editing: None,
            focus: true,
            styles: GridStyles::default(),
            keymap: GridKeyMap::default(),
            callbacks: Callbacks::default(),
        };
        grid.refresh_or_log();
        grid
    }

    /// Sets the rows.
    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self.rows_revision += 1;
        self.refresh_or_log();
        self
    }

    /// Replaces the columns. Duplicate ids are logged, as in [`new`](Self::new).
    pub fn with_columns(mut self, columns: Vec<Column<T>>) -> Self {
        if let Err(err) = validate_columns(&columns) {
            log::warn!("{err}");
        }
        self.columns = columns;
        self.columns_revision += 1;
        self.refresh_or_log();
        self
    }

    /// Starts with `column` sorted in `direction`. Does not invoke the sort callback.
    pub fn with_initial_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = SortState::new(column, direction);
        self.refresh_or_log();
        self
    }

    /// Enables pagination.
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self.refresh_or_log();
        self
    }

    /// Selects who filters, sorts and pages the rows.
    pub fn with_data_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self.memo.clear_cache();
        self.refresh_or_log();
        self
    }

    /// Configures how rows are keyed.
    pub fn with_row_key(mut self, key: RowKeyConfig<T>) -> Self {
        self.row_key = Some(key);
        self
    }

    /// Message shown when there are no rows to display.
    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Limits the number of row lines rendered at once. The rendered window
    /// follows the selected row.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height.max(1));
        self
    }

    /// Sets the loading flag.
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the key bindings.
    pub fn with_key_map(mut self, keymap: GridKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Registers the sort callback.
    pub fn on_sort<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Option<&str>, Option<SortDirection>) + Send + 'static,
    {
        self.callbacks.on_sort = Some(Box::new(callback));
        self
    }

    /// Registers the filter callback.
    pub fn on_filter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FilterState) + Send + 'static,
    {
        self.callbacks.on_filter = Some(Box::new(callback));
        self
    }

    /// Registers the row click callback.
    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T, usize) + Send + 'static,
    {
        self.callbacks.on_row_click = Some(Box::new(callback));
        self
    }

    /// Registers the page change callback.
    pub fn on_page_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.callbacks.on_page_change = Some(Box::new(callback));
        self
    }

    /// Registers the page size change callback.
    pub fn on_page_size_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.callbacks.on_page_size_change = Some(Box::new(callback));
        self
    }

    // --- Derived view ---

    /// Recomputes the processed view if any of its inputs changed.
    ///
    /// On failure the previous view stays in place.
    pub(super) fn refresh(&mut self) -> Result<()> {
        let local = self.mode == DataMode::Local;
        let (filters, sort) = if local {
            (self.filters.clone(), self.sort.clone())
        } else {
            (FilterState::new(), SortState::unsorted())
        };
        let key = MemoKey {
            rows_revision: self.rows_revision,
            columns_revision: self.columns_revision,
            filters: filters.clone(),
            sort: sort.clone(),
        };
        let (rows, columns) = (&self.rows, &self.columns);
        let len = self
            .memo
            .get_or_compute(key, || pipeline::process(rows, columns, &filters, &sort))?
            .len();

        if local {
            if let Some(pagination) = self.pagination.as_mut() {
                pagination.set_total_records(len);
            }
        }
        self.error = None;
        self.clamp_cursor();
        Ok(())
    }

    fn refresh_or_log(&mut self) {
        if let Err(err) = self.refresh() {
            log::error!("failed to process grid rows: {err}");
            self.error = Some(err.to_string());
        }
    }

    pub(super) fn clamp_cursor(&mut self) {
        let visible = self.visible_len();
        if self.cursor >= visible {
            self.cursor = visible.saturating_sub(1);
        }
    }

    /// The full processed view (filtered and sorted, not paginated).
    ///
    /// In [`DataMode::Remote`] this is the delivered rows in delivered order.
    pub fn processed(&self) -> &ProcessedRows {
        self.memo.current().unwrap_or(&EMPTY_VIEW)
    }

    /// Processed positions shown on the current page.
    pub(super) fn visible_range(&self) -> (usize, usize) {
        let len = self.processed().len();
        match (&self.pagination, self.mode) {
            (Some(pagination), DataMode::Local) => pagination.slice_bounds(len),
            _ => (0, len),
        }
    }

    fn visible_len(&self) -> usize {
        let (start, end) = self.visible_range();
        end - start
    }

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<&T> {
        let (start, end) = self.visible_range();
        let processed = self.processed();
        (start..end)
            .filter_map(|pos| processed.get(&self.rows, pos))
            .collect()
    }

    /// Keys of the rows on the current page, in display order.
    pub fn row_keys(&self) -> Vec<RowKey> {
        let (start, end) = self.visible_range();
        let processed = self.processed();
        (start..end)
            .filter_map(|pos| {
                processed.get(&self.rows, pos).map(|row| {
                    identity::resolve_key(row, pos, &self.columns, self.row_key.as_ref())
                })
            })
            .collect()
    }

    // --- Accessors ---

    /// All rows, in host order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Configured columns.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Current sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Current filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.filters
    }

    /// Number of active filters.
    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Pagination state, if enabled.
    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Data mode.
    pub fn data_mode(&self) -> DataMode {
        self.mode
    }

    /// Whether the loading message is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last processing error, if the current view could not be refreshed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Selected position within the current page.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Selected row, if any.
    pub fn selected_row(&self) -> Option<&T> {
        self.visible_rows().get(self.cursor).copied()
    }

    /// Index of the column under keyboard focus.
    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    /// Whether a filter is being typed.
    pub fn is_editing_filter(&self) -> bool {
        self.editing.is_some()
    }

    // --- Row and column handlers ---

    /// Replaces the rows.
    ///
    /// If the new rows cannot be processed the previous rows are restored and
    /// the error is returned.
    pub fn set_rows(&mut self, rows: Vec<T>) -> Result<()> {
        let page = self.current_page();
        let previous = std::mem::replace(&mut self.rows, rows);
        self.rows_revision += 1;
        if let Err(err) = self.refresh() {
            self.rows = previous;
            self.rows_revision += 1;
            self.refresh_or_log();
            return Err(err);
        }
        self.notify_if_page_moved(page);
        Ok(())
    }

    /// Replaces the columns. Duplicate ids are rejected.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<()> {
        validate_columns(&columns)?;
        let page = self.current_page();
        let previous = std::mem::replace(&mut self.columns, columns);
        self.columns_revision += 1;
        if let Err(err) = self.refresh() {
            self.columns = previous;
            self.columns_revision += 1;
            self.refresh_or_log();
            return Err(err);
        }
        if self.focused_column >= self.columns.len() {
            self.focused_column = self.columns.len().saturating_sub(1);
        }
        self.notify_if_page_moved(page);
        Ok(())
    }

    /// Sets the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Sets the total record count reported by the host in [`DataMode::Remote`].
    pub fn set_total_records(&mut self, total: usize) {
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.set_total_records(total);
        }
    }

    fn require_column(&self, column_id: &str) -> Result<&Column<T>> {
        column::find(&self.columns, column_id)
            .ok_or_else(|| GridError::UnknownColumn(column_id.to_string()))
    }

    // --- Sort handlers ---

    /// Header click on `column_id`: cycles ascending, descending, unsorted.
    ///
    /// Clicking a non-sortable column does nothing.
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<()> {
        let column = self.require_column(column_id)?;
        match self.sort.toggle(column) {
            Some(next) => self.apply_sort(next),
            None => {
                log::debug!("ignoring sort on non-sortable column `{column_id}`");
                Ok(())
            }
        }
    }

    /// Sets the sort directly. `None` or a `None` direction clears it.
    pub fn set_sort(&mut self, column_id: Option<&str>, direction: SortDirection) -> Result<()> {
        let next = match column_id {
            Some(id) if !direction.is_none() => {
                self.require_column(id)?;
                SortState::new(id, direction)
            }
            _ => SortState::unsorted(),
        };
        if next == self.sort {
            return Ok(());
        }
        self.apply_sort(next)
    }

    fn apply_sort(&mut self, next: SortState) -> Result<()> {
        let previous = std::mem::replace(&mut self.sort, next);
        if let Err(err) = self.refresh() {
            log::warn!("sort change rejected: {err}");
            self.sort = previous;
            return Err(err);
        }
        log::debug!(
            "sort changed to {:?} {}",
            self.sort.column(),
            self.sort.direction()
        );
        if let Some(callback) = self.callbacks.on_sort.as_mut() {
            let (column, direction) = self.sort.callback_args();
            callback(column, direction);
        }
        Ok(())
    }

    // --- Filter handlers ---

    /// Filter input change on `column_id`. An empty `value` clears that filter.
    pub fn set_filter(&mut self, column_id: &str, value: &str) -> Result<()> {
        self.require_column(column_id)?;
        let mut next = self.filters.clone();
        if !next.set(column_id, value) {
            return Ok(());
        }
        self.apply_filters(next)
    }

    /// Removes the filter on `column_id`.
    pub fn clear_filter(&mut self, column_id: &str) -> Result<()> {
        self.set_filter(column_id, "")
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) -> Result<()> {
        if self.filters.is_empty() {
            return Ok(());
        }
        self.apply_filters(FilterState::new())
    }

    fn apply_filters(&mut self, next: FilterState) -> Result<()> {
        let page = self.current_page();
        let previous = std::mem::replace(&mut self.filters, next);
        if let Err(err) = self.refresh() {
            log::warn!("filter change rejected: {err}");
            self.filters = previous;
            return Err(err);
        }
        log::debug!("{} active filter(s)", self.filters.len());
        if let Some(callback) = self.callbacks.on_filter.as_mut() {
            callback(&self.filters);
        }
        self.cursor = 0;
        if let Some(pagination) = self.pagination.as_mut() {
            pagination.set_page(0);
        }
        self.notify_if_page_moved(page);
        Ok(())
    }

    // --- Pagination handlers ---

    /// Moves to `page`, notifying the host when the page changes.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let changed = match self.pagination.as_mut() {
            Some(pagination) => pagination.set_page(page),
            None => false,
        };
        if changed {
            self.after_page_change();
        }
        changed
    }

    /// Moves to the next page.
    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.as_mut().is_some_and(Pagination::next_page);
        if changed {
            self.after_page_change();
        }
        changed
    }

    /// Moves to the previous page.
    pub fn prev_page(&mut self) -> bool {
        let changed = self.pagination.as_mut().is_some_and(Pagination::prev_page);
        if changed {
            self.after_page_change();
        }
        changed
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let Some(pagination) = self.pagination.as_mut() else {
            return false;
        };
        let was_first = pagination.on_first_page();
        if !pagination.set_page_size(page_size) {
            return false;
        }
        let size = pagination.page_size;
        log::debug!("page size changed to {size}");
        if let Some(callback) = self.callbacks.on_page_size_change.as_mut() {
            callback(size);
        }
        if !was_first {
            self.after_page_change();
        }
        self.clamp_cursor();
        true
    }

    /// Cycles to the next configured page size.
    pub fn cycle_page_size(&mut self) -> bool {
        match self.pagination.as_ref().map(Pagination::next_page_size) {
            Some(size) => self.set_page_size(size),
            None => false,
        }
    }

    fn current_page(&self) -> Option<usize> {
        self.pagination.as_ref().map(|p| p.page)
    }

    /// Reports a page that moved as a side effect of a data or filter change.
    fn notify_if_page_moved(&mut self, before: Option<usize>) {
        if before.is_some() && self.current_page() != before {
            self.after_page_change();
        }
    }

    fn after_page_change(&mut self) {
        self.cursor = 0;
        if let Some(page) = self.pagination.as_ref().map(|p| p.page) {
            log::debug!("moved to page {page}");
            if let Some(callback) = self.callbacks.on_page_change.as_mut() {
                callback(page);
            }
        }
    }

    // --- Selection ---

    /// Selects the previous row on the page.
    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Selects the next row on the page.
    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.visible_len() {
            self.cursor += 1;
        }
    }

    /// Reports the row at `position` on the current page to the row click callback.
    ///
    /// The callback receives the row's index in the processed view. Returns
    /// `false` when `position` is past the end of the page.
    pub fn click_row(&mut self, position: usize) -> bool {
        let (start, end) = self.visible_range();
        let index = start + position;
        if index >= end {
            return false;
        }
        self.cursor = position;
        let Some(source) = self.processed().source_index(index) else {
            return false;
        };
        if let (Some(row), Some(callback)) =
            (self.rows.get(source), self.callbacks.on_row_click.as_mut())
        {
            callback(row, index);
        }
        true
    }

    /// Focuses the previous column.
    pub fn focus_prev_column(&mut self) {
        self.focused_column = self.focused_column.saturating_sub(1);
    }

    /// Focuses the next column.
    pub fn focus_next_column(&mut self) {
        if self.focused_column + 1 < self.columns.len() {
            self.focused_column += 1;
        }
    }
}
