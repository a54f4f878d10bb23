//! Column descriptors.
//!
//! A [`Column`] describes how one grid column extracts, renders, sorts and
//! filters its cells. Every behavior is optional: a column with nothing but an
//! id renders empty cells, is never sorted and is skipped by filters.
//!
//! Custom behavior is stored as shared closures, so columns are cheap to clone
//! and can be handed to several grids at once.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_datagrid::{CellValue, Column, FilterConfig, FilterKind};
//!
//! struct Participant { bib: u32, name: String, club: Option<String> }
//!
//! let columns: Vec<Column<Participant>> = vec![
//!     Column::new("bib")
//!         .header("Bib")
//!         .accessor(|p: &Participant| p.bib.into())
//!         .sortable(true)
//!         .width(5),
//!     Column::new("name")
//!         .header("Name")
//!         .accessor(|p: &Participant| p.name.as_str().into())
//!         .sortable(true)
//!         .filterable(true),
//!     Column::new("club")
//!         .accessor(|p: &Participant| p.club.clone().into())
//!         .filter_config(FilterConfig::new(FilterKind::Text).placeholder("any club")),
//! ];
//! assert!(columns[1].is_filterable());
//! ```

use crate::error::CallbackError;
use crate::state::SortDirection;
use crate::value::CellValue;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Extracts a cell value from a row.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Custom ordering for a column. Receives the active direction and owns tie-breaking.
pub type Comparator<T> =
    Arc<dyn Fn(&T, &T, SortDirection) -> Result<Ordering, CallbackError> + Send + Sync>;

/// Custom filter test: `(row, filter_text) -> keep?`.
pub type Predicate<T> = Arc<dyn Fn(&T, &str) -> Result<bool, CallbackError> + Send + Sync>;

/// Custom cell renderer: `(row, processed_index) -> text`.
pub type CellRenderer<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Custom header renderer.
pub type HeaderRenderer<T> = Arc<dyn Fn(&Column<T>) -> String + Send + Sync>;

/// Kind of input a filterable column expects. Used for display hints only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    /// Free text.
    #[default]
    Text,
    /// Numeric text.
    Number,
}

/// Structured filter configuration for a column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterConfig {
    /// Text shown in the filter line while the column has no filter.
    pub placeholder: Option<String>,
    /// Kind of value the filter expects.
    pub kind: FilterKind,
}

impl FilterConfig {
    /// Creates a configuration of the given kind with no placeholder.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            placeholder: None,
            kind,
        }
    }

    /// Sets the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

/// Whether, and how, a column offers a filter input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filterable {
    /// No filter input.
    #[default]
    Disabled,
    /// Plain text filter input.
    Enabled,
    /// Filter input with placeholder and kind.
    Configured(FilterConfig),
}

/// Describes one column of a grid over rows of type `T`.
pub struct Column<T> {
    id: String,
    header: Option<String>,
    width: Option<usize>,
    sortable: bool,
    filter: Filterable,
    accessor: Option<Accessor<T>>,
    comparator: Option<Comparator<T>>,
    predicate: Option<Predicate<T>>,
    cell_renderer: Option<CellRenderer<T>>,
    header_renderer: Option<HeaderRenderer<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            sortable: self.sortable,
            filter: self.filter.clone(),
            accessor: self.accessor.clone(),
            comparator: self.comparator.clone(),
            predicate: self.predicate.clone(),
            cell_renderer: self.cell_renderer.clone(),
            header_renderer: self.header_renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("filter", &self.filter)
            .field("accessor", &self.accessor.is_some())
            .field("comparator", &self.comparator.is_some())
            .field("predicate", &self.predicate.is_some())
            .field("cell_renderer", &self.cell_renderer.is_some())
            .field("header_renderer", &self.header_renderer.is_some())
            .finish()
    }
}

impl<T> Column<T> {
    /// Creates a column with the given unique identifier and no behavior.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            width: None,
            sortable: false,
            filter: Filterable::Disabled,
            accessor: None,
            comparator: None,
            predicate: None,
            cell_renderer: None,
            header_renderer: None,
        }
    }

    /// Sets the header title. Defaults to the column id.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Fixes the rendered width of the column in terminal cells.
    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Enables or disables a plain text filter input.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filter = if filterable {
            Filterable::Enabled
        } else {
            Filterable::Disabled
        };
        self
    }

    /// Enables a filter input with structured configuration.
    pub fn filter_config(mut self, config: FilterConfig) -> Self {
        self.filter = Filterable::Configured(config);
        self
    }

    /// Sets the field accessor used by default rendering, sorting and filtering.
    pub fn accessor<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(accessor));
        self
    }

    /// Sets an infallible custom comparator.
    pub fn comparator<F>(self, compare: F) -> Self
    where
        F: Fn(&T, &T, SortDirection) -> Ordering + Send + Sync + 'static,
    {
        self.try_comparator(move |a, b, dir| Ok(compare(a, b, dir)))
    }

    /// Sets a fallible custom comparator. An error aborts the whole sort.
    pub fn try_comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T, SortDirection) -> Result<Ordering, CallbackError> + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Sets an infallible custom filter predicate.
    pub fn predicate<F>(self, predicate: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        self.try_predicate(move |row, text| Ok(predicate(row, text)))
    }

    /// Sets a fallible custom filter predicate. An error aborts the whole filter pass.
    pub fn try_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T, &str) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Sets a custom cell renderer.
    pub fn cell_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.cell_renderer = Some(Arc::new(render));
        self
    }

    /// Sets a custom header renderer.
    pub fn header_renderer<F>(mut self, render: F) -> Self
    where
        F: Fn(&Column<T>) -> String + Send + Sync + 'static,
    {
        self.header_renderer = Some(Arc::new(render));
        self
    }

    /// The column identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The header title, falling back to the id.
    pub fn title(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.id)
    }

    /// Fixed width, if any.
    pub fn fixed_width(&self) -> Option<usize> {
        self.width
    }

    /// Whether clicking the header cycles the sort.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Whether the grid offers a filter input for this column.
    pub fn is_filterable(&self) -> bool {
        !matches!(self.filter, Filterable::Disabled)
    }

    /// Filter configuration.
    pub fn filter(&self) -> &Filterable {
        &self.filter
    }

    /// Placeholder for an empty filter input, if configured.
    pub fn filter_placeholder(&self) -> Option<&str> {
        match &self.filter {
            Filterable::Configured(config) => config.placeholder.as_deref(),
            _ => None,
        }
    }

    /// Extracts this column's value from `row`, or `None` without an accessor.
    pub fn value(&self, row: &T) -> Option<CellValue> {
        self.accessor.as_ref().map(|accessor| accessor(row))
    }

    /// Renders the cell text for `row` at position `index` of the processed view.
    ///
    /// Uses the custom renderer when present, otherwise the accessor's display
    /// value. Columns with neither render an empty cell.
    pub fn render_cell(&self, row: &T, index: usize) -> String {
        if let Some(render) = &self.cell_renderer {
            return render(row, index);
        }
        self.value(row).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Renders the header text.
    pub fn render_header(&self) -> String {
        match &self.header_renderer {
            Some(render) => render(self),
            None => self.title().to_string(),
        }
    }

    pub(crate) fn custom_comparator(&self) -> Option<&Comparator<T>> {
        self.comparator.as_ref()
    }

    pub(crate) fn custom_predicate(&self) -> Option<&Predicate<T>> {
        self.predicate.as_ref()
    }

    pub(crate) fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }
}

/// Finds a column by id.
pub(crate) fn find<'a, T>(columns: &'a [Column<T>], id: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
    }

    #[test]
    fn test_defaults() {
        let col: Column<Row> = Column::new("name");
        assert_eq!(col.title(), "name");
        assert!(!col.is_sortable());
        assert!(!col.is_filterable());
        assert_eq!(col.render_cell(&Row { name: "x" }, 0), "");
        assert!(col.value(&Row { name: "x" }).is_none());
    }

    #[test]
    fn test_render_prefers_custom_renderer() {
        let col = Column::new("name")
            .accessor(|r: &Row| r.name.into())
            .cell_renderer(|r: &Row, i| format!("{}. {}", i + 1, r.name));
        assert_eq!(col.render_cell(&Row { name: "Amy" }, 2), "3. Amy");
    }

    #[test]
    fn test_header_renderer() {
        let col: Column<Row> = Column::new("name")
            .header("Name")
            .header_renderer(|c| c.title().to_uppercase());
        assert_eq!(col.render_header(), "NAME");
    }

    #[test]
    fn test_filter_placeholder() {
        let col: Column<Row> = Column::new("club")
            .filter_config(FilterConfig::new(FilterKind::Text).placeholder("any club"));
        assert!(col.is_filterable());
        assert_eq!(col.filter_placeholder(), Some("any club"));
        let plain: Column<Row> = Column::new("club").filterable(true);
        assert_eq!(plain.filter_placeholder(), None);
    }
}
