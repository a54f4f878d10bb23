//! Key bindings for grid navigation, sorting, filtering and paging.
//!
//! ## Navigation
//!
//! - **Rows**: `↑/k` (up), `↓/j` (down)
//! - **Columns**: `←/h` (previous column), `→/l` (next column)
//! - **Pages**: `pgdn/]` (next page), `pgup/[` (previous page), `p` (cycle page size)
//!
//! ## Sorting and filtering
//!
//! - **Sort**: `s` cycles the focused column through ascending, descending and unsorted
//! - **Filter**: `/` edits the focused column's filter, `enter` accepts, `esc` cancels
//! - **Clear filters**: `x`
//!
//! ## Rows
//!
//! - **Open**: `enter` reports the selected row to the host

use crate::key::Binding;
use crossterm::event::KeyCode;

/// Key bindings used by the grid.
#[derive(Debug, Clone)]
pub struct GridKeyMap {
    /// Select the previous row.
    pub row_up: Binding,
    /// Select the next row.
    pub row_down: Binding,
    /// Focus the previous column.
    pub column_left: Binding,
    /// Focus the next column.
    pub column_right: Binding,
    /// Cycle the sort of the focused column.
    pub sort: Binding,
    /// Edit the filter of the focused column.
    pub filter: Binding,
    /// Remove every filter.
    pub clear_filters: Binding,
    /// Next page.
    pub next_page: Binding,
    /// Previous page.
    pub prev_page: Binding,
    /// Cycle through the page size options.
    pub page_size: Binding,
    /// Report the selected row to the host.
    pub select_row: Binding,
    /// Finish editing a filter, keeping its text.
    pub accept_filter: Binding,
    /// Finish editing a filter, restoring its previous text.
    pub cancel_filter: Binding,
}

impl Default for GridKeyMap {
    fn default() -> Self {
        Self {
            row_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            row_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            column_left: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev column"),
            column_right: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next column"),
            sort: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            filter: Binding::new(vec![KeyCode::Char('/')]).with_help("/", "filter"),
            clear_filters: Binding::new(vec![KeyCode::Char('x')])
                .with_help("x", "clear filters"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Char(']')])
                .with_help("pgdn/]", "next page"),
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Char('[')])
                .with_help("pgup/[", "prev page"),
            page_size: Binding::new(vec![KeyCode::Char('p')]).with_help("p", "page size"),
            select_row: Binding::new(vec![KeyCode::Enter]).with_help("enter", "open"),
            accept_filter: Binding::new(vec![KeyCode::Enter, KeyCode::Tab])
                .with_help("enter", "apply filter"),
            cancel_filter: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}
