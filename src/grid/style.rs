//! Styling for the grid.
//!
//! All default colors are `AdaptiveColor`s so the grid reads well on both
//! light and dark terminals. Replace individual fields to restyle parts of
//! the grid:
//!
//! ```rust
//! use bubbletea_datagrid::grid::GridStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = GridStyles::default();
//! styles.selected_row = Style::new().reverse(true);
//! ```

use lipgloss_extras::prelude::*;

/// Unicode marker for an ascending sort.
pub const ASCENDING_INDICATOR: &str = "▲";
/// Unicode marker for a descending sort.
pub const DESCENDING_INDICATOR: &str = "▼";
/// Marker appended to truncated cells.
pub const ELLIPSIS: &str = "…";

/// Styles for every visual element of the grid.
#[derive(Debug, Clone)]
pub struct GridStyles {
    /// Column headers.
    pub header: Style,
    /// Header of the column under keyboard focus.
    pub focused_header: Style,
    /// Active filter text.
    pub filter_value: Style,
    /// Placeholder shown for filterable columns without a filter.
    pub filter_placeholder: Style,
    /// Filter text being edited.
    pub filter_editing: Style,
    /// Rule between the header block and the rows.
    pub separator: Style,
    /// Ordinary row.
    pub row: Style,
    /// Selected row.
    pub selected_row: Style,
    /// Message shown when there are no rows.
    pub empty: Style,
    /// Loading message.
    pub loading: Style,
    /// Pagination and filter summary line.
    pub footer: Style,
    /// Error line.
    pub error: Style,
}

impl Default for GridStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let accent = AdaptiveColor {
            Light: "#04B575",
            Dark: "#ECFD65",
        };

        Self {
            header: Style::new().bold(true),
            focused_header: Style::new().bold(true).underline(true).foreground(accent.clone()),
            filter_value: Style::new().foreground(accent),
            filter_placeholder: Style::new().foreground(subdued.clone()),
            filter_editing: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            separator: Style::new().foreground(subdued.clone()),
            row: Style::new(),
            selected_row: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
            empty: Style::new().foreground(subdued.clone()),
            loading: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            footer: Style::new().foreground(subdued),
            error: Style::new().foreground(Color::from("9")),
        }
    }
}
