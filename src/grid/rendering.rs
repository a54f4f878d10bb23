//! Text rendering for the grid.
//!
//! The view is laid out as:
//!
//! ```text
//!   Name ▲       │ Club        │ Time
//!   harbour_     │ any club    │
//! ───────────────┼─────────────┼──────
//! > Ana Lima     │ Harbour RC  │ 41:02
//!   Ben Ortiz    │ Harbour RC  │ 43:10
//!
//! Page 1 of 3 · 24 records · 1 filter active
//! ```
//!
//! The filter line only appears when some column is filterable. Columns
//! without a fixed width take the widest of their header, filter text and
//! visible cells.

use super::model::Model;
use super::style::{ASCENDING_INDICATOR, DESCENDING_INDICATOR, ELLIPSIS};
use crate::column::Column;
use crate::state::SortDirection;
use lipgloss_extras::prelude::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CELL_SEPARATOR: &str = " │ ";
const RULE_SEPARATOR: &str = "─┼─";
const SELECTED_PREFIX: &str = "> ";
const PREFIX: &str = "  ";
const DEFAULT_PLACEHOLDER: &str = "filter…";

/// Pads or truncates `text` to exactly `width` display columns.
pub(super) fn fit(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += ELLIPSIS.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn header_text<T>(column: &Column<T>, direction: SortDirection) -> String {
    let title = column.render_header();
    match direction {
        SortDirection::Ascending => format!("{title} {ASCENDING_INDICATOR}"),
        SortDirection::Descending => format!("{title} {DESCENDING_INDICATOR}"),
        SortDirection::None => title,
    }
}

impl<T> Model<T> {
    /// Rows of the current page as `(processed_index, row)` within the rendered window.
    fn window(&self) -> Vec<(usize, &T)> {
        let (start, end) = self.visible_range();
        let (mut first, mut last) = (start, end);
        if let Some(height) = self.height {
            let offset = (self.cursor + 1).saturating_sub(height);
            first = start + offset;
            last = (first + height).min(end);
        }
        let processed = self.processed();
        (first..last)
            .filter_map(|pos| processed.get(&self.rows, pos).map(|row| (pos, row)))
            .collect()
    }

    fn column_widths(&self, headers: &[String], cells: &[Vec<String>]) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.fixed_width().unwrap_or_else(|| {
                    let filter = self.filter_text(column).map_or(0, |(text, _)| text.width());
                    cells
                        .iter()
                        .map(|row| row[i].width())
                        .chain([headers[i].width(), filter])
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect()
    }

    /// Text of the filter line cell for `column`, with the style to draw it in.
    fn filter_text(&self, column: &Column<T>) -> Option<(String, &Style)> {
        if let Some(edit) = self.editing.as_ref().filter(|e| e.column == column.id()) {
            return Some((format!("{}_", edit.buffer), &self.styles.filter_editing));
        }
        if let Some(value) = self.filters.get(column.id()) {
            return Some((value.to_string(), &self.styles.filter_value));
        }
        if column.is_filterable() {
            let placeholder = column.filter_placeholder().unwrap_or(DEFAULT_PLACEHOLDER);
            return Some((placeholder.to_string(), &self.styles.filter_placeholder));
        }
        None
    }

    fn filter_cell(&self, column: &Column<T>, width: usize) -> String {
        match self.filter_text(column) {
            Some((text, style)) => style.render(&fit(&text, width)),
            None => " ".repeat(width),
        }
    }

    fn footer(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(pagination) = &self.pagination {
            parts.push(pagination.view());
        }
        match self.filters.len() {
            0 => {}
            1 => parts.push("1 filter active".to_string()),
            n => parts.push(format!("{n} filters active")),
        }
        if parts.is_empty() {
            None
        } else {
            Some(self.styles.footer.render(&parts.join(" · ")))
        }
    }

    /// Renders the grid.
    pub fn view(&self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let rows = if self.loading { Vec::new() } else { self.window() };
        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| header_text(c, self.sort.direction_for(c.id())))
            .collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|(index, row)| {
                self.columns
                    .iter()
                    .map(|c| c.render_cell(row, *index))
                    .collect()
            })
            .collect();
        let widths = self.column_widths(&headers, &cells);

        let mut lines = Vec::new();

        // Header
        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (text, width))| {
                let style = if self.focus && i == self.focused_column {
                    &self.styles.focused_header
                } else {
                    &self.styles.header
                };
                style.render(&fit(text, *width))
            })
            .collect();
        lines.push(format!("{PREFIX}{}", header_cells.join(CELL_SEPARATOR)));

        // Filters
        if self.editing.is_some() || self.columns.iter().any(Column::is_filterable) {
            let filter_cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(c, width)| self.filter_cell(c, *width))
                .collect();
            lines.push(format!("{PREFIX}{}", filter_cells.join(CELL_SEPARATOR)));
        }

        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        lines.push(
            self.styles
                .separator
                .render(&format!("──{}", rule.join(RULE_SEPARATOR))),
        );

        // Rows
        if self.loading {
            lines.push(self.styles.loading.render("Loading…"));
        } else if rows.is_empty() {
            lines.push(self.styles.empty.render(&self.empty_message));
        } else {
            let (start, _) = self.visible_range();
            for ((index, _), row_cells) in rows.iter().zip(&cells) {
                let selected = self.focus && *index == start + self.cursor;
                let text: Vec<String> = row_cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, width)| fit(cell, *width))
                    .collect();
                let line = text.join(CELL_SEPARATOR);
                if selected {
                    lines.push(
                        self.styles
                            .selected_row
                            .render(&format!("{SELECTED_PREFIX}{line}")),
                    );
                } else {
                    lines.push(self.styles.row.render(&format!("{PREFIX}{line}")));
                }
            }
        }

        if let Some(footer) = self.footer() {
            lines.push(String::new());
            lines.push(footer);
        }
        if let Some(err) = &self.error {
            lines.push(self.styles.error.render(&format!("Error: {err}")));
        }

        lines.join("\n")
    }
}
