//! Pagination state for the grid.
//!
//! The grid works in one of two mutually exclusive [`DataMode`]s:
//!
//! - **Local**: the grid holds the full row set. It filters, sorts and slices
//!   the processed rows itself, and page totals follow the processed length.
//! - **Remote**: the host fetches one already filtered, sorted page at a time.
//!   The grid shows rows as delivered, takes totals from the host, and only
//!   reports sort, filter and page changes so the host can re-request.
//!
//! Filtering a server-delivered page locally would silently report wrong
//! totals, so the grid never mixes the two. Choosing the right mode is the
//! host's job; the grid does not try to detect a mismatch.
//!
//! Like the widget paginators it is modelled on, this type does not render
//! pages of content. It tracks the position and renders the footer line.
//!
//! ```rust
//! use bubbletea_datagrid::pagination::Pagination;
//!
//! let mut pages = Pagination::new(10).with_total_records(42);
//! assert_eq!(pages.total_pages, 5);
//! assert_eq!(pages.slice_bounds(42), (0, 10));
//!
//! pages.next_page();
//! assert_eq!(pages.slice_bounds(42), (10, 20));
//! assert_eq!(pages.view(), "Page 2 of 5 · 42 records");
//! ```

/// Who owns filtering, sorting and paging of the row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataMode {
    /// The grid processes and slices the full row set.
    #[default]
    Local,
    /// The host delivers one processed page at a time.
    Remote,
}

/// Default page size choices offered by the page-size key.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Page position and totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based current page.
    pub page: usize,
    /// Rows per page. Zero is treated as one.
    pub page_size: usize,
    /// Total number of records across all pages.
    pub total_records: usize,
    /// Total number of pages. Never zero.
    pub total_pages: usize,
    /// Page sizes the user can cycle through.
    pub page_size_options: Vec<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE_OPTIONS[0])
    }
}

impl Pagination {
    /// Creates pagination on the first page with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total_records: 0,
            total_pages: 1,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    /// Sets the total record count.
    pub fn with_total_records(mut self, total: usize) -> Self {
        self.set_total_records(total);
        self
    }

    /// Sets the current page, clamped to the last page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options.into_iter().filter(|&n| n > 0).collect();
        self
    }

    /// Sets the total record count and recomputes the page count.
    ///
    /// The current page is clamped so it never points past the last page.
    pub fn set_total_records(&mut self, total: usize) {
        self.total_records = total;
        self.total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size.max(1))
        };
        self.clamp_page();
    }

    /// Overrides the page count, for hosts that report it directly.
    pub fn set_total_pages(&mut self, pages: usize) {
        self.total_pages = pages.max(1);
        self.clamp_page();
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Returns `true` when the size changed.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 0;
        self.set_total_records(self.total_records);
        true
    }

    /// The page size after the current one in `page_size_options`, wrapping around.
    pub fn next_page_size(&self) -> usize {
        let options = &self.page_size_options;
        match options.iter().position(|&n| n == self.page_size) {
            Some(i) => options[(i + 1) % options.len()],
            None => options
                .iter()
                .copied()
                .find(|&n| n > self.page_size)
                .or_else(|| options.first().copied())
                .unwrap_or(self.page_size),
        }
    }

    /// Moves to `page`, clamped to the valid range. Returns `true` when the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.min(self.total_pages.saturating_sub(1));
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Moves to the next page unless already on the last one.
    pub fn next_page(&mut self) -> bool {
        if self.on_last_page() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Moves to the previous page unless already on the first one.
    pub fn prev_page(&mut self) -> bool {
        if self.on_first_page() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Whether the current page is the first.
    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether the current page is the last.
    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// Start and end indices of the current page within a sequence of `length` rows.
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let page_size = self.page_size.max(1);
        let start = (self.page * page_size).min(length);
        let end = (start + page_size).min(length);
        (start, end)
    }

    /// Number of rows on the current page of a `length`-row sequence.
    pub fn items_on_page(&self, length: usize) -> usize {
        let (start, end) = self.slice_bounds(length);
        end - start
    }

    /// Footer text, e.g. `"Page 2 of 5 · 42 records"`.
    pub fn view(&self) -> String {
        let noun = if self.total_records == 1 {
            "record"
        } else {
            "records"
        };
        format!(
            "Page {} of {} · {} {}",
            self.page + 1,
            self.total_pages,
            self.total_records,
            noun
        )
    }

    fn clamp_page(&mut self) {
        if self.page >= self.total_pages {
            self.page = self.total_pages.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_zero_page_size_is_treated_as_one() {
        let mut pages = Pagination {
            page_size: 0,
            ..Default::default()
        };
        pages.set_total_records(5);
        assert_eq!(pages.total_pages, 5);
        assert_eq!(pages.slice_bounds(5), (0, 1));

        pages.set_page(3);
        assert_eq!(pages.slice_bounds(5), (3, 4));
    }

    #[test]
    fn test_zero_records_has_one_page() {
        let p = Pagination::new(10);
        assert_eq!(p.total_pages, 1);
        assert!(p.on_first_page());
        assert!(p.on_last_page());
        assert_eq!(p.slice_bounds(0), (0, 0));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let p = Pagination::new(0).with_total_records(3);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.total_pages, 3);
    }

    #[rstest]
    #[case(0, 45, (0, 10))]
    #[case(4, 45, (40, 45))]
    #[case(2, 25, (20, 25))]
    fn test_slice_bounds(#[case] page: usize, #[case] len: usize, #[case] expected: (usize, usize)) {
        let p = Pagination::new(10).with_total_records(len).with_page(page);
        assert_eq!(p.slice_bounds(len), expected);
    }

    #[test]
    fn test_slice_bounds_past_end_is_empty() {
        let mut p = Pagination::new(10);
        p.set_total_pages(5);
        p.set_page(4);
        assert_eq!(p.slice_bounds(12), (12, 12));
        assert_eq!(p.items_on_page(12), 0);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut p = Pagination::new(10).with_total_records(100).with_page(9);
        p.set_total_records(15);
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_navigation_stops_at_edges() {
        let mut p = Pagination::new(10).with_total_records(20);
        assert!(!p.prev_page());
        assert!(p.next_page());
        assert!(!p.next_page());
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut p = Pagination::new(10).with_total_records(100).with_page(3);
        assert!(p.set_page_size(25));
        assert_eq!(p.page, 0);
        assert_eq!(p.total_pages, 4);
        assert!(!p.set_page_size(25));
    }

    #[test]
    fn test_next_page_size_cycles() {
        let p = Pagination::new(10);
        assert_eq!(p.next_page_size(), 25);
        let p = Pagination::new(100);
        assert_eq!(p.next_page_size(), 10);
        let p = Pagination::new(30);
        assert_eq!(p.next_page_size(), 50);
    }

    #[test]
    fn test_view() {
        let p = Pagination::new(10).with_total_records(1);
        assert_eq!(p.view(), "Page 1 of 1 · 1 record");
    }
}
