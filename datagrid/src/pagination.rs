//! Page slicing and the pagination control model.
//!
//! Pages are 1-based. Nothing here panics on out-of-range input: a page past
//! the end is simply empty.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::TableError;

/// Buttons shown before the page list gets windowed.
const MAX_VISIBLE_PAGES: usize = 7;

/// Default choices of the page size selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    /// Create a page state; both numbers must be at least 1.
    pub fn new(page: usize, page_size: usize) -> Result<Self, TableError> {
        if page == 0 {
            return Err(TableError::InvalidPage(page));
        }
        if page_size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// First page with the given size.
    pub fn first(page_size: usize) -> Result<Self, TableError> {
        Self::new(1, page_size)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows.
    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.page_size)
    }

    /// Move to `target` if it is a different, existing page.
    pub fn go_to(&self, target: usize, total: usize) -> Option<Self> {
        let in_range = (1..=self.total_pages(total)).contains(&target);
        (in_range && target != self.page).then_some(Self {
            page: target,
            page_size: self.page_size,
        })
    }

    pub fn next(&self, total: usize) -> Option<Self> {
        self.go_to(self.page.checked_add(1)?, total)
    }

    pub fn previous(&self, total: usize) -> Option<Self> {
        self.go_to(self.page.saturating_sub(1), total)
    }

    /// Change the page size, keeping the first visible row on screen.
    pub fn resize(&self, page_size: usize) -> Result<Self, TableError> {
        if page_size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        Ok(Self {
            page: resize_page(self.page, self.page_size, page_size),
            page_size,
        })
    }

    /// The rows of the current page.
    pub fn slice<'r, X>(&self, rows: &'r [X]) -> &'r [X] {
        slice(rows, self.page, self.page_size)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE_OPTIONS[0],
        }
    }
}

/// `rows[(page-1)*page_size .. page*page_size]`, clipped to the input.
///
/// Page 0, a zero page size, or a page past the end yield an empty slice.
pub fn slice<X>(rows: &[X], page: usize, page_size: usize) -> &[X] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// `ceil(total / page_size)`; zero rows means zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Page that keeps the first visible row visible after a page size change.
pub fn resize_page(page: usize, old_page_size: usize, new_page_size: usize) -> usize {
    if new_page_size == 0 {
        return 1;
    }
    let first_row = page
        .saturating_sub(1)
        .saturating_mul(old_page_size)
        .saturating_add(1);
    first_row.div_ceil(new_page_size)
}

/// 1-based `(first, last)` row numbers shown on a page.
pub fn display_range(page: usize, page_size: usize, total: usize) -> (usize, usize) {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .saturating_add(1);
    let end = page.saturating_mul(page_size).min(total);
    (start, end)
}

/// Default pagination summary line.
pub fn summary(total: usize, (start, end): (usize, usize)) -> String {
    format!("Showing {start} to {end} of {total} entries")
}

/// Which side of the current page an ellipsis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    Start,
    End,
}

/// One entry of the page button list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis(Gap),
}

/// Page buttons for `page` out of `total_pages`.
///
/// Up to seven pages are listed in full. Past that the list keeps the first
/// and last page, two pages either side of the current one, and ellipses for
/// the gaps.
pub fn page_items(page: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];
    if page > 4 {
        items.push(PageItem::Ellipsis(Gap::Start));
    }
    let start = page.saturating_sub(2).max(2);
    let end = page.saturating_add(2).min(total_pages - 1);
    items.extend((start..=end).map(PageItem::Page));
    if page.saturating_add(3) < total_pages {
        items.push(PageItem::Ellipsis(Gap::End));
    }
    items.push(PageItem::Page(total_pages));
    items
}

/// Parse quick-jump input by its leading integer (`"12abc"` is 12).
///
/// Returns `None` when there is no leading integer or it is negative.
pub fn parse_jump(input: &str) -> Option<usize> {
    let s = input.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: &str = &s[..s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len())];
    digits.parse().ok()
}

/// Custom summary renderer: `(total, (first, last)) -> text`.
pub type TotalRenderer = Arc<dyn Fn(usize, (usize, usize)) -> String + Send + Sync>;

/// Display options of the pagination control.
#[derive(Clone)]
pub struct PaginationOptions {
    pub show_size_changer: bool,
    pub page_size_options: Vec<usize>,
    pub show_quick_jumper: bool,
    pub show_total: Option<TotalRenderer>,
}

impl PaginationOptions {
    pub fn size_changer(mut self, show: bool) -> Self {
        self.show_size_changer = show;
        self
    }

    pub fn page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn quick_jumper(mut self, show: bool) -> Self {
        self.show_quick_jumper = show;
        self
    }

    /// Replace the default summary line.
    pub fn show_total(mut self, f: impl Fn(usize, (usize, usize)) -> String + Send + Sync + 'static) -> Self {
        self.show_total = Some(Arc::new(f));
        self
    }

    /// Summary line for `total` rows and the shown range.
    pub fn total_text(&self, total: usize, range: (usize, usize)) -> String {
        match &self.show_total {
            Some(render) => render(total, range),
            None => summary(total, range),
        }
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            show_size_changer: true,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            show_quick_jumper: false,
            show_total: None,
        }
    }
}

impl fmt::Debug for PaginationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationOptions")
            .field("show_size_changer", &self.show_size_changer)
            .field("page_size_options", &self.page_size_options)
            .field("show_quick_jumper", &self.show_quick_jumper)
            .field("show_total", &self.show_total.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jump() {
        assert_eq!(parse_jump("12"), Some(12));
        assert_eq!(parse_jump("  7 "), Some(7));
        assert_eq!(parse_jump("12abc"), Some(12));
        assert_eq!(parse_jump("+3"), Some(3));
        assert_eq!(parse_jump("-3"), None);
        assert_eq!(parse_jump("abc"), None);
        assert_eq!(parse_jump(""), None);
    }

    #[test]
    fn test_display_range_last_page() {
        assert_eq!(display_range(3, 10, 25), (21, 25));
        assert_eq!(display_range(1, 10, 25), (1, 10));
    }
}
