//! Headless view of a table.
//!
//! [`TableView`] is what a renderer needs to draw the current state: header
//! cells with their sort and filter controls, the rows of the current page
//! with their selection and expansion flags, and the pagination control.
//! [`TableView::to_text`] draws it as a plain-text grid.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Alignment, FilterOption};
use crate::pagination::PageItem;
use crate::row::RowId;
use crate::selection::CheckState;

/// Sort indicator of a sortable column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn symbol(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}

/// Input a filter control uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind<'a> {
    Text,
    Number,
    /// Dropdown with an "All" entry followed by the options.
    Select(&'a [FilterOption]),
}

/// Filter control of a filterable column header.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControl<'a> {
    /// Whether the dropdown is open.
    pub open: bool,
    /// Current filter value as text (empty when unset).
    pub value: String,
    pub kind: FilterKind<'a>,
    pub placeholder: String,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub align: Alignment,
    pub width: Option<u16>,
    /// `None` for columns that are not sortable.
    pub sort: Option<SortIndicator>,
    /// `None` for columns that are not filterable.
    pub filter: Option<FilterControl<'a>>,
}

impl HeaderCell<'_> {
    /// Title followed by the sort indicator, if any.
    pub fn label(&self) -> String {
        match self.sort {
            Some(indicator) => format!("{} {}", self.title, indicator.symbol()),
            None => self.title.to_string(),
        }
    }
}

/// One row of the current page.
#[derive(Debug)]
pub struct BodyRow<'a, T> {
    pub id: &'a RowId,
    pub row: &'a T,
    /// Position within the page.
    pub index: usize,
    pub selected: bool,
    pub expanded: bool,
    /// Rendered cell text, one per column.
    pub cells: Vec<String>,
    /// Detail text shown under the row while expanded.
    pub detail: Option<String>,
}

/// Pagination control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub page_size: usize,
    /// Rows passing the filters.
    pub total: usize,
    pub total_pages: usize,
    /// 1-based first and last row shown.
    pub range: (usize, usize),
    pub summary: String,
    pub items: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
    /// Page size choices, when the size changer is shown.
    pub page_size_options: Option<Vec<usize>>,
    pub quick_jumper: bool,
}

/// Everything the current table state shows.
#[derive(Debug)]
pub struct TableView<'a, T> {
    pub header: Vec<HeaderCell<'a>>,
    /// Header checkbox, when rows are selectable.
    pub select_all: Option<CheckState>,
    pub expandable: bool,
    pub rows: Vec<BodyRow<'a, T>>,
    /// Set when there are no rows to show.
    pub empty_text: Option<&'a str>,
    pub loading: bool,
    pub bordered: bool,
    /// `None` when not paginated, loading, or nothing passes the filters.
    pub pagination: Option<PaginationView>,
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn pad(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(gap)),
        Alignment::Right => format!("{}{}", " ".repeat(gap), text),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

impl<T> TableView<'_, T> {
    /// Draw the view as a fixed-width text grid.
    pub fn to_text(&self) -> String {
        if self.loading {
            return "Loading...\n".to_string();
        }

        // Leading control columns: checkbox, then expand toggle.
        let mut widths: Vec<usize> = Vec::new();
        let mut aligns: Vec<Alignment> = Vec::new();
        let mut header: Vec<String> = Vec::new();
        if let Some(state) = self.select_all {
            widths.push(3);
            aligns.push(Alignment::Left);
            header.push(checkbox(state).to_string());
        }
        if self.expandable {
            widths.push(1);
            aligns.push(Alignment::Center);
            header.push(String::new());
        }

        for (i, cell) in self.header.iter().enumerate() {
            let label = cell.label();
            let width = match cell.width {
                Some(w) => usize::from(w),
                None => self
                    .rows
                    .iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|text| text.width())
                    .chain(std::iter::once(label.width()))
                    .max()
                    .unwrap_or(0),
            };
            widths.push(width);
            aligns.push(cell.align);
            header.push(label);
        }

        let separator = if self.bordered { " | " } else { "  " };
        let join = |cells: &[String]| -> String {
            let line = cells
                .iter()
                .zip(widths.iter().zip(&aligns))
                .map(|(text, (&width, &align))| pad(text, width, align))
                .collect::<Vec<_>>()
                .join(separator);
            line.trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&join(&header));
        out.push('\n');
        let rule_width =
            widths.iter().sum::<usize>() + separator.len() * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule_width));
        out.push('\n');

        if let Some(empty) = self.empty_text {
            out.push_str(empty);
            out.push('\n');
        }

        for row in &self.rows {
            let mut cells: Vec<String> = Vec::with_capacity(widths.len());
            if self.select_all.is_some() {
                let state = if row.selected {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                };
                cells.push(checkbox(state).to_string());
            }
            if self.expandable {
                cells.push(if row.expanded { "-" } else { "+" }.to_string());
            }
            cells.extend(row.cells.iter().cloned());
            out.push_str(&join(&cells));
            out.push('\n');
            if let Some(detail) = &row.detail {
                for line in detail.lines() {
                    out.push_str("    ");
                    out.push_str(line);
                    out.push('\n');
                }
            }
        }

        if let Some(pagination) = &self.pagination {
            out.push('\n');
            out.push_str(&pagination.summary);
            out.push('\n');
            out.push_str(&pagination.controls_text());
            out.push('\n');
        }
        out
    }
}

impl PaginationView {
    /// Navigation line: previous, page buttons, next, and the size choices.
    pub fn controls_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.push(if self.has_previous { "<" } else { " " }.to_string());
        for item in &self.items {
            parts.push(match item {
                PageItem::Page(page) if *page == self.page => format!("[{page}]"),
                PageItem::Page(page) => page.to_string(),
                PageItem::Ellipsis(_) => "...".to_string(),
            });
        }
        parts.push(if self.has_next { ">" } else { " " }.to_string());
        let mut line = parts.join(" ");
        if self.page_size_options.is_some() {
            line.push_str(&format!("  {} / page", self.page_size));
        }
        if self.quick_jumper {
            line.push_str("  Go to");
        }
        line
    }
}
