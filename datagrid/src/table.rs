//! The data table: state ownership, events and the row pipeline.
//!
//! `DataTable<T>` holds the caller's rows and columns and one [`Control`] per
//! concern. Rows flow through a fixed pipeline every time they are read:
//!
//! ```text
//! rows -> filter -> sort -> page -> view
//! ```
//!
//! Selection and expansion sit beside the pipeline, keyed by [`RowId`].
//!
//! # Example
//!
//! ```
//! use datagrid::prelude::*;
//!
//! let rows = vec![
//!     Record::new().set("id", 1).set("name", "Bob").set("age", 30),
//!     Record::new().set("id", 2).set("name", "Ann").set("age", 25),
//! ];
//! let columns = vec![
//!     Column::new("name", "Name").sortable(),
//!     Column::new("age", "Age").sort_type(SortType::Number),
//! ];
//!
//! let mut table = DataTable::new(columns, rows);
//! table.click_header("name");
//!
//! let names: Vec<String> = table
//!     .processed()
//!     .iter()
//!     .map(|row| row.field("name").text())
//!     .collect();
//! assert_eq!(names, ["Ann", "Bob"]);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::column::{self, Column, FilterType};
use crate::control::Control;
use crate::error::TableError;
use crate::expansion::Expansion;
use crate::filter::{self, FilterState};
use crate::pagination::{self, PageState, PaginationOptions};
use crate::row::{RowId, RowKey, TableRow};
use crate::selection::{CheckState, Selection};
use crate::sort::{self, SortDirection, SortState};
use crate::value::Value;
use crate::view::{
    BodyRow, FilterControl, FilterKind, HeaderCell, PaginationView, SortIndicator, TableView,
};

/// Expansion notification: `(now_expanded, row)`.
pub type ExpandCallback<T> = Box<dyn FnMut(bool, &T) + Send>;

/// Detail text shown under an expanded row.
pub type DetailRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Table-wide display options.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Show a loading placeholder instead of rows.
    pub loading: bool,
    /// Draw column separators.
    pub bordered: bool,
    /// Text shown when no row survives the pipeline.
    pub empty_text: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            loading: false,
            bordered: false,
            empty_text: "No data".to_string(),
        }
    }
}

struct Paging {
    state: Control<PageState>,
    options: PaginationOptions,
}

/// A headless data table.
///
/// Build it with [`DataTable::new`] and the builder methods, feed it events
/// (`click_header`, `set_filter_value`, `toggle_selection`, ...) and read the
/// result through [`processed`](DataTable::processed),
/// [`page_rows`](DataTable::page_rows) or [`view`](DataTable::view).
///
/// Every concern defaults to uncontrolled. The `controlled_*` builders hand
/// ownership to the caller: events then only invoke the callback, and the
/// caller pushes the new value back with the matching `set_*` method.
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    ids: Vec<RowId>,
    row_key: RowKey<T>,
    sort: Control<Option<SortState>>,
    filter: Control<FilterState>,
    paging: Option<Paging>,
    selectable: bool,
    selection: Control<Selection>,
    expandable: bool,
    expansion: Expansion,
    on_expand: Option<ExpandCallback<T>>,
    detail: Option<DetailRenderer<T>>,
    open_filters: HashSet<String>,
    options: TableOptions,
}

impl<T: TableRow> DataTable<T> {
    /// Create a table over `rows`, keyed by their `id` field.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        let row_key = RowKey::default();
        let ids = row_key.resolve_all(&rows);
        Self {
            columns,
            rows,
            ids,
            row_key,
            sort: Control::default(),
            filter: Control::default(),
            paging: None,
            selectable: false,
            selection: Control::default(),
            expandable: false,
            expansion: Expansion::new(),
            on_expand: None,
            detail: None,
            open_filters: HashSet::new(),
            options: TableOptions::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    /// Set how row identities are derived.
    pub fn row_key(mut self, row_key: RowKey<T>) -> Self {
        self.ids = row_key.resolve_all(&self.rows);
        self.row_key = row_key;
        self
    }

    /// Own the sort state, starting from `sort`.
    pub fn initial_sort(mut self, sort: Option<SortState>) -> Self {
        self.sort = Control::uncontrolled(sort);
        self
    }

    /// Let the caller own the sort state.
    pub fn controlled_sort(
        mut self,
        sort: Option<SortState>,
        on_sort: impl FnMut(Option<SortState>) + Send + 'static,
    ) -> Self {
        self.sort = Control::controlled(sort, on_sort);
        self
    }

    /// Own the filter state, starting from `filters`.
    pub fn initial_filter(mut self, filters: FilterState) -> Self {
        self.filter = Control::uncontrolled(filters);
        self
    }

    /// Let the caller own the filter state.
    pub fn controlled_filter(
        mut self,
        filters: FilterState,
        on_filter: impl FnMut(FilterState) + Send + 'static,
    ) -> Self {
        self.filter = Control::controlled(filters, on_filter);
        self
    }

    /// Split rows into pages the table navigates itself.
    pub fn paginate(mut self, state: PageState, options: PaginationOptions) -> Self {
        self.paging = Some(Paging {
            state: Control::uncontrolled(state),
            options,
        });
        self
    }

    /// Split rows into pages navigated by the caller.
    ///
    /// `on_change` receives `(page, page_size)`.
    pub fn controlled_pagination(
        mut self,
        state: PageState,
        options: PaginationOptions,
        mut on_change: impl FnMut(usize, usize) + Send + 'static,
    ) -> Self {
        self.paging = Some(Paging {
            state: Control::controlled(state, move |s: PageState| {
                on_change(s.page(), s.page_size())
            }),
            options,
        });
        self
    }

    /// Enable row selection.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Enable row selection, starting from the given IDs.
    pub fn initial_selection(mut self, ids: Vec<RowId>) -> Self {
        self.selectable = true;
        self.selection = Control::uncontrolled(Selection::all(ids));
        self
    }

    /// Enable row selection owned by the caller.
    pub fn controlled_selection(
        mut self,
        ids: Vec<RowId>,
        mut on_change: impl FnMut(Vec<RowId>) + Send + 'static,
    ) -> Self {
        self.selectable = true;
        self.selection = Control::controlled(Selection::all(ids), move |s: Selection| {
            on_change(s.into())
        });
        self
    }

    /// Enable row expansion.
    pub fn expandable(mut self) -> Self {
        self.expandable = true;
        self
    }

    /// Be told when a row is expanded or collapsed.
    pub fn on_expand(mut self, f: impl FnMut(bool, &T) + Send + 'static) -> Self {
        self.on_expand = Some(Box::new(f));
        self
    }

    /// Render detail text under expanded rows.
    pub fn expanded_row_render(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.detail = Some(Arc::new(f));
        self
    }

    /// Set the display options.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// The caller's rows, in input order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Replace the rows; identities are re-derived.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.ids = self.row_key.resolve_all(&rows);
        self.rows = rows;
        debug!("table rows replaced ({} rows)", self.rows.len());
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.open_filters
            .retain(|key| columns.iter().any(|c| &c.key == key && c.filterable));
        self.columns = columns;
    }

    /// Identity of the row at `index` in input order.
    pub fn row_id(&self, index: usize) -> Option<&RowId> {
        self.ids.get(index)
    }

    /// Row with the given identity; with duplicates the last one wins.
    pub fn find_row(&self, id: &RowId) -> Option<&T> {
        self.ids
            .iter()
            .rposition(|candidate| candidate == id)
            .map(|index| &self.rows[index])
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.options.loading
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Input indices of the filtered and sorted rows (all pages).
    pub fn processed_indices(&self) -> Vec<usize> {
        let filters = self.filter.get();
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| filter::matches(&self.rows[i], &self.columns, filters))
            .collect();
        if let Some(cmp) = sort::comparator(&self.columns, self.sort.get().as_ref()) {
            indices.sort_by(|&a, &b| cmp(&self.rows[a], &self.rows[b]));
        }
        trace!(
            "pipeline kept {} of {} rows",
            indices.len(),
            self.rows.len()
        );
        indices
    }

    /// Filtered and sorted rows (all pages).
    pub fn processed(&self) -> Vec<&T> {
        self.processed_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    /// Identities of the filtered and sorted rows (all pages).
    pub fn visible_ids(&self) -> Vec<RowId> {
        self.processed_indices()
            .into_iter()
            .map(|i| self.ids[i].clone())
            .collect()
    }

    /// Number of rows that pass the filters.
    pub fn total(&self) -> usize {
        let filters = self.filter.get();
        self.rows
            .iter()
            .filter(|row| filter::matches(*row, &self.columns, filters))
            .count()
    }

    /// Input indices of the rows on the current page.
    pub fn page_indices(&self) -> Vec<usize> {
        let indices = self.processed_indices();
        match &self.paging {
            Some(paging) => paging.state.get().slice(&indices).to_vec(),
            None => indices,
        }
    }

    /// Rows on the current page (every row when not paginated).
    pub fn page_rows(&self) -> Vec<&T> {
        self.page_indices()
            .into_iter()
            .map(|i| &self.rows[i])
            .collect()
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.get().as_ref()
    }

    /// Push a new sort state (controlled) or override the owned one.
    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort.set(sort);
    }

    /// Handle a click on the header of column `key`.
    ///
    /// Cycles ascending, descending, unsorted. Unknown and non-sortable
    /// columns are ignored and return `false`.
    pub fn click_header(&mut self, key: &str) -> bool {
        let sortable = column::find(&self.columns, key).is_some_and(|c| c.sortable);
        if !sortable {
            return false;
        }
        let next = sort::next_sort(self.sort.get().as_ref(), key);
        debug!("sort on '{}' -> {:?}", key, next);
        self.sort.dispatch(next);
        true
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    pub fn filters(&self) -> &FilterState {
        self.filter.get()
    }

    /// Push a new filter mapping (controlled) or override the owned one.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filter.set(filters);
    }

    /// Set one column's filter value, keeping the others.
    pub fn set_filter_value(&mut self, key: &str, value: impl Into<Value>) {
        let next = self.filter.get().clone().with(key, value);
        debug!("filter on '{}' -> {:?}", key, next.get(key));
        self.filter.dispatch(next);
    }

    /// Open or close the filter control of a filterable column.
    pub fn toggle_filter_panel(&mut self, key: &str) -> bool {
        let filterable = column::find(&self.columns, key).is_some_and(|c| c.filterable);
        if !filterable {
            return false;
        }
        if !self.open_filters.remove(key) {
            self.open_filters.insert(key.to_string());
        }
        true
    }

    pub fn is_filter_open(&self, key: &str) -> bool {
        self.open_filters.contains(key)
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current page state, or `None` when the table is not paginated.
    pub fn page_state(&self) -> Option<PageState> {
        self.paging.as_ref().map(|p| *p.state.get())
    }

    pub fn pagination_options(&self) -> Option<&PaginationOptions> {
        self.paging.as_ref().map(|p| &p.options)
    }

    /// Push a new page state (controlled) or override the owned one.
    pub fn set_page_state(&mut self, state: PageState) {
        if let Some(paging) = &mut self.paging {
            paging.state.set(state);
        }
    }

    fn navigate(&mut self, next: impl FnOnce(&PageState, usize) -> Option<PageState>) -> bool {
        let total = self.total();
        let Some(paging) = &mut self.paging else {
            return false;
        };
        let Some(state) = next(paging.state.get(), total) else {
            return false;
        };
        debug!("page -> {} (size {})", state.page(), state.page_size());
        paging.state.dispatch(state);
        true
    }

    /// Go to `page` if it exists and is not the current page.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigate(|state, total| state.go_to(page, total))
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(PageState::next)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(PageState::previous)
    }

    /// Jump to the page typed into the quick jumper.
    pub fn quick_jump(&mut self, input: &str) -> bool {
        match pagination::parse_jump(input) {
            Some(page) => self.go_to_page(page),
            None => false,
        }
    }

    /// Change the page size, keeping the first visible row on screen.
    ///
    /// Returns `Ok(false)` when the table is not paginated.
    pub fn change_page_size(&mut self, page_size: usize) -> Result<bool, TableError> {
        let Some(paging) = &mut self.paging else {
            return Ok(false);
        };
        let next = paging.state.get().resize(page_size)?;
        debug!("page size -> {} (page {})", next.page_size(), next.page());
        paging.state.dispatch(next);
        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn selection(&self) -> &Selection {
        self.selection.get()
    }

    /// Push a new selection (controlled) or override the owned one.
    pub fn set_selection(&mut self, ids: Vec<RowId>) {
        self.selection.set(Selection::all(ids));
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.get().contains(id)
    }

    /// Toggle one row's checkbox.
    pub fn toggle_selection(&mut self, id: &RowId) -> bool {
        if !self.selectable {
            return false;
        }
        let next = self.selection.get().toggle(id);
        debug!("selection toggled {} ({} selected)", id, next.len());
        self.selection.dispatch(next);
        true
    }

    /// Handle the header checkbox: select every visible row on every page,
    /// or clear the selection.
    pub fn select_all(&mut self, checked: bool) -> bool {
        if !self.selectable {
            return false;
        }
        let next = if checked {
            Selection::all(self.visible_ids())
        } else {
            Selection::none()
        };
        debug!("select all = {} ({} selected)", checked, next.len());
        self.selection.dispatch(next);
        true
    }

    /// State of the header checkbox.
    pub fn select_all_state(&self) -> CheckState {
        self.selection.get().check_state(&self.visible_ids())
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    pub fn is_expanded(&self, id: &RowId) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    /// Expand or collapse a row.
    ///
    /// Returns the new flag, or `None` if expansion is disabled or no row has
    /// this identity.
    pub fn toggle_expansion(&mut self, id: &RowId) -> Option<bool> {
        if !self.expandable {
            return None;
        }
        let index = self.ids.iter().rposition(|candidate| candidate == id)?;
        self.expansion = self.expansion.toggle(id);
        let expanded = self.expansion.is_expanded(id);
        debug!("row {} expanded = {}", id, expanded);
        if let Some(on_expand) = &mut self.on_expand {
            on_expand(expanded, &self.rows[index]);
        }
        Some(expanded)
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Compose everything the current state shows.
    pub fn view(&self) -> TableView<'_, T> {
        let sort = self.sort.get().as_ref();
        let header = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: &column.key,
                title: &column.title,
                align: column.align,
                width: column.width,
                sort: column.sortable.then(|| match sort {
                    Some(s) if s.key == column.key => match s.direction {
                        SortDirection::Ascending => SortIndicator::Ascending,
                        SortDirection::Descending => SortIndicator::Descending,
                    },
                    _ => SortIndicator::Unsorted,
                }),
                filter: column.filterable.then(|| self.filter_control(column)),
            })
            .collect();

        let processed = self.processed_indices();
        let total = processed.len();
        let page: Vec<usize> = match &self.paging {
            Some(paging) => paging.state.get().slice(&processed).to_vec(),
            None => processed.clone(),
        };

        let rows: Vec<BodyRow<'_, T>> = if self.options.loading {
            Vec::new()
        } else {
            page.iter()
                .enumerate()
                .map(|(position, &i)| self.body_row(i, position))
                .collect()
        };

        let select_all = self.selectable.then(|| {
            let visible: Vec<RowId> = processed.iter().map(|&i| self.ids[i].clone()).collect();
            self.selection.get().check_state(&visible)
        });

        let pagination = match &self.paging {
            Some(paging) if total > 0 && !self.options.loading => {
                Some(pagination_view(paging, total))
            }
            _ => None,
        };

        TableView {
            header,
            select_all,
            expandable: self.expandable,
            empty_text: (rows.is_empty() && !self.options.loading)
                .then_some(self.options.empty_text.as_str()),
            rows,
            loading: self.options.loading,
            bordered: self.options.bordered,
            pagination,
        }
    }

    fn filter_control<'a>(&'a self, column: &'a Column<T>) -> FilterControl<'a> {
        let kind = match column.filter_type {
            FilterType::Select if !column.filter_options.is_empty() => {
                FilterKind::Select(&column.filter_options)
            }
            FilterType::Number => FilterKind::Number,
            _ => FilterKind::Text,
        };
        FilterControl {
            open: self.open_filters.contains(&column.key),
            value: self
                .filter
                .get()
                .get(&column.key)
                .map(Value::text)
                .unwrap_or_default(),
            kind,
            placeholder: format!("Filter {}", column.title),
        }
    }

    fn body_row(&self, index: usize, position: usize) -> BodyRow<'_, T> {
        let row = &self.rows[index];
        let id = &self.ids[index];
        let expanded = self.expandable && self.expansion.is_expanded(id);
        BodyRow {
            id,
            row,
            index: position,
            selected: self.selectable && self.selection.get().contains(id),
            expanded,
            cells: self
                .columns
                .iter()
                .map(|column| column.cell_text(row, position))
                .collect(),
            detail: self
                .detail
                .as_ref()
                .filter(|_| expanded)
                .map(|render| render(row)),
        }
    }
}

fn pagination_view(paging: &Paging, total: usize) -> PaginationView {
    let state = paging.state.get();
    let total_pages = state.total_pages(total);
    let range = pagination::display_range(state.page(), state.page_size(), total);
    PaginationView {
        page: state.page(),
        page_size: state.page_size(),
        total,
        total_pages,
        range,
        summary: paging.options.total_text(total, range),
        items: pagination::page_items(state.page(), total_pages),
        has_previous: state.page() > 1,
        has_next: state.page() < total_pages,
        page_size_options: paging
            .options
            .show_size_changer
            .then(|| paging.options.page_size_options.clone()),
        quick_jumper: paging.options.show_quick_jumper,
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("row_key", &self.row_key)
            .field("sort", &self.sort)
            .field("filter", &self.filter)
            .field("selectable", &self.selectable)
            .field("selection", &self.selection)
            .field("expandable", &self.expandable)
            .field("expansion", &self.expansion)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
