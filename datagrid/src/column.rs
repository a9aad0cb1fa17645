//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::row::TableRow;
use crate::value::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column's values are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    /// Collated text comparison.
    #[default]
    String,
    /// Numeric comparison.
    Number,
    /// Timestamp comparison.
    Date,
}

/// How a column's filter value is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Case-insensitive substring.
    #[default]
    Text,
    /// Numeric equality.
    Number,
    /// Strict equality against one of the column's options.
    Select,
    /// Matched like text.
    Date,
}

/// One choice of a select filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Typed field accessor.
pub type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Cell renderer: `(value, row, index in page) -> text`.
pub type CellRenderer<T> = Arc<dyn Fn(&Value, &T, usize) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define how one field of a row is displayed, sorted and filtered.
///
/// # Examples
///
/// ```
/// use datagrid::{Column, FilterType, Record, SortType};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name", "Name").sortable().filterable(),
///     Column::new("age", "Age")
///         .sortable()
///         .sort_type(SortType::Number)
///         .filter_type(FilterType::Number),
/// ];
/// ```
pub struct Column<T> {
    /// Field key this column reads.
    pub key: String,
    /// Header text.
    pub title: String,
    /// Whether clicking the header cycles the sort.
    pub sortable: bool,
    /// Whether the header exposes a filter control.
    pub filterable: bool,
    /// Fixed width in terminal columns, if any.
    pub width: Option<u16>,
    /// Horizontal alignment.
    pub align: Alignment,
    pub sort_type: SortType,
    pub filter_type: FilterType,
    /// Choices offered by a select filter.
    pub filter_options: Vec<FilterOption>,
    accessor: Option<Accessor<T>>,
    render: Option<CellRenderer<T>>,
}

impl<T> Column<T> {
    /// Create a new column reading the field `key`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            filterable: false,
            width: None,
            align: Alignment::Left,
            sort_type: SortType::String,
            filter_type: FilterType::Text,
            filter_options: Vec::new(),
            accessor: None,
            render: None,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn sort_type(mut self, sort_type: SortType) -> Self {
        self.sort_type = sort_type;
        self
    }

    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    /// Set the options of a select filter.
    pub fn filter_options(mut self, options: Vec<FilterOption>) -> Self {
        self.filter_options = options;
        self
    }

    /// Read the column's value with a typed accessor instead of
    /// [`TableRow::field`].
    pub fn accessor(mut self, f: impl Fn(&T) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Render cells with a custom function.
    ///
    /// Only the view uses this; sorting and filtering always see the raw
    /// value.
    pub fn render(mut self, f: impl Fn(&Value, &T, usize) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Returns `true` if the column has a custom renderer.
    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: TableRow> Column<T> {
    /// The column's value for `row`.
    pub fn value(&self, row: &T) -> Value {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// The rendered text of this column's cell for `row`.
    pub fn cell_text(&self, row: &T, index: usize) -> String {
        let value = self.value(row);
        match &self.render {
            Some(render) => render(&value, row, index),
            None => value.text(),
        }
    }
}

/// Find the column with the given key.
pub fn find<'a, T>(columns: &'a [Column<T>], key: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|c| c.key == key)
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            width: self.width,
            align: self.align,
            sort_type: self.sort_type,
            filter_type: self.filter_type,
            filter_options: self.filter_options.clone(),
            accessor: self.accessor.clone(),
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sort_type", &self.sort_type)
            .field("filter_type", &self.filter_type)
            .field("filter_options", &self.filter_options)
            .field("accessor", &self.accessor.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}
