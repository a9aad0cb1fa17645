//! Table configuration.
//!
//! A [`TableConfig`] describes a table in JSON (camelCase keys, every field
//! optional) and builds a [`DataTable`] over any row type.
//!
//! ```
//! use datagrid::{Record, TableConfig};
//!
//! let config = TableConfig::from_json(r#"{
//!     "columns": [
//!         { "key": "name", "title": "Name", "sortable": true },
//!         { "key": "age", "title": "Age", "sortType": "number", "filterType": "number" }
//!     ],
//!     "pagination": { "pageSize": 20 },
//!     "selectable": true
//! }"#).unwrap();
//!
//! let table = config.build(Vec::<Record>::new()).unwrap();
//! assert!(table.is_selectable());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::column::{Alignment, Column, FilterOption, FilterType, SortType};
use crate::error::ConfigError;
use crate::filter::FilterState;
use crate::pagination::{DEFAULT_PAGE_SIZE_OPTIONS, PageState, PaginationOptions};
use crate::row::{RowKey, TableRow};
use crate::sort::SortState;
use crate::table::{DataTable, TableOptions};

/// One column of a [`TableConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnConfig {
    pub key: String,
    /// Header text; defaults to the key.
    pub title: Option<String>,
    pub sortable: bool,
    pub filterable: bool,
    pub width: Option<u16>,
    pub align: Alignment,
    pub sort_type: SortType,
    pub filter_type: FilterType,
    pub filter_options: Vec<FilterOption>,
}

impl ColumnConfig {
    /// Build the column descriptor.
    pub fn to_column<T>(&self) -> Column<T> {
        let mut column = Column::new(
            self.key.clone(),
            self.title.clone().unwrap_or_else(|| self.key.clone()),
        )
        .align(self.align)
        .sort_type(self.sort_type)
        .filter_type(self.filter_type)
        .filter_options(self.filter_options.clone());
        column.sortable = self.sortable;
        column.filterable = self.filterable;
        column.width = self.width;
        column
    }
}

/// Pagination section of a [`TableConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
    pub page: usize,
    pub page_size: usize,
    pub show_size_changer: bool,
    pub page_size_options: Vec<usize>,
    pub show_quick_jumper: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE_OPTIONS[0],
            show_size_changer: true,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            show_quick_jumper: false,
        }
    }
}

impl PaginationConfig {
    pub fn state(&self) -> Result<PageState, ConfigError> {
        Ok(PageState::new(self.page, self.page_size)?)
    }

    pub fn options(&self) -> PaginationOptions {
        PaginationOptions::default()
            .size_changer(self.show_size_changer)
            .page_size_options(self.page_size_options.clone())
            .quick_jumper(self.show_quick_jumper)
    }
}

/// Serializable description of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    pub columns: Vec<ColumnConfig>,
    /// Field used as row identity; defaults to `id`.
    pub row_key: Option<String>,
    pub pagination: Option<PaginationConfig>,
    pub sort: Option<SortState>,
    pub filters: FilterState,
    pub selectable: bool,
    pub expandable: bool,
    pub bordered: bool,
    pub empty_text: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            row_key: None,
            pagination: None,
            sort: None,
            filters: FilterState::default(),
            selectable: false,
            expandable: false,
            bordered: false,
            empty_text: TableOptions::default().empty_text,
        }
    }
}

impl TableConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Configuration with one sortable, filterable text column per key.
    pub fn inferred<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: keys
                .into_iter()
                .map(|key| ColumnConfig {
                    key: key.into(),
                    sortable: true,
                    filterable: true,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Check column keys, the sort key and the page state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, column) in self.columns.iter().enumerate() {
            if column.key.is_empty() {
                return Err(ConfigError::EmptyColumnKey(index));
            }
            if !seen.insert(column.key.as_str()) {
                return Err(ConfigError::DuplicateColumn(column.key.clone()));
            }
        }
        if let Some(sort) = &self.sort
            && !seen.contains(sort.key.as_str())
        {
            return Err(ConfigError::UnknownSortColumn(sort.key.clone()));
        }
        if let Some(pagination) = &self.pagination {
            pagination.state()?;
        }
        Ok(())
    }

    /// Column descriptors for any row type.
    pub fn columns<T>(&self) -> Vec<Column<T>> {
        self.columns.iter().map(ColumnConfig::to_column).collect()
    }

    /// Build an uncontrolled table over `rows`.
    pub fn build<T: TableRow>(&self, rows: Vec<T>) -> Result<DataTable<T>, ConfigError> {
        self.validate()?;

        let mut table = DataTable::new(self.columns(), rows)
            .initial_sort(self.sort.clone())
            .initial_filter(self.filters.clone())
            .options(TableOptions {
                loading: false,
                bordered: self.bordered,
                empty_text: self.empty_text.clone(),
            });
        if let Some(key) = &self.row_key {
            table = table.row_key(RowKey::field(key.clone()));
        }
        if let Some(pagination) = &self.pagination {
            table = table.paginate(pagination.state()?, pagination.options());
        }
        if self.selectable {
            table = table.selectable();
        }
        if self.expandable {
            table = table.expandable();
        }
        Ok(table)
    }
}
