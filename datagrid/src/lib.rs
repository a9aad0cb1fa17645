//! Headless data table.
//!
//! Filtering, sorting, pagination, selection and expansion over caller-owned
//! rows, with each piece of state either owned by the table or controlled by
//! the caller. Rendering is left to the caller: [`DataTable::view`] describes
//! what to draw, and [`TableView::to_text`] draws it as plain text.

pub mod column;
pub mod config;
pub mod control;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod row;
pub mod selection;
pub mod sort;
pub mod table;
pub mod value;
pub mod view;

pub use column::{Alignment, Column, FilterOption, FilterType, SortType};
pub use config::{ColumnConfig, PaginationConfig, TableConfig};
pub use control::Control;
pub use error::{ConfigError, TableError};
pub use expansion::Expansion;
pub use filter::FilterState;
pub use pagination::{PageItem, PageState, PaginationOptions};
pub use record::Record;
pub use row::{RowId, RowKey, TableRow};
pub use selection::{CheckState, Selection};
pub use sort::{SortDirection, SortState};
pub use table::{DataTable, TableOptions};
pub use value::Value;
pub use view::{BodyRow, HeaderCell, PaginationView, SortIndicator, TableView};

pub mod prelude {
    pub use crate::column::{Alignment, Column, FilterOption, FilterType, SortType};
    pub use crate::config::TableConfig;
    pub use crate::filter::FilterState;
    pub use crate::pagination::{PageState, PaginationOptions};
    pub use crate::record::Record;
    pub use crate::row::{RowId, RowKey, TableRow};
    pub use crate::selection::{CheckState, Selection};
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::table::{DataTable, TableOptions};
    pub use crate::value::Value;
}
