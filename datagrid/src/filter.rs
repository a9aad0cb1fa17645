//! Column filters.
//!
//! A [`FilterState`] maps column keys to filter values. Every active entry
//! must match for a row to be kept; the order entries are evaluated in never
//! changes the result.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::column::{self, Column, FilterType};
use crate::row::TableRow;
use crate::value::Value;

/// Mapping from column key to filter value.
///
/// Null and empty-string values are kept in the mapping (the header still
/// shows them) but count as "no filter" for that column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<String, Value>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter value (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Set a filter value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove a column's filter and return its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// The raw filter value for a column, active or not.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterate over the entries that actually filter.
    pub fn active(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_blank())
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if at least one entry filters.
    pub fn is_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Number of entries, active or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Check one cell value against one filter value.
pub fn matches_value(filter_type: FilterType, cell: &Value, filter: &Value) -> bool {
    match filter_type {
        FilterType::Select => cell.strict_eq(filter),
        FilterType::Number => match (cell.number(), filter.number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        FilterType::Text | FilterType::Date => cell
            .text()
            .to_lowercase()
            .contains(&filter.text().to_lowercase()),
    }
}

/// Returns `true` if `row` passes every active filter.
///
/// Filters whose key names no column are ignored.
pub fn matches<T: TableRow>(row: &T, columns: &[Column<T>], filters: &FilterState) -> bool {
    filters.active().all(|(key, filter)| {
        let Some(column) = column::find(columns, key) else {
            return true;
        };
        matches_value(column.filter_type, &column.value(row), filter)
    })
}

/// Keep the rows that pass every active filter, in input order.
pub fn apply<'a, T, I>(rows: I, columns: &[Column<T>], filters: &FilterState) -> Vec<&'a T>
where
    T: TableRow + 'a,
    I: IntoIterator<Item = &'a T>,
{
    rows.into_iter()
        .filter(|row| matches(*row, columns, filters))
        .collect()
}
