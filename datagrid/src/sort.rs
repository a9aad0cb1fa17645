//! Single-column sorting and the header click cycle.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::column::{self, Column, SortType};
use crate::row::TableRow;
use crate::value::{self, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Parse `key`, `key:asc` or `key:desc`.
    pub fn parse(input: &str) -> Option<Self> {
        let (key, direction) = match input.rsplit_once(':') {
            Some((key, "asc")) => (key, SortDirection::Ascending),
            Some((key, "desc")) => (key, SortDirection::Descending),
            Some(_) => return None,
            None => (input, SortDirection::Ascending),
        };
        (!key.is_empty()).then(|| Self::new(key, direction))
    }
}

/// Next sort state after the header of column `key` is clicked.
///
/// `None -> asc -> desc -> None` on the same column; clicking a different
/// column always starts at ascending.
pub fn next_sort(current: Option<&SortState>, key: &str) -> Option<SortState> {
    match current {
        Some(state) if state.key == key => match state.direction {
            SortDirection::Ascending => Some(SortState::descending(key)),
            SortDirection::Descending => None,
        },
        _ => Some(SortState::ascending(key)),
    }
}

/// Ascending comparison of two values under a sort type.
///
/// Values without a numeric (or timestamp) form sort after every value that
/// has one and compare equal among themselves.
pub fn compare_values(sort_type: SortType, a: &Value, b: &Value) -> Ordering {
    match sort_type {
        SortType::Number => compare_present(a.number(), b.number(), |x, y| x.total_cmp(&y)),
        SortType::Date => compare_present(a.timestamp(), b.timestamp(), |x, y| x.cmp(&y)),
        SortType::String => value::collate(&a.text(), &b.text()),
    }
}

fn compare_present<N>(a: Option<N>, b: Option<N>, cmp: impl Fn(N, N) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Comparator for a sort state, or `None` when there is nothing to sort by.
///
/// A key with no matching column is read through [`TableRow::field`] and
/// compared as text.
pub fn comparator<'c, T: TableRow>(
    columns: &'c [Column<T>],
    sort: Option<&'c SortState>,
) -> Option<impl Fn(&T, &T) -> Ordering + 'c> {
    let sort = sort?;
    let column = column::find(columns, &sort.key);
    let sort_type = column.map(|c| c.sort_type).unwrap_or_default();
    Some(move |a: &T, b: &T| {
        let (va, vb) = match column {
            Some(column) => (column.value(a), column.value(b)),
            None => (a.field(&sort.key), b.field(&sort.key)),
        };
        sort.direction.apply(compare_values(sort_type, &va, &vb))
    })
}

/// Stable sort of `rows` by the sort state; no sort keeps input order.
pub fn apply<'a, T: TableRow>(
    mut rows: Vec<&'a T>,
    columns: &[Column<T>],
    sort: Option<&SortState>,
) -> Vec<&'a T> {
    if let Some(cmp) = comparator(columns, sort) {
        rows.sort_by(|a, b| cmp(*a, *b));
    }
    rows
}
