//! TableRow trait and row identity.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::value::Value;

/// Trait for items that can be displayed as rows in a table.
///
/// The only requirement is field lookup by column key. Columns may override
/// the lookup with a typed accessor (see [`Column::accessor`]), so a struct
/// can implement this with a plain `match` and return [`Value::Null`] for
/// anything it does not know.
///
/// [`Column::accessor`]: crate::Column::accessor
///
/// # Examples
///
/// ```
/// use datagrid::{TableRow, Value};
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     fn field(&self, key: &str) -> Value {
///         match key {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait TableRow {
    /// Value of the field named `key`, or `Null` when absent.
    fn field(&self, key: &str) -> Value;
}

impl<R: TableRow + ?Sized> TableRow for &R {
    fn field(&self, key: &str) -> Value {
        (**self).field(key)
    }
}

impl TableRow for HashMap<String, Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }
}

impl TableRow for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Value {
        self.get(key).map(Value::from).unwrap_or_default()
    }
}

impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> Value {
        self.get(key).map(Value::from).unwrap_or_default()
    }
}

/// Stable identifier of a row.
///
/// Used for selection and expansion so both survive sorting, filtering and
/// pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric identifier (also used for the positional fallback).
    Number(i64),
    /// String identifier.
    Text(String),
}

impl RowId {
    /// Identity derived from a field value, or `None` for falsy values.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.is_falsy() {
            return None;
        }
        let id = match value {
            Value::Int(n) => RowId::Number(*n),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                RowId::Number(*f as i64)
            }
            other => RowId::Text(other.text()),
        };
        Some(id)
    }

    /// Parses user input: integers in canonical form (`7`, not `007` or
    /// `+7`) become `Number`, everything else `Text`.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.parse::<i64>() {
            Ok(n) if n.to_string() == trimmed => RowId::Number(n),
            _ => RowId::Text(input.to_string()),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Number(n) => write!(f, "{}", n),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Number(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Number(i64::from(v))
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

/// How a row's identity is derived.
pub enum RowKey<T> {
    /// Read the named field; falsy values fall back to the row position.
    Field(String),
    /// Compute the identity with a function.
    Func(Arc<dyn Fn(&T) -> RowId + Send + Sync>),
}

impl<T> RowKey<T> {
    /// Key rows by the named field.
    pub fn field(key: impl Into<String>) -> Self {
        RowKey::Field(key.into())
    }

    /// Key rows with a custom function.
    pub fn func(f: impl Fn(&T) -> RowId + Send + Sync + 'static) -> Self {
        RowKey::Func(Arc::new(f))
    }
}

impl<T: TableRow> RowKey<T> {
    /// Resolve the identity of `row`, found at `index` in the caller's rows.
    pub fn resolve(&self, row: &T, index: usize) -> RowId {
        match self {
            RowKey::Field(key) => RowId::from_value(&row.field(key))
                .unwrap_or_else(|| RowId::Number(index as i64)),
            RowKey::Func(f) => f(row),
        }
    }

    /// Resolve identities for a whole row sequence, in order.
    pub fn resolve_all(&self, rows: &[T]) -> Vec<RowId> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.resolve(row, index))
            .collect()
    }
}

impl<T> Default for RowKey<T> {
    fn default() -> Self {
        RowKey::Field("id".to_string())
    }
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            RowKey::Field(key) => RowKey::Field(key.clone()),
            RowKey::Func(f) => RowKey::Func(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Field(key) => f.debug_tuple("Field").field(key).finish(),
            RowKey::Func(_) => f.write_str("Func(..)"),
        }
    }
}
