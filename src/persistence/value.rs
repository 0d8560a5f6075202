use std::fmt::Display;

use serde::Serialize;

use super::{RowId, StoreError, StoreResult};

/// The basic types of cell values a column can hold.
///
/// Values are totally ordered so that a [`super::ColumnIndex`] can walk them
/// in sorted order. A column only ever holds one variant, so the ordering
/// between variants never matters in practice.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Value {
    Integer(i64),
    Text(String),
    /// A reference to the id of a row, usually in another table.
    Key(RowId),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INT",
            Value::Text(_) => "TXT",
            Value::Key(_) => "KEY",
        }
    }

    pub fn into_integer(self) -> StoreResult<i64> {
        match self {
            Value::Integer(number) => Ok(number),
            other => Err(mismatch("INT", &other)),
        }
    }

    pub fn into_text(self) -> StoreResult<String> {
        match self {
            Value::Text(text) => Ok(text),
            other => Err(mismatch("TXT", &other)),
        }
    }

    pub fn into_key(self) -> StoreResult<RowId> {
        match self {
            Value::Key(key) => Ok(key),
            other => Err(mismatch("KEY", &other)),
        }
    }
}

fn mismatch(expected: &str, found: &Value) -> StoreError {
    StoreError::InvalidArgument(format!(
        "invalid value {}: not compatible with type {}",
        found, expected
    ))
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(number) => write!(f, "{}", number),
            Value::Text(text) => write!(f, "{}", text),
            Value::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Integer(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<RowId> for Value {
    fn from(key: RowId) -> Self {
        Value::Key(key)
    }
}
