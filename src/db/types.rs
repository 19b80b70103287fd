//! Result-set types for the console.
//!
//! Defines the untyped column value and the live row source handed from the
//! executor to the materializer.

use crate::error::{ConsoleError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::fmt;

/// Represents a single value from a database result.
///
/// The per-column type is unknown at compile time; every kind here maps
/// deterministically to a display string via [`Value::to_display_string`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    String(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// Calendar date.
    Date(NaiveDate),

    /// Time of day.
    Time(NaiveTime),

    /// Timestamp without time zone.
    Timestamp(NaiveDateTime),

    /// Timestamp with time zone, normalized to UTC.
    TimestampTz(DateTime<Utc>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Converts the value to its string representation.
    ///
    /// NULL renders as the sentinel "NULL" so it stays distinguishable from
    /// an empty text value.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("<{} bytes>", b.len()),
            Value::Date(d) => d.to_string(),
            Value::Time(t) => t.to_string(),
            Value::Timestamp(ts) => ts.to_string(),
            Value::TimestampTz(ts) => ts.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

// Conversion implementations for common types
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

/// Stream of decoded rows yielded by a row source.
pub type RowStream<'a> = BoxStream<'a, Result<Vec<Value>>>;

/// A live, forward-only cursor over a result set.
///
/// Column labels are known up front (even for zero-row results); rows arrive
/// on demand and any remaining rows may be abandoned mid-drain.
pub struct RowSource<'a> {
    /// Column labels, in result-set order.
    pub columns: Vec<String>,

    /// Decoded rows, in database delivery order.
    pub rows: RowStream<'a>,
}

impl RowSource<'static> {
    /// Builds a row source over in-memory rows.
    pub fn from_values(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows: futures::stream::iter(rows.into_iter().map(Ok::<Vec<Value>, ConsoleError>))
                .boxed(),
        }
    }
}
