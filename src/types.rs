use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde_json::{Number, Value};

/// One input row: field name to value, in the order the fields were written
pub type Record = IndexMap<String, FieldValue>;

/// A dynamically-typed value as found in a loosely-typed record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(Number),
    Boolean(bool),
    /// A native date/time value, already carrying its offset
    DateTime(DateTime<FixedOffset>),
    /// Nested object or array
    Json(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Length in characters, for text values only
    pub fn text_len(&self) -> Option<usize> {
        match self {
            FieldValue::Text(s) => Some(s.chars().count()),
            _ => None,
        }
    }

    /// Convert back to a JSON value (date/times become RFC 3339 strings)
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            FieldValue::Json(v) => v.clone(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => FieldValue::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => FieldValue::Json(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(dt: DateTime<Tz>) -> Self {
        FieldValue::DateTime(dt.fixed_offset())
    }
}

/// Turn a JSON object into a record, keeping its key order
pub fn record_from_json(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, val)| (key, FieldValue::from(val)))
            .collect()),
        other => Err(Error::invalid_record(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
