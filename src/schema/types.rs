//! Schema types

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default bound for `VARCHAR` columns, and the long-text threshold
pub const SHORT_TEXT_LEN: usize = 255;

/// Largest `VARCHAR` length in characters under utf8mb4
pub const MAX_VARCHAR_LEN: usize = 16_383;

/// Column kind inferred for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    #[serde(rename = "DATETIME")]
    DateTime,
    Date,
    ShortText,
    LongText,
    Integer,
    Boolean,
    JsonBlob,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::DateTime => write!(f, "DATETIME"),
            FieldKind::Date => write!(f, "DATE"),
            FieldKind::ShortText => write!(f, "SHORT_TEXT"),
            FieldKind::LongText => write!(f, "LONG_TEXT"),
            FieldKind::Integer => write!(f, "INTEGER"),
            FieldKind::Boolean => write!(f, "BOOLEAN"),
            FieldKind::JsonBlob => write!(f, "JSON_BLOB"),
        }
    }
}

/// One typed column of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub nullable: bool,

    /// Observed `VARCHAR` bound, only set for short text in dynamic-length mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, kind: FieldKind, nullable: bool) -> Self {
        SchemaField {
            name: name.into(),
            kind,
            nullable,
            max_length: None,
        }
    }

    #[must_use]
    pub fn with_max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    /// The native SQL type this field is declared with
    pub fn sql_type(&self) -> String {
        match self.kind {
            FieldKind::DateTime => "DATETIME(3)".to_string(),
            FieldKind::Date => "DATE".to_string(),
            FieldKind::ShortText => {
                format!("VARCHAR({})", self.max_length.unwrap_or(SHORT_TEXT_LEN).max(1))
            }
            FieldKind::LongText => "TEXT".to_string(),
            FieldKind::Integer => "INT".to_string(),
            FieldKind::Boolean => "BOOLEAN".to_string(),
            FieldKind::JsonBlob => "JSON".to_string(),
        }
    }
}

/// An inferred table: name, ordered fields, and the zone used for date/times
///
/// Built once by the inferrer and then shared read-only by every emitter call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub fields: Vec<SchemaField>,
    pub time_zone: Tz,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Schema {
            name: name.into(),
            fields,
            time_zone: Tz::UTC,
        }
    }

    #[must_use]
    pub fn with_time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = tz;
        self
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The `id` field, which becomes the primary key
    pub fn primary_key(&self) -> Option<&SchemaField> {
        self.field("id")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
