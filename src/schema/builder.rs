//! Streaming column accumulator
//!
//! Sampled records are fed one at a time. Per column the builder remembers
//! the class of the first non-null value and how many records carried a
//! non-null value; the typed field list is resolved once at the end.

use super::options::InferOptions;
use super::types::{FieldKind, SchemaField};
use crate::types::{FieldValue, Record};
use indexmap::IndexMap;

/// Shape of a non-null value, as far as inference cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueClass {
    Text,
    Number,
    Boolean,
    DateTime,
    Json,
}

impl ValueClass {
    /// Classify a value; `None` for null
    pub fn of(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Null => None,
            FieldValue::Text(_) => Some(ValueClass::Text),
            FieldValue::Number(_) => Some(ValueClass::Number),
            FieldValue::Boolean(_) => Some(ValueClass::Boolean),
            FieldValue::DateTime(_) => Some(ValueClass::DateTime),
            FieldValue::Json(_) => Some(ValueClass::Json),
        }
    }
}

/// Statistics gathered for one column
#[derive(Debug, Default)]
struct ColumnStats {
    first_class: Option<ValueClass>,
    non_null_count: usize,
}

impl ColumnStats {
    fn add_value(&mut self, value: &FieldValue) {
        if let Some(class) = ValueClass::of(value) {
            self.non_null_count += 1;
            self.first_class.get_or_insert(class);
        }
    }
}

/// Accumulates column statistics over a sample of records
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    // Insertion order is first appearance across the sample
    columns: IndexMap<String, ColumnStats>,
    sample_count: usize,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sampled record
    pub fn add_record(&mut self, record: &Record) {
        self.sample_count += 1;
        for (key, value) in record {
            self.columns.entry(key.clone()).or_default().add_value(value);
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Column names in first-appearance order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Resolve the typed field list
    ///
    /// Columns that were null or absent in every sampled record are dropped,
    /// as are JSON columns when `allow_json` is off. Text columns come back as
    /// `ShortText`; long-text promotion needs the full input and is left to
    /// the caller.
    pub fn build(&self, options: &InferOptions) -> Vec<SchemaField> {
        let mut fields = Vec::with_capacity(self.columns.len());

        for (name, stats) in &self.columns {
            let Some(class) = stats.first_class else {
                tracing::debug!(field = %name, "dropping field: null in every sampled record");
                continue;
            };

            let kind = resolve_kind(name, class, options);
            if kind == FieldKind::JsonBlob && !options.allow_json {
                tracing::debug!(field = %name, "dropping field: JSON values are not allowed");
                continue;
            }

            let nullable = stats.non_null_count < self.sample_count;
            fields.push(SchemaField::new(name.clone(), kind, nullable));
        }

        fields
    }
}

/// Pick a kind: configured names first, then the value's own shape
pub fn resolve_kind(name: &str, class: ValueClass, options: &InferOptions) -> FieldKind {
    if options.is_time_field(name) {
        return FieldKind::DateTime;
    }
    if options.is_date_field(name) {
        return FieldKind::Date;
    }

    match class {
        ValueClass::DateTime => FieldKind::DateTime,
        ValueClass::Text => FieldKind::ShortText,
        ValueClass::Number => FieldKind::Integer,
        ValueClass::Boolean => FieldKind::Boolean,
        ValueClass::Json => FieldKind::JsonBlob,
    }
}
