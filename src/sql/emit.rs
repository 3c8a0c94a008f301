//! SQL statement rendering
//!
//! All statements are single-line and terminated with `;`. Values are
//! converted according to the column kind and then quoted through
//! [`super::escape`]; nothing from a record is interpolated raw.

use super::datetime::{format_date, format_datetime, value_to_instant};
use super::escape::{quote_ident, quote_string, quote_value};
use crate::error::{Error, Result};
use crate::schema::{FieldKind, Schema, SchemaField};
use crate::types::{FieldValue, Record};

/// Render `CREATE TABLE` for a schema
///
/// A `PRIMARY KEY` clause is appended iff the schema has an `id` field.
pub fn create_table(schema: &Schema) -> Result<String> {
    if schema.is_empty() {
        return Err(Error::no_typeable_fields(&schema.name));
    }

    let mut clauses: Vec<String> = schema.fields.iter().map(column_definition).collect();

    if let Some(pk) = schema.primary_key() {
        clauses.push(format!("PRIMARY KEY ({})", quote_ident(&pk.name)));
    }

    Ok(format!(
        "CREATE TABLE {} ({});",
        quote_ident(&schema.name),
        clauses.join(", ")
    ))
}

fn column_definition(field: &SchemaField) -> String {
    let mut def = format!("{} {}", quote_ident(&field.name), field.sql_type());
    if !field.nullable {
        def.push_str(" NOT NULL");
    }
    def
}

/// Render one multi-row `INSERT` covering every record, in input order
///
/// Each tuple has one value per schema field; fields a record lacks become
/// `NULL`, and fields the schema doesn't know are ignored.
pub fn insert_many(schema: &Schema, records: &[Record]) -> Result<String> {
    if schema.is_empty() {
        return Err(Error::no_typeable_fields(&schema.name));
    }
    if records.is_empty() {
        return Err(Error::EmptyInsert {
            table: schema.name.clone(),
        });
    }

    let columns: Vec<String> = schema.fields.iter().map(|f| quote_ident(&f.name)).collect();
    let rows: Vec<String> = records.iter().map(|r| render_row(schema, r)).collect();

    Ok(format!(
        "INSERT INTO {} ({}) VALUES {};",
        quote_ident(&schema.name),
        columns.join(", "),
        rows.join(", ")
    ))
}

/// Render `INSERT` statements of at most `batch_size` rows each
pub fn insert_batches(schema: &Schema, records: &[Record], batch_size: usize) -> Result<Vec<String>> {
    if batch_size == 0 {
        return Err(Error::invalid_option("batchSize", "must be a positive integer"));
    }
    if records.is_empty() {
        return Err(Error::EmptyInsert {
            table: schema.name.clone(),
        });
    }

    records
        .chunks(batch_size)
        .map(|chunk| insert_many(schema, chunk))
        .collect()
}

/// Render `DROP TABLE IF EXISTS`
pub fn drop_table(name: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_ident(name))
}

fn render_row(schema: &Schema, record: &Record) -> String {
    let values: Vec<String> = schema
        .fields
        .iter()
        .map(|field| {
            record
                .get(&field.name)
                .map_or_else(|| "NULL".to_string(), |value| render_value(schema, field, value))
        })
        .collect();
    format!("({})", values.join(", "))
}

/// Convert a raw value for its column kind, then quote it
fn render_value(schema: &Schema, field: &SchemaField, value: &FieldValue) -> String {
    if value.is_null() {
        return "NULL".to_string();
    }

    match field.kind {
        FieldKind::DateTime => match value_to_instant(value, schema.time_zone) {
            Some(instant) => quote_string(&format_datetime(&instant, schema.time_zone)),
            None => null_for_bad_date(field, value),
        },
        FieldKind::Date => match value_to_instant(value, chrono_tz::Tz::UTC) {
            Some(instant) => quote_string(&format_date(&instant)),
            None => null_for_bad_date(field, value),
        },
        FieldKind::JsonBlob => quote_string(&value.to_json().to_string()),
        FieldKind::ShortText | FieldKind::LongText | FieldKind::Integer | FieldKind::Boolean => {
            if !fits_kind(field.kind, value) {
                tracing::debug!(field = %field.name, kind = %field.kind, ?value, "coercing mismatched value");
            }
            quote_value(value)
        }
    }
}

fn null_for_bad_date(field: &SchemaField, value: &FieldValue) -> String {
    tracing::debug!(field = %field.name, ?value, "unparsable date/time, writing NULL");
    "NULL".to_string()
}

fn fits_kind(kind: FieldKind, value: &FieldValue) -> bool {
    matches!(
        (kind, value),
        (FieldKind::ShortText | FieldKind::LongText, FieldValue::Text(_))
            | (FieldKind::Integer, FieldValue::Number(_))
            | (FieldKind::Boolean, FieldValue::Boolean(_))
    )
}
