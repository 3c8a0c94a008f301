//! Schema inference from loosely-typed records
//!
//! Types and nullability come from a random sample; text width comes from
//! the full input, since a long value outside the sample would otherwise be
//! truncated on load.

use super::builder::SchemaBuilder;
use super::options::InferOptions;
use super::sample::sample_records;
use super::types::{FieldKind, Schema, SchemaField, MAX_VARCHAR_LEN, SHORT_TEXT_LEN};
use crate::error::{Error, Result};
use crate::types::Record;

/// Main entry point: infer a table schema from a collection of records
///
/// # Errors
///
/// * [`Error::InvalidOption`] for an empty table name, zero samples or an
///   unknown time zone
/// * [`Error::EmptyInput`] when `records` is empty
/// * [`Error::NoTypeableFields`] when every discovered field was dropped
pub fn infer_schema(options: &InferOptions, records: &[Record]) -> Result<Schema> {
    let time_zone = options.validate()?;

    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    let sample = sample_records(records, options.samples, options.seed);
    let mut builder = SchemaBuilder::new();
    for record in &sample {
        builder.add_record(record);
    }

    let fields: Vec<SchemaField> = builder
        .build(options)
        .into_iter()
        .map(|field| size_text_field(field, records, options))
        .collect();

    if fields.is_empty() {
        return Err(Error::no_typeable_fields(&options.name));
    }

    let schema = Schema {
        name: options.name.clone(),
        fields,
        time_zone,
    };

    tracing::info!(
        table = %schema.name,
        fields = schema.fields.len(),
        discovered = builder.column_names().count(),
        sampled = builder.sample_count(),
        total = records.len(),
        primary_key = schema.primary_key().is_some(),
        "inferred schema"
    );

    Ok(schema)
}

/// Longest text value for `name` across all records, in characters
fn max_text_len(records: &[Record], name: &str) -> usize {
    records
        .iter()
        .filter_map(|r| r.get(name).and_then(|v| v.text_len()))
        .max()
        .unwrap_or(0)
}

/// Promote or size a short text field using the full record collection
fn size_text_field(mut field: SchemaField, records: &[Record], options: &InferOptions) -> SchemaField {
    if field.kind != FieldKind::ShortText {
        return field;
    }

    let longest = max_text_len(records, &field.name);
    let limit = if options.dynamic_varchar_length {
        MAX_VARCHAR_LEN
    } else {
        SHORT_TEXT_LEN
    };

    if longest > limit {
        tracing::debug!(field = %field.name, longest, "promoting to long text");
        field.kind = FieldKind::LongText;
    } else if options.dynamic_varchar_length {
        field.max_length = Some(longest.max(1));
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{record_from_json, FieldValue};
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| record_from_json(v).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let err = infer_schema(&InferOptions::new("t"), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
    }

    #[test]
    fn test_options_checked_first() {
        let rows = records(vec![json!({"a": 1})]);
        let err = infer_schema(&InferOptions::new(""), &rows).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { .. }));
    }

    #[test]
    fn test_no_typeable_fields() {
        let rows = records(vec![json!({"a": null, "b": {"x": 1}}), json!({"a": null})]);
        let err = infer_schema(&InferOptions::new("t"), &rows).unwrap_err();
        assert!(matches!(err, Error::NoTypeableFields { .. }));
    }

    #[test]
    fn test_date_fields_example() {
        let rows = records(vec![
            json!({"id": 1, "name": "Al", "signup": "2023-01-05"}),
            json!({"id": 2, "name": "Bo", "signup": null}),
        ]);
        let options = InferOptions::new("users").with_date_fields(["signup"]).with_seed(7);
        let schema = infer_schema(&options, &rows).unwrap();

        assert_eq!(
            schema.fields,
            vec![
                SchemaField::new("id", FieldKind::Integer, false),
                SchemaField::new("name", FieldKind::ShortText, false),
                SchemaField::new("signup", FieldKind::Date, true),
            ]
        );
        assert!(schema.primary_key().is_some());
        assert_eq!(schema.time_zone, chrono_tz::Tz::UTC);
    }

    #[test]
    fn test_long_text_found_outside_sample() {
        let mut values: Vec<Value> = (0..50).map(|i| json!({"body": format!("short {i}")})).collect();
        values.push(json!({"body": "x".repeat(SHORT_TEXT_LEN + 1)}));
        let rows = records(values);

        // A one-record sample almost surely misses the long value; the full scan doesn't
        let options = InferOptions::new("posts").with_samples(1).with_seed(3);
        let schema = infer_schema(&options, &rows).unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::LongText);
    }

    #[test]
    fn test_exactly_255_chars_stays_short() {
        let rows = records(vec![json!({"body": "é".repeat(SHORT_TEXT_LEN)})]);
        let schema = infer_schema(&InferOptions::new("posts"), &rows).unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::ShortText);
        assert_eq!(schema.fields[0].max_length, None);
    }

    #[test]
    fn test_dynamic_varchar_length() {
        let rows = records(vec![
            json!({"code": "ab"}),
            json!({"code": "abcdefg"}),
            json!({"code": "x".repeat(300)}),
        ]);
        let options = InferOptions::new("t").with_dynamic_varchar_length(true);
        let schema = infer_schema(&options, &rows).unwrap();

        assert_eq!(schema.fields[0].kind, FieldKind::ShortText);
        assert_eq!(schema.fields[0].max_length, Some(300));
        assert_eq!(schema.fields[0].sql_type(), "VARCHAR(300)");
    }

    #[test]
    fn test_dynamic_varchar_cap() {
        let at_cap = records(vec![json!({"code": "é".repeat(MAX_VARCHAR_LEN)})]);
        let options = InferOptions::new("t").with_dynamic_varchar_length(true);
        let schema = infer_schema(&options, &at_cap).unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::ShortText);
        assert_eq!(schema.fields[0].sql_type(), "VARCHAR(16383)");

        let over_cap = records(vec![json!({"code": "x".repeat(MAX_VARCHAR_LEN + 1)})]);
        let schema = infer_schema(&options, &over_cap).unwrap();
        assert_eq!(schema.fields[0].kind, FieldKind::LongText);
        assert_eq!(schema.fields[0].max_length, None);
    }

    #[test]
    fn test_unsampled_rows_do_not_shape_fields() {
        let mut rows = records((0..20).map(|i| json!({"id": i, "name": "n"})).collect());
        let seed = 11;
        let sampled: Vec<FieldValue> = sample_records(&rows, 5, Some(seed))
            .iter()
            .filter_map(|r| r.get("id").cloned())
            .collect();
        let outside = (0..20_i64)
            .position(|i| !sampled.contains(&FieldValue::from(i)))
            .unwrap();

        // Sampling depends only on length, size and seed, so this row stays out
        rows[outside].insert("name".to_string(), FieldValue::Null);
        rows[outside].insert("extra".to_string(), FieldValue::from("late"));

        let options = InferOptions::new("t").with_samples(5).with_seed(seed);
        let schema = infer_schema(&options, &rows).unwrap();
        assert_eq!(schema.field("name").map(|f| f.nullable), Some(false));
        assert!(schema.field("extra").is_none());
        assert_eq!(schema.fields.len(), 2);
    }

    #[test]
    fn test_sampled_nullability_and_time_zone() {
        let mut rows = records(vec![json!({"at": "2023-01-05 10:00:00"})]);
        rows[0].insert("seen".to_string(), FieldValue::Boolean(true));

        let options = InferOptions::new("t")
            .with_time_fields(["at"])
            .with_time_zone("America/New_York");
        let schema = infer_schema(&options, &rows).unwrap();

        assert_eq!(schema.time_zone, chrono_tz::America::New_York);
        assert_eq!(schema.field("at").map(|f| f.kind), Some(FieldKind::DateTime));
        assert_eq!(schema.field("seen").map(|f| f.nullable), Some(false));
    }
}
