//! # Ingot - Records to SQL Tables
//!
//! Infer a relational table schema from a sample of loosely-typed records
//! and emit SQL consistent with it.
//!
//! ## Modules
//!
//! - **schema**: Infer typed, nullability-annotated fields from sampled records
//! - **sql**: Render `CREATE TABLE`, `INSERT` and `DROP TABLE` statements
//!
//! ## Quick Start
//!
//! ```rust
//! use ingot::schema::{infer_schema, InferOptions};
//! use ingot::sql::{create_table, insert_many};
//! use ingot::record_from_json;
//! use serde_json::json;
//!
//! # fn main() -> ingot::Result<()> {
//! let records = vec![
//!     record_from_json(json!({"id": 1, "name": "Al", "signup": "2023-01-05"}))?,
//!     record_from_json(json!({"id": 2, "name": "Bo", "signup": null}))?,
//! ];
//!
//! let options = InferOptions::new("users").with_date_fields(["signup"]);
//! let schema = infer_schema(&options, &records)?;
//!
//! let ddl = create_table(&schema)?;
//! let dml = insert_many(&schema, &records)?;
//! assert!(ddl.ends_with("PRIMARY KEY (`id`));"));
//! assert!(dml.ends_with("(2, 'Bo', NULL);"));
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::io::BufRead;

pub mod error;
pub mod schema;
pub mod sql;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use schema::{infer_schema, FieldKind, InferOptions, Schema, SchemaField};
pub use sql::{create_table, drop_table, insert_batches, insert_many};
pub use types::{record_from_json, FieldValue, Record};

/// Read records from a JSON array or from newline-delimited JSON objects
pub fn read_records<R: BufRead>(mut reader: R, ndjson: bool) -> Result<Vec<Record>> {
    if !ndjson {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        return match serde_json::from_str::<Value>(&text)? {
            Value::Array(items) => items.into_iter().map(record_from_json).collect(),
            single @ Value::Object(_) => Ok(vec![record_from_json(single)?]),
            _ => Err(Error::invalid_record("expected a JSON array of objects")),
        };
    }

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)?;
        records.push(record_from_json(value)?);
    }

    Ok(records)
}
