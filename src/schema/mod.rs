//! Table schema inference
//!
//! Turns a sample of loosely-typed records into an ordered list of typed,
//! nullability-annotated fields.

pub mod builder;
pub mod inference;
pub mod options;
pub mod sample;
pub mod types;

pub use builder::{SchemaBuilder, ValueClass};
pub use inference::infer_schema;
pub use options::{InferOptions, DEFAULT_SAMPLES};
pub use sample::sample_records;
pub use types::{FieldKind, Schema, SchemaField, MAX_VARCHAR_LEN, SHORT_TEXT_LEN};
