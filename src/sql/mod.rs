//! SQL emission for inferred schemas
//!
//! Renders `CREATE TABLE`, multi-row `INSERT` and `DROP TABLE IF EXISTS`
//! statements in the MySQL dialect. A schema is computed once and can be
//! reused for any number of insert batches.

pub mod datetime;
pub mod emit;
pub mod escape;

pub use emit::{create_table, drop_table, insert_batches, insert_many};
pub use escape::{quote_ident, quote_string, quote_value};
