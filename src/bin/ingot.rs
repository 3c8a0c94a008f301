//! ingot: Infer a SQL table from JSON records and print the statements
//!
//! Usage:
//!   # JSON array from a file, CREATE + INSERT to stdout
//!   ingot --table users users.json
//!
//!   # NDJSON from stdin, recreate the table, 500 rows per INSERT
//!   cat events.jsonl | ingot --ndjson --table events --drop --batch-size 500
//!
//!   # Options from a file, date fields on the command line
//!   ingot --config events.options.json --date-field birthday data.json
//!
//!   # Only show the inferred schema
//!   ingot --table users --schema-only users.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use ingot::schema::{infer_schema, InferOptions};
use ingot::sql::{create_table, drop_table, insert_batches};
use ingot::read_records;
use std::fs::File;
use std::io::{stdin, BufRead, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ingot")]
#[command(about = "Infer a SQL table from JSON records", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Process newline-delimited JSON (one JSON object per line)
    #[arg(long)]
    ndjson: bool,

    /// JSON file with inference options (camelCase keys)
    #[arg(long)]
    config: Option<String>,

    /// Table name (overrides the config file)
    #[arg(long, short = 't')]
    table: Option<String>,

    /// Number of records sampled for type inference
    #[arg(long)]
    samples: Option<usize>,

    /// Field holding date/time values (repeatable or comma-separated)
    #[arg(long = "time-field", value_delimiter = ',')]
    time_fields: Vec<String>,

    /// Field holding date-only values (repeatable or comma-separated)
    #[arg(long = "date-field", value_delimiter = ',')]
    date_fields: Vec<String>,

    /// Keep nested objects and arrays as JSON columns
    #[arg(long)]
    allow_json: bool,

    /// Size VARCHAR columns to the longest observed value
    #[arg(long)]
    dynamic_varchar: bool,

    /// IANA time zone for date/time values
    #[arg(long)]
    time_zone: Option<String>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Emit DROP TABLE IF EXISTS before CREATE TABLE
    #[arg(long)]
    drop: bool,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Print the inferred schema as JSON instead of SQL
    #[arg(long)]
    schema_only: bool,

    /// Log inference decisions to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = build_options(&args)?;

    let reader: Box<dyn BufRead> = if let Some(file_path) = &args.input {
        Box::new(BufReader::new(
            File::open(file_path).with_context(|| format!("Failed to open {file_path}"))?,
        ))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let records = read_records(reader, args.ndjson).context("Failed to read records")?;
    let schema = infer_schema(&options, &records).context("Failed to infer schema")?;

    if args.schema_only {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if args.drop {
        println!("{}", drop_table(&schema.name));
    }
    println!("{}", create_table(&schema)?);
    for statement in insert_batches(&schema, &records, args.batch_size)? {
        println!("{statement}");
    }

    Ok(())
}

/// Config file first, then command-line flags on top
fn build_options(args: &Args) -> Result<InferOptions> {
    let mut options: InferOptions = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse options in {path}"))?
        }
        None => InferOptions::default(),
    };

    if let Some(table) = &args.table {
        options.name = table.clone();
    }
    if let Some(samples) = args.samples {
        options.samples = samples;
    }
    options.time_fields.extend(args.time_fields.iter().cloned());
    options.date_fields.extend(args.date_fields.iter().cloned());
    options.allow_json |= args.allow_json;
    options.dynamic_varchar_length |= args.dynamic_varchar;
    if let Some(tz) = &args.time_zone {
        options.time_zone = tz.clone();
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    Ok(options)
}
