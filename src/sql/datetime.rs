//! Date/time parsing and literal formatting
//!
//! Text without an offset is read in the schema's zone; a wall-clock time
//! skipped by a DST jump is shifted forward by the size of the gap. When that
//! fails the value gets a second chance as a generic ISO-8601 timestamp
//! (extended or basic format, minute precision), with offset-less input read
//! as UTC. Numbers are Unix epoch milliseconds.
//!
//! Literals carry milliseconds, so formatting and parsing back recovers the
//! instant only to millisecond precision.

use crate::types::FieldValue;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Literal layout for `DATETIME` columns
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Literal layout for `DATE` columns
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const ISO_OFFSET_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

/// Parse text as a point in time, reading offset-less input in `tz`
pub fn parse_in_zone(raw: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| midnight(raw, "%Y-%m-%d"))?;

    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => Some(dt.with_timezone(&Utc)),
        None => shift_past_gap(&naive, tz),
    }
}

/// Read a wall-clock time that fell into a DST gap with the offset in force
/// before the jump, which lands it the same distance past the gap
fn shift_past_gap(naive: &NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    let before = *naive - Duration::days(1);
    let offset = tz.offset_from_utc_datetime(&before).fix();
    offset
        .from_local_datetime(naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse text as a generic ISO-8601 timestamp, reading offset-less input as UTC
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    // `%z` has no spelling for Zulu
    let zoned = match raw.strip_suffix('Z') {
        Some(rest) => format!("{rest}+0000"),
        None => raw.to_string(),
    };

    if let Some(dt) = ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&zoned, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    ISO_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| midnight(raw, "%Y-%m-%d"))
        .or_else(|| midnight(raw, "%Y%m%d"))
        .map(|naive| naive.and_utc())
}

fn midnight(raw: &str, fmt: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(raw, fmt)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Read any record value as a point in time, offset-less text in `tz`
pub fn value_to_instant(value: &FieldValue, tz: Tz) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::DateTime(dt) => Some(dt.with_timezone(&Utc)),
        FieldValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        FieldValue::Text(s) => parse_in_zone(s, tz).or_else(|| {
            let parsed = parse_iso8601(s);
            if parsed.is_some() {
                tracing::debug!(value = %s, "date/time parsed by ISO-8601 fallback");
            }
            parsed
        }),
        FieldValue::Null | FieldValue::Boolean(_) | FieldValue::Json(_) => None,
    }
}

/// `DATETIME` literal body: wall-clock time in `tz`, millisecond precision
pub fn format_datetime(instant: &DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format(DATETIME_FORMAT).to_string()
}

/// `DATE` literal body: calendar date of the UTC instant
pub fn format_date(instant: &DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}
