//! Identifier and literal quoting
//!
//! Every identifier and every value that ends up in generated SQL goes
//! through this module. Identifiers are wrapped in backticks with embedded
//! backticks doubled; string literals are single-quoted with backslash
//! escapes for the characters MySQL treats specially.

use crate::types::FieldValue;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SPECIAL_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\x00\x08\t\n\r\x1a"'\\]"#).unwrap());

/// Quote a table or column name
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a string literal
pub fn quote_string(s: &str) -> String {
    let escaped = SPECIAL_CHARS_REGEX.replace_all(s, |caps: &Captures| {
        match &caps[0] {
            "\x00" => "\\0",
            "\x08" => "\\b",
            "\t" => "\\t",
            "\n" => "\\n",
            "\r" => "\\r",
            "\x1a" => "\\Z",
            "\"" => "\\\"",
            "'" => "\\'",
            _ => "\\\\",
        }
    });
    format!("'{escaped}'")
}

/// Render a value as a literal, without any column-kind conversion
///
/// Nested values have no scalar literal form and are rendered as JSON text.
pub fn quote_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "NULL".to_string(),
        FieldValue::Text(s) => quote_string(s),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::Boolean(b) => b.to_string(),
        FieldValue::DateTime(dt) => quote_string(&dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        FieldValue::Json(v) => quote_string(&v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users"), "`users`");
        assert_eq!(quote_ident("user name"), "`user name`");
        assert_eq!(quote_ident("evil`; DROP TABLE x; --"), "`evil``; DROP TABLE x; --`");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("plain"), "'plain'");
        assert_eq!(quote_string("O'Brien"), r"'O\'Brien'");
        assert_eq!(quote_string("say \"hi\""), r#"'say \"hi\"'"#);
        assert_eq!(quote_string("a\\b"), r"'a\\b'");
        assert_eq!(quote_string("line1\nline2\r\t"), r"'line1\nline2\r\t'");
        assert_eq!(quote_string("nul\0sub\x1a"), r"'nul\0sub\Z'");
    }

    #[test]
    fn test_quote_string_injection() {
        let quoted = quote_string("'); DROP TABLE users; --");
        assert_eq!(quoted, r"'\'); DROP TABLE users; --'");
    }

    #[test]
    fn test_quote_value_scalars() {
        assert_eq!(quote_value(&FieldValue::Null), "NULL");
        assert_eq!(quote_value(&FieldValue::from(42_i64)), "42");
        assert_eq!(quote_value(&FieldValue::from(json!(1.5))), "1.5");
        assert_eq!(quote_value(&FieldValue::Boolean(false)), "false");
        assert_eq!(quote_value(&FieldValue::from("x")), "'x'");
        assert_eq!(quote_value(&FieldValue::from(json!({"a": "b"}))), r#"'{\"a\":\"b\"}'"#);
    }
}
