//! Inference configuration

use crate::error::{Error, Result};
use chrono_tz::Tz;
use serde::Deserialize;

/// Default number of records sampled for type and nullability decisions
pub const DEFAULT_SAMPLES: usize = 200;

/// Configuration for schema inference
///
/// Keys deserialize in camelCase (`timeFields`, `allowJson`, ...) so an
/// options file written for other loaders can be reused as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InferOptions {
    /// Table name
    pub name: String,

    /// Upper bound on the number of records sampled
    pub samples: usize,

    /// Fields always typed as `DATETIME`
    pub time_fields: Vec<String>,

    /// Fields always typed as `DATE`
    pub date_fields: Vec<String>,

    /// Keep nested objects/arrays as JSON columns instead of dropping them
    pub allow_json: bool,

    /// Size `VARCHAR` columns to the longest observed value
    #[serde(alias = "setVarCharMaxLen")]
    pub dynamic_varchar_length: bool,

    /// IANA zone used to read and render date/time values
    pub time_zone: String,

    /// Seed for reproducible sampling
    pub seed: Option<u64>,
}

impl Default for InferOptions {
    fn default() -> Self {
        InferOptions {
            name: String::new(),
            samples: DEFAULT_SAMPLES,
            time_fields: vec![],
            date_fields: vec![],
            allow_json: false,
            dynamic_varchar_length: false,
            time_zone: String::from("UTC"),
            seed: None,
        }
    }
}

impl InferOptions {
    /// Options for the given table with everything else defaulted
    pub fn new(name: impl Into<String>) -> Self {
        InferOptions {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_time_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_date_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_allow_json(mut self, allow: bool) -> Self {
        self.allow_json = allow;
        self
    }

    #[must_use]
    pub fn with_dynamic_varchar_length(mut self, enabled: bool) -> Self {
        self.dynamic_varchar_length = enabled;
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = tz.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_time_field(&self, name: &str) -> bool {
        self.time_fields.iter().any(|f| f == name)
    }

    pub fn is_date_field(&self, name: &str) -> bool {
        self.date_fields.iter().any(|f| f == name)
    }

    /// Check the options and resolve the configured time zone
    pub fn validate(&self) -> Result<Tz> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_option("name", "table name must not be empty"));
        }
        if self.samples == 0 {
            return Err(Error::invalid_option("samples", "must be a positive integer"));
        }
        self.time_zone.parse::<Tz>().map_err(|e| {
            Error::invalid_option("timeZone", format!("unknown time zone '{}': {e}", self.time_zone))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = InferOptions::new("events");
        assert_eq!(options.samples, DEFAULT_SAMPLES);
        assert_eq!(options.time_zone, "UTC");
        assert!(!options.allow_json);
        assert!(!options.dynamic_varchar_length);
        assert_eq!(options.validate().unwrap(), Tz::UTC);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let options: InferOptions = serde_json::from_value(json!({
            "name": "events",
            "samples": 50,
            "timeFields": ["created_at"],
            "dateFields": ["birthday"],
            "allowJson": true,
            "setVarCharMaxLen": true,
            "timeZone": "Europe/Berlin"
        }))
        .unwrap();

        assert_eq!(options.samples, 50);
        assert!(options.is_time_field("created_at"));
        assert!(options.is_date_field("birthday"));
        assert!(options.allow_json);
        assert!(options.dynamic_varchar_length);
        assert_eq!(options.validate().unwrap(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_validate_rejects_bad_options() {
        let err = InferOptions::default().validate().unwrap_err();
        assert!(err.to_string().contains("'name'"));

        let err = InferOptions::new("t").with_samples(0).validate().unwrap_err();
        assert!(err.to_string().contains("'samples'"));

        let err = InferOptions::new("t")
            .with_time_zone("Mars/Olympus_Mons")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }
}
