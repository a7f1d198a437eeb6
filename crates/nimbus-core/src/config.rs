//! Mapping configuration
//!
//! Options that change how wire documents are materialized are enumerated
//! here and passed explicitly into a [`crate::MappingContext`]. There is no
//! global registry: two contexts with different configs can coexist.

use crate::error::{MappingError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const ENV_DATE_FORMAT: &str = "NIMBUS_DATE_FORMAT";
pub const ENV_STRICT_FIELDS: &str = "NIMBUS_STRICT_FIELDS";

/// Wire convention for date values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// ISO-8601 / RFC 3339 strings
    #[default]
    Iso8601,
    /// Seconds since the Unix epoch
    Epoch,
    /// Milliseconds since the Unix epoch
    EpochMillis,
}

impl FromStr for DateFormat {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "iso8601" | "iso_8601" => Ok(DateFormat::Iso8601),
            "epoch" | "epoch_seconds" => Ok(DateFormat::Epoch),
            "epoch_millis" => Ok(DateFormat::EpochMillis),
            other => Err(MappingError::invalid_argument(
                "date_format",
                format!("unknown date format '{}'", other),
            )),
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFormat::Iso8601 => write!(f, "iso8601"),
            DateFormat::Epoch => write!(f, "epoch"),
            DateFormat::EpochMillis => write!(f, "epoch_millis"),
        }
    }
}

/// Configuration of one mapping context
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Date convention used by the provider
    pub date_format: DateFormat,

    /// Fail on wire keys that map to no attribute instead of ignoring them
    pub strict_fields: bool,
}

impl MappingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn with_strict_fields(mut self, strict_fields: bool) -> Self {
        self.strict_fields = strict_fields;
        self
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded mapping config from {}", path.as_ref().display());
        Self::from_yaml_str(&content)
    }

    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var(ENV_DATE_FORMAT) {
            config.date_format = value.parse()?;
        }

        if let Ok(value) = std::env::var(ENV_STRICT_FIELDS) {
            config.strict_fields = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(MappingError::invalid_argument(
                        ENV_STRICT_FIELDS,
                        format!("expected a boolean, got '{}'", other),
                    ));
                }
            };
        }

        Ok(config)
    }
}
