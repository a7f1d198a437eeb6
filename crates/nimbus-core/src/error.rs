//! Mapping and option error types

use thiserror::Error;

/// Errors raised while materializing responses or composing request options
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Selection failed: '{segment}' of path '{path}' not found")]
    Selection { path: String, segment: String },

    #[error("Malformed value: cannot convert {raw} to {target}")]
    MalformedValue { raw: String, target: &'static str },

    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Incomplete {entity}: missing required attribute(s) {}", .missing.join(", "))]
    IncompleteObject {
        entity: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("Duplicate key: {key}")]
    DuplicateKey { key: String },

    #[error("Invalid argument for {option}: {reason}")]
    InvalidArgument { option: &'static str, reason: String },

    #[error("Invalid declaration for {entity}: {reason}")]
    InvalidDeclaration { entity: &'static str, reason: String },

    #[error("Unsupported wire format: {0}")]
    UnsupportedFormat(String),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MappingError {
    /// Builds a [`MappingError::MalformedValue`] for a raw wire node and target type `T`.
    pub fn malformed<T: ?Sized>(raw: &serde_json::Value) -> Self {
        Self::MalformedValue {
            raw: raw.to_string(),
            target: std::any::type_name::<T>(),
        }
    }

    pub fn invalid_argument(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            option,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
