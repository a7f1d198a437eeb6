//! CloudStack error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudStackError {
    #[error("Invalid page size: {0}")]
    InvalidPageSize(u32),

    #[error("Option {option} requires {requires} to be set")]
    MissingCompanion {
        option: &'static str,
        requires: &'static str,
    },

    #[error("Mapping error: {0}")]
    Mapping(#[from] nimbus_core::MappingError),
}

pub type Result<T> = std::result::Result<T, CloudStackError>;
