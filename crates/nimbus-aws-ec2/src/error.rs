//! AWS EC2 error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Ec2Error {
    #[error("Malformed AMI query clause: {0}")]
    MalformedQuery(String),

    #[error("Mapping error: {0}")]
    Mapping(#[from] nimbus_core::MappingError),
}

pub type Result<T> = std::result::Result<T, Ec2Error>;
