//! Load balancer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadBalancerError {
    #[error("Load balancer not found: {0}")]
    NotFound(String),

    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("No nodes to balance")]
    NoNodes,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Mapping error: {0}")]
    Mapping(#[from] nimbus_core::MappingError),
}

pub type Result<T> = std::result::Result<T, LoadBalancerError>;
