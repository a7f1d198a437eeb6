//! Blob store domain objects for Nimbus

pub mod domain;
pub mod features;

pub use domain::{Blob, BlobBuilder, BlobMetadata, BlobMetadataBuilder};
pub use features::{LIST_CONTAINER, list_container, parse_container_listing};
