//! Container listing

use crate::domain::BlobMetadata;
use nimbus_core::{MappingContext, Operation, Result, SelectionPath, WireFormat};

pub const LIST_CONTAINER: &str = "listContainer";

/// S3-style `ListBucketResult`; an empty container has no `Contents`
pub fn list_container() -> Result<Operation<BlobMetadata>> {
    Operation::new(
        LIST_CONTAINER,
        SelectionPath::parse("ListBucketResult.Contents").optional(),
        WireFormat::Xml,
    )
}

/// Blob metadata of a container listing, in listing order
pub fn parse_container_listing(ctx: &MappingContext, body: &[u8]) -> Result<Vec<BlobMetadata>> {
    let listing = list_container()?.list(ctx, body)?;
    tracing::debug!("{} returned {} blob(s)", LIST_CONTAINER, listing.len());
    Ok(listing)
}
