//! Blob store domain objects

use chrono::{DateTime, Utc};
use nimbus_core::domain_object;
use std::collections::BTreeMap;
use url::Url;

domain_object! {
    /// System and user metadata of a stored blob
    pub struct BlobMetadata: BlobMetadataBuilder {
        required {
            /// Key of the blob within its container
            name: String,
        }
        optional {
            container: String,
            content_type: String,
            etag: String,
            size: u64,
            last_modified: DateTime<Utc>,
            storage_class: String,
            uri: Url,
        }
        defaulted {
            user_metadata: BTreeMap<String, String>,
        }
        wire {
            "Key" => name,
        }
    }
}

domain_object! {
    /// A blob: metadata plus every response header it was served with.
    ///
    /// Blobs order by metadata, that is by name first.
    pub struct Blob: BlobBuilder {
        required {
            metadata: BlobMetadata,
        }
        defaulted {
            all_headers: BTreeMap<String, Vec<String>>,
        }
    }
}

impl Blob {
    pub fn name(&self) -> &str {
        self.metadata().name()
    }

    /// Values of a response header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.all_headers()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }
}
