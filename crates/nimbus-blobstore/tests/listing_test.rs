//! Container listing from a recorded S3 response

use chrono::{TimeZone, Utc};
use nimbus_blobstore::{Blob, parse_container_listing};
use nimbus_core::MappingContext;

const LISTING: &[u8] = include_bytes!("fixtures/list_bucket.xml");

#[test]
fn test_listing_preserves_order() {
    let listing = parse_container_listing(&MappingContext::default(), LISTING).unwrap();

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].name(), "3366");
    assert_eq!(listing[0].size(), Some(&136));
    assert_eq!(
        listing[0].etag().map(String::as_str),
        Some("\"9d7bb64e8e18ee34eec06dd2cf37b766\"")
    );
    assert_eq!(
        listing[0].last_modified(),
        Some(&Utc.with_ymd_and_hms(2009, 3, 12, 2, 0, 13).unwrap())
    );
    assert_eq!(listing[1].storage_class().map(String::as_str), Some("STANDARD"));
}

#[test]
fn test_empty_container() {
    let body = br#"<ListBucketResult><Name>empty</Name><IsTruncated>false</IsTruncated></ListBucketResult>"#;
    let listing = parse_container_listing(&MappingContext::default(), body).unwrap();
    assert!(listing.is_empty());
}

#[test]
fn test_single_entry_listing() {
    let body = br#"<ListBucketResult><Contents><Key>only</Key><Size>1</Size></Contents></ListBucketResult>"#;
    let listing = parse_container_listing(&MappingContext::default(), body).unwrap();
    assert_eq!(listing.len(), 1);

    let blob = Blob::builder().metadata(listing[0].clone()).build().unwrap();
    assert_eq!(blob.name(), "only");
    assert!(blob.all_headers().is_empty());
}
