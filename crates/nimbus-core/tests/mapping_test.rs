//! End-to-end mapping of recorded responses

use chrono::{TimeZone, Utc};
use nimbus_core::{
    CommaSeparated, DateFormat, MappingConfig, MappingContext, MappingError, Operation,
    SelectionPath, WireFormat, domain_object,
};
use std::collections::BTreeSet;
use std::path::PathBuf;

domain_object! {
    /// A block storage volume
    pub struct Volume: VolumeBuilder {
        required {
            id: i64,
            name: String,
            size_gb: u32,
            created: chrono::DateTime<chrono::Utc>,
        }
        optional {
            zone_id: i64,
        }
        defaulted {
            tags: CommaSeparated<BTreeSet<String>>,
        }
    }
}

domain_object! {
    /// A listener of a load balancer
    pub struct Listener: ListenerBuilder {
        required {
            protocol: String,
        }
        defaulted {
            ports: BTreeSet<u16>,
        }
        wire {
            "binding.ports" => ports,
        }
    }
}

domain_object! {
    /// A load balancer holding its listeners
    pub struct LoadBalancer: LoadBalancerBuilder {
        required {
            name: String,
        }
        defaulted {
            listeners: Vec<Listener>,
        }
        wire {
            "config.listeners" => listeners,
        }
    }
}

fn fixture(name: &str) -> Vec<u8> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read(path).unwrap()
}

#[test]
fn test_json_list_through_descendant_selection() {
    let op = Operation::<Volume>::new("listVolumes", "..volume", WireFormat::Json).unwrap();
    let volumes = op
        .list(&MappingContext::default(), &fixture("list_volumes.json"))
        .unwrap();

    assert_eq!(volumes.len(), 3);
    assert_eq!(volumes[0].name(), "root-1");
    assert_eq!(
        *volumes[0].created(),
        Utc.with_ymd_and_hms(2011, 3, 15, 6, 30, 0).unwrap()
    );
    assert_eq!(volumes[0].tags().len(), 2);
    assert_eq!(*volumes[1].size_gb(), 100);
    assert!(volumes[1].tags().is_empty());
    assert!(volumes[2].tags().contains("backup"));
    assert_eq!(volumes[2].zone_id(), None);
}

#[test]
fn test_json_and_xml_agree() {
    let ctx = MappingContext::default();
    let json = Operation::<Volume>::new(
        "listVolumes",
        "listvolumesresponse.volume",
        WireFormat::Json,
    )
    .unwrap();
    let xml = Operation::<Volume>::new(
        "listVolumes",
        "ListVolumesResponse.volumeSet.item",
        WireFormat::Xml,
    )
    .unwrap();

    let from_json = json.list(&ctx, &fixture("list_volumes.json")).unwrap();
    let from_xml = xml.list(&ctx, &fixture("list_volumes.xml")).unwrap();

    assert_eq!(from_xml.len(), 2);
    assert_eq!(from_xml[..], from_json[..2]);
}

#[test]
fn test_strict_context_rejects_unmapped_key() {
    let config = MappingConfig::new().with_strict_fields(true);
    let ctx = MappingContext::new(config);
    let op = Operation::<Volume>::new("listVolumes", "..volume", WireFormat::Json).unwrap();

    let err = op.list(&ctx, &fixture("list_volumes.json")).unwrap_err();
    assert!(matches!(err, MappingError::UnknownField { ref field, .. } if field == "state"));
}

#[test]
fn test_context_from_yaml_file() {
    let config = MappingConfig::from_yaml_file(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mapping.yaml"),
    )
    .unwrap();
    assert_eq!(config.date_format, DateFormat::EpochMillis);

    let ctx = MappingContext::new(config);
    let op = Operation::<Volume>::new("describeVolume", "volume", WireFormat::Json).unwrap();
    let volume = op
        .one(
            &ctx,
            br#"{"volume": {"id": 1, "name": "v", "sizegb": 1, "created": 1300177800000}}"#,
        )
        .unwrap()
        .unwrap();

    assert_eq!(
        *volume.created(),
        Utc.with_ymd_and_hms(2011, 3, 15, 8, 30, 0).unwrap()
    );
}

#[test]
fn test_set_and_map_from_same_document() {
    let ctx = MappingContext::default();
    let op = Operation::<Volume>::new("listVolumes", "..volume", WireFormat::Json).unwrap();
    let body = fixture("list_volumes.json");

    let set = op.set(&ctx, &body).unwrap();
    assert_eq!(set.len(), 3);

    let by_name = op.map(&ctx, &body, |v| v.name().clone()).unwrap();
    assert_eq!(*by_name["data-2"].id(), 13);

    let err = op.map(&ctx, &body, |v| *v.size_gb()).unwrap_err();
    assert!(matches!(err, MappingError::DuplicateKey { ref key } if key == "100"));
}

#[test]
fn test_optional_absent_payload_is_empty() {
    let op = Operation::<Volume>::new(
        "listVolumes",
        SelectionPath::parse("listvolumesresponse.volume").optional(),
        WireFormat::Json,
    )
    .unwrap();

    let volumes = op
        .list(&MappingContext::default(), br#"{"listvolumesresponse": {}}"#)
        .unwrap();
    assert!(volumes.is_empty());
}

#[test]
fn test_nested_collections_resolve_within_their_element() {
    // `binding.ports` also exists on the balancer and at the document root
    let body = br#"{
        "binding": {"ports": [1]},
        "balancer": {
            "name": "web",
            "binding": {"ports": [2]},
            "config": {
                "listeners": [
                    {"protocol": "http", "binding": {"ports": [80, "8080"]}},
                    {"protocol": "https", "binding": {"ports": 443}},
                    {"protocol": "udp"}
                ]
            }
        }
    }"#;
    let op = Operation::<LoadBalancer>::new("describeBalancer", "balancer", WireFormat::Json)
        .unwrap();
    let lb = op.one(&MappingContext::default(), body).unwrap().unwrap();

    assert_eq!(lb.name(), "web");
    let listeners = lb.listeners();
    assert_eq!(listeners.len(), 3);
    assert_eq!(listeners[0].protocol(), "http");
    assert_eq!(*listeners[0].ports(), BTreeSet::from([80, 8080]));
    assert_eq!(*listeners[1].ports(), BTreeSet::from([443]));
    assert!(listeners[2].ports().is_empty());
}

#[test]
fn test_nested_element_failure_fails_parent() {
    let body = br#"{"balancer": {"name": "web", "config": {"listeners": [
        {"protocol": "http", "binding": {"ports": [80]}},
        {"binding": {"ports": [81]}}
    ]}}}"#;
    let op = Operation::<LoadBalancer>::new("describeBalancer", "balancer", WireFormat::Json)
        .unwrap();

    let err = op.one(&MappingContext::default(), body).unwrap_err();
    assert!(matches!(err, MappingError::IncompleteObject { entity: "Listener", .. }));
}

#[test]
fn test_only_comma_separated_attributes_split_strings() {
    let ctx = MappingContext::default();
    let body = br#"{"volume": {"id": 1, "name": "v", "sizegb": 1,
        "created": "2011-03-16T10:00:00Z", "tags": "ssd, boot"}}"#;
    let op = Operation::<Volume>::new("describeVolume", "volume", WireFormat::Json).unwrap();
    let volume = op.one(&ctx, body).unwrap().unwrap();
    assert_eq!(volume.tags().len(), 2);

    let body = br#"{"balancer": {"name": "web", "config": {"listeners": [
        {"protocol": "http", "binding": {"ports": "80,443"}}
    ]}}}"#;
    let op = Operation::<LoadBalancer>::new("describeBalancer", "balancer", WireFormat::Json)
        .unwrap();
    let err = op.one(&ctx, body).unwrap_err();
    assert!(matches!(err, MappingError::MalformedValue { ref raw, .. } if raw.contains("80,443")));
}

#[test]
fn test_xml_scalar_with_attributes() {
    let body = br#"<DescribeVolumeResponse><volume>
        <id>1</id>
        <name lang="en">scratch</name>
        <sizeGb unit="GiB">20</sizeGb>
        <created>2011-03-16T10:00:00Z</created>
    </volume></DescribeVolumeResponse>"#;
    let op = Operation::<Volume>::new("describeVolume", "..volume", WireFormat::Xml).unwrap();
    let volume = op.one(&MappingContext::default(), body).unwrap().unwrap();

    assert_eq!(volume.name(), "scratch");
    assert_eq!(*volume.size_gb(), 20);
}
