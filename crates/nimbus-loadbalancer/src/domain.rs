//! Load balancer domain objects

use nimbus_core::domain_object;
use std::collections::BTreeSet;
use url::Url;

domain_object! {
    /// A provisioned load balancer
    pub struct LoadBalancerMetadata: LoadBalancerMetadataBuilder {
        required {
            id: String,
            name: String,
        }
        optional {
            location: String,
            provider_id: String,
            uri: Url,
        }
        defaulted {
            /// Public addresses the balancer listens on
            addresses: BTreeSet<String>,
        }
    }
}

domain_object! {
    /// A compute node placed behind a load balancer
    pub struct BalancedNode: BalancedNodeBuilder {
        required {
            id: String,
        }
        optional {
            group: String,
        }
        defaulted {
            public_addresses: BTreeSet<String>,
            private_addresses: BTreeSet<String>,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::{MappingContext, materialize};
    use serde_json::json;

    #[test]
    fn test_metadata_from_node() {
        let node = json!({
            "id": "lb-1",
            "name": "web",
            "providerId": "1234",
            "addresses": ["203.0.113.5"],
            "uri": "https://lb.example.com/loadbalancers/1234"
        });
        let lb: LoadBalancerMetadata = materialize::one(&node, &MappingContext::default()).unwrap();

        assert_eq!(lb.id(), "lb-1");
        assert_eq!(lb.provider_id().map(String::as_str), Some("1234"));
        assert!(lb.addresses().contains("203.0.113.5"));
        assert_eq!(lb.location(), None);
    }

    #[test]
    fn test_node_requires_id() {
        assert!(BalancedNode::builder().group("web".to_string()).build().is_err());
    }
}
