//! AWS EC2 provider properties
//!
//! Callers name the AMI owners they trust as a comma-separated list under
//! [`PROPERTY_EC2_AMI_OWNERS`]. EC2 itself understands an image query, so
//! the builder rewrites the owners into [`PROPERTY_EC2_AMI_QUERY`] and drops
//! the owners key:
//!
//! | owners            | query                                                  |
//! |-------------------|--------------------------------------------------------|
//! | `111,222`         | `owner-id=111,222;state=available;image-type=machine`  |
//! | `*`               | `state=available;image-type=machine`                   |
//! | empty             | empty                                                  |

use nimbus_core::{
    PROPERTY_API_VERSION, PROPERTY_ENDPOINT, Properties, PropertiesBuilder, PropertiesTransform,
};

pub const PROPERTY_EC2_AMI_OWNERS: &str = "nimbus.ec2.ami-owners";
pub const PROPERTY_EC2_AMI_QUERY: &str = "nimbus.ec2.ami-query";

pub const DEFAULT_ENDPOINT: &str = "https://ec2.us-east-1.amazonaws.com";
pub const DEFAULT_API_VERSION: &str = "2011-05-15";

/// Amazon, Canonical, RightScale and Alestic image owners
pub const DEFAULT_AMI_OWNERS: &str = "137112412989,063491364108,099720109477,411009282317";

const AVAILABLE_MACHINE_IMAGES: &str = "state=available;image-type=machine";
const WILDCARD: &str = "*";

/// Image query for an owners property value
pub fn ami_query(owners: &str) -> String {
    let owners = owners.trim();
    if owners.is_empty() {
        String::new()
    } else if owners == WILDCARD {
        AVAILABLE_MACHINE_IMAGES.to_string()
    } else {
        format!("owner-id={};{}", owners, AVAILABLE_MACHINE_IMAGES)
    }
}

/// Rewrites [`PROPERTY_EC2_AMI_OWNERS`] into [`PROPERTY_EC2_AMI_QUERY`].
///
/// A property set without the owners key is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmiOwnersToQuery;

impl PropertiesTransform for AmiOwnersToQuery {
    fn apply(&self, properties: &mut Properties) {
        if let Some(owners) = properties.remove(PROPERTY_EC2_AMI_OWNERS) {
            let query = ami_query(&owners);
            tracing::debug!("Rewrote AMI owners '{}' to query '{}'", owners, query);
            properties.set(PROPERTY_EC2_AMI_QUERY, query);
        }
    }
}

/// Effective EC2 properties from caller input
#[derive(Debug, Clone, Default)]
pub struct AwsEc2PropertiesBuilder {
    input: Properties,
}

impl AwsEc2PropertiesBuilder {
    pub fn new(input: Properties) -> Self {
        Self { input }
    }

    pub fn defaults() -> Properties {
        Properties::new()
            .with(PROPERTY_ENDPOINT, DEFAULT_ENDPOINT)
            .with(PROPERTY_API_VERSION, DEFAULT_API_VERSION)
            .with(PROPERTY_EC2_AMI_OWNERS, DEFAULT_AMI_OWNERS)
    }

    pub fn build(&self) -> Properties {
        let mut defaults = Self::defaults();

        // An explicit query wins over the default owners.
        if self.input.contains(PROPERTY_EC2_AMI_QUERY) && !self.input.contains(PROPERTY_EC2_AMI_OWNERS)
        {
            defaults.remove(PROPERTY_EC2_AMI_OWNERS);
        }

        PropertiesBuilder::new(defaults)
            .transform(AmiOwnersToQuery)
            .build(&self.input)
    }
}
