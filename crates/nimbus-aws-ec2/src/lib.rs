//! AWS EC2 provider properties for Nimbus

pub mod error;
pub mod options;
pub mod properties;

pub use error::{Ec2Error, Result};
pub use options::DescribeImagesOptions;
pub use properties::{
    AmiOwnersToQuery, AwsEc2PropertiesBuilder, DEFAULT_AMI_OWNERS, DEFAULT_API_VERSION,
    DEFAULT_ENDPOINT, PROPERTY_EC2_AMI_OWNERS, PROPERTY_EC2_AMI_QUERY, ami_query,
};
