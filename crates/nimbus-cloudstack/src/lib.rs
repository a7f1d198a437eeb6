//! CloudStack declarations for Nimbus
//!
//! Domain objects, response operations and request options of the
//! CloudStack API, declared against `nimbus-core`.
//!
//! # Example
//!
//! ```ignore
//! use nimbus_cloudstack::parse_load_balancer_rules;
//! use nimbus_core::MappingContext;
//!
//! let ctx = MappingContext::default();
//! let rules = parse_load_balancer_rules(&ctx, &body)?;
//! ```

pub mod domain;
pub mod error;
pub mod features;

pub use domain::{Algorithm, LoadBalancerRule, LoadBalancerRuleBuilder, State};
pub use error::{CloudStackError, Result};
pub use features::{
    LIST_LOAD_BALANCER_RULES, ListLoadBalancerRulesOptions, list_load_balancer_rules,
    parse_load_balancer_rules,
};
