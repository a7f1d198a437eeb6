//! CloudStack domain objects

use nimbus_core::adapter::from_token;
use nimbus_core::{CommaSeparated, FromWire, MappingContext, domain_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Load balancing algorithm of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Source,
    RoundRobin,
    LeastConn,
    /// A token this client does not know yet
    Unrecognized,
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "source" => Algorithm::Source,
            "roundrobin" => Algorithm::RoundRobin,
            "leastconn" => Algorithm::LeastConn,
            _ => Algorithm::Unrecognized,
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Source => write!(f, "source"),
            Algorithm::RoundRobin => write!(f, "roundrobin"),
            Algorithm::LeastConn => write!(f, "leastconn"),
            Algorithm::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

impl FromWire for Algorithm {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> nimbus_core::Result<Self> {
        from_token(node)
    }
}

/// Provisioning state of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    Add,
    Active,
    Unrecognized,
}

impl FromStr for State {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "add" => State::Add,
            "active" => State::Active,
            _ => State::Unrecognized,
        })
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Add => write!(f, "Add"),
            State::Active => write!(f, "Active"),
            State::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}

impl FromWire for State {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> nimbus_core::Result<Self> {
        from_token(node)
    }
}

domain_object! {
    /// A CloudStack load balancer rule
    pub struct LoadBalancerRule: LoadBalancerRuleBuilder {
        required {
            id: i64,
            name: String,
            algorithm: Algorithm,
            state: State,
            public_ip: String,
            public_port: u16,
            private_port: u16,
        }
        optional {
            account: String,
            description: String,
            domain: String,
            domain_id: i64,
            public_ip_id: i64,
            zone_id: i64,
        }
        defaulted {
            /// Source CIDRs allowed through the rule
            cidrs: CommaSeparated<BTreeSet<String>>,
        }
        wire {
            "publicip" => public_ip,
            "cidrlist" => cidrs,
        }
    }
}
