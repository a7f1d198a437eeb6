//! Specifications for creating VirtualBox machines

use nimbus_core::adapter::from_token;
use nimbus_core::{FromWire, MappingContext, MappingError, domain_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use url::Url;

domain_object! {
    /// What is needed to create a machine from an `.iso` image
    pub struct IsoSpec: IsoSpecBuilder {
        required {
            source_path: String,
            /// Keystrokes typed at the installer boot prompt
            installation_key_sequence: String,
            /// Where the installer fetches its preseed/kickstart file
            pre_configuration_uri: Url,
        }
    }
}

/// What to remove when a machine is unregistered
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CleanupMode {
    UnregisterOnly,
    DetachAllReturnNone,
    DetachAllReturnHardDisksOnly,
    #[default]
    Full,
}

impl FromStr for CleanupMode {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "").as_str() {
            "unregisteronly" => Ok(CleanupMode::UnregisterOnly),
            "detachallreturnnone" => Ok(CleanupMode::DetachAllReturnNone),
            "detachallreturnharddisksonly" => Ok(CleanupMode::DetachAllReturnHardDisksOnly),
            "full" => Ok(CleanupMode::Full),
            _ => Err(MappingError::malformed::<CleanupMode>(&Value::String(
                s.to_string(),
            ))),
        }
    }
}

impl fmt::Display for CleanupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupMode::UnregisterOnly => write!(f, "UnregisterOnly"),
            CleanupMode::DetachAllReturnNone => write!(f, "DetachAllReturnNone"),
            CleanupMode::DetachAllReturnHardDisksOnly => write!(f, "DetachAllReturnHardDisksOnly"),
            CleanupMode::Full => write!(f, "Full"),
        }
    }
}

impl FromWire for CleanupMode {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> nimbus_core::Result<Self> {
        from_token(node)
    }
}

domain_object! {
    /// A virtual machine to register
    pub struct VmSpec: VmSpecBuilder {
        required {
            vm_id: String,
            vm_name: String,
            os_type_id: String,
        }
        optional {
            memory_mb: u64,
            iso: IsoSpec,
        }
        defaulted {
            force_overwrite: bool,
            cleanup_mode: CleanupMode,
        }
    }
}
