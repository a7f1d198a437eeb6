//! Options for instantiating a vApp template

use nimbus_core::{
    OptionExtension, OptionField, OptionSet, RequestFragments, Result, require_positive,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

const CPU_COUNT: OptionField = OptionField::payload("cpu_count", "cpuCount");
const MEGABYTES: OptionField = OptionField::payload("megabytes", "memorySizeMegabytes");
const DISK_SIZE: OptionField = OptionField::payload("disk_size_kilobytes", "diskSizeKilobytes");
const NETWORK: OptionField = OptionField::payload("network", "network");
const FENCE_MODE: OptionField = OptionField::payload("fence_mode", "fenceMode");

/// How an instantiated vApp connects to its network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FenceMode {
    Bridged,
    Isolated,
    NatRouted,
}

impl fmt::Display for FenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenceMode::Bridged => write!(f, "bridged"),
            FenceMode::Isolated => write!(f, "isolated"),
            FenceMode::NatRouted => write!(f, "natRouted"),
        }
    }
}

/// Options for instantiating a vApp template.
///
/// `E` carries provider-specific fields; `()` means plain vCloud.
///
/// ```ignore
/// let options = InstantiateVAppTemplateOptions::new()
///     .cpu_count(2)?
///     .megabytes(512)?
///     .in_network(network);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstantiateVAppTemplateOptions<E: OptionExtension = ()> {
    cpu_count: Option<u32>,
    megabytes: Option<u32>,
    disk_size_kilobytes: Option<u64>,
    network: Option<Url>,
    fence_mode: Option<FenceMode>,
    extension: E,
}

impl<E: OptionExtension> InstantiateVAppTemplateOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of virtual CPUs; zero is rejected
    pub fn cpu_count(mut self, cpu_count: u32) -> Result<Self> {
        self.cpu_count = Some(require_positive("cpuCount", cpu_count)?);
        Ok(self)
    }

    /// Memory size in megabytes; zero is rejected
    pub fn megabytes(mut self, megabytes: u32) -> Result<Self> {
        self.megabytes = Some(require_positive("megabytes", megabytes)?);
        Ok(self)
    }

    pub fn disk_size_kilobytes(mut self, kilobytes: u64) -> Result<Self> {
        if kilobytes == 0 {
            return Err(nimbus_core::MappingError::invalid_argument(
                "diskSizeKilobytes",
                "must be positive",
            ));
        }
        self.disk_size_kilobytes = Some(kilobytes);
        Ok(self)
    }

    pub fn in_network(mut self, network: Url) -> Self {
        self.network = Some(network);
        self
    }

    pub fn fence_mode(mut self, fence_mode: FenceMode) -> Self {
        self.fence_mode = Some(fence_mode);
        self
    }

    /// Rewrite the provider extension, keeping the base fields
    pub fn map_extension(mut self, f: impl FnOnce(E) -> E) -> Self {
        self.extension = f(self.extension);
        self
    }

    pub fn extension(&self) -> &E {
        &self.extension
    }

    pub fn get_cpu_count(&self) -> Option<u32> {
        self.cpu_count
    }

    pub fn get_megabytes(&self) -> Option<u32> {
        self.megabytes
    }

    pub fn get_disk_size_kilobytes(&self) -> Option<u64> {
        self.disk_size_kilobytes
    }

    pub fn get_network(&self) -> Option<&Url> {
        self.network.as_ref()
    }

    pub fn get_fence_mode(&self) -> Option<FenceMode> {
        self.fence_mode
    }
}

impl<E: OptionExtension> OptionSet for InstantiateVAppTemplateOptions<E> {
    fn compose(&self, fragments: &mut RequestFragments) {
        if let Some(cpu_count) = self.cpu_count {
            fragments.set(CPU_COUNT, cpu_count);
        }
        if let Some(megabytes) = self.megabytes {
            fragments.set(MEGABYTES, megabytes);
        }
        if let Some(kilobytes) = self.disk_size_kilobytes {
            fragments.set(DISK_SIZE, kilobytes);
        }
        if let Some(network) = &self.network {
            fragments.set(NETWORK, network);
        }
        if let Some(fence_mode) = self.fence_mode {
            fragments.set(FENCE_MODE, fence_mode);
        }
        self.extension.compose(fragments);
    }
}
