//! VirtualBox machine specifications for Nimbus

pub mod domain;

pub use domain::{CleanupMode, IsoSpec, IsoSpecBuilder, VmSpec, VmSpecBuilder};
