//! vCloud request options for Nimbus
//!
//! The base [`InstantiateVAppTemplateOptions`] is generic over an
//! [`OptionExtension`](nimbus_core::OptionExtension). Providers built on
//! vCloud plug their own fields in through the extension, and every base
//! mutator keeps returning the extended type.

pub mod options;

pub use options::{FenceMode, InstantiateVAppTemplateOptions};
