//! Terremark vCloud extensions for Nimbus

pub mod options;

pub use options::{
    TerremarkExtension, TerremarkInstantiateVAppTemplateOptions, TerremarkOptionsExt,
};
