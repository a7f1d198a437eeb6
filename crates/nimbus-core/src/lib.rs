//! Nimbus Core
//!
//! Shared response mapping and request option machinery for the Nimbus
//! cloud provider crates.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │        raw response body (JSON or XML)           │
//! └─────────────────┬────────────────────────────────┘
//!                   │ wire::parse_document
//! ┌─────────────────▼────────────────────────────────┐
//! │   WireDocument ──select──▶ payload subtree        │
//! └─────────────────┬────────────────────────────────┘
//!                   │ materialize (one / list / set / map)
//! ┌─────────────────▼────────────────────────────────┐
//! │  FieldTable ─▶ ObjectBuilder ─▶ DomainObject      │
//! │         values adapted via MappingContext         │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Outgoing requests run the other way: an [`OptionSet`] composes into
//! [`RequestFragments`], and a [`PropertiesBuilder`] derives a provider's
//! effective [`Properties`].

pub mod adapter;
pub mod config;
pub mod context;
pub mod error;
pub mod materialize;
pub mod object;
pub mod operation;
pub mod options;
pub mod properties;
pub mod select;
pub mod wire;

// Re-exports
pub use adapter::{AdapterRegistry, CommaSeparated, FromWire};
pub use config::{DateFormat, MappingConfig};
pub use context::{MappingContext, MappingContextBuilder};
pub use error::{MappingError, Result};
pub use object::{Attribute, DomainObject, FieldTable, ObjectBuilder};
pub use operation::Operation;
pub use options::{
    OptionExtension, OptionField, OptionSet, Placement, RequestFragments, require_non_empty,
    require_positive,
};
pub use properties::{
    PROPERTY_API_VERSION, PROPERTY_ENDPOINT, Properties, PropertiesBuilder, PropertiesTransform,
};
pub use select::{SelectionPath, Step, select};
pub use wire::{WireDocument, WireFormat, parse_document};

#[doc(hidden)]
pub use serde_json;
