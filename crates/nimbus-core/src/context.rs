//! Mapping context
//!
//! A [`MappingContext`] owns the configuration and adapter registry used by
//! one provider's response mapping. It is assembled once at configuration
//! time and is read-only afterwards, so it can be shared across concurrent
//! parses behind an `Arc`.

use crate::adapter::{AdapterRegistry, FromWire};
use crate::config::MappingConfig;
use crate::error::Result;
use crate::wire::{self, WireDocument, WireFormat};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct MappingContext {
    config: MappingConfig,
    registry: AdapterRegistry,
}

impl MappingContext {
    pub fn new(config: MappingConfig) -> Self {
        Self::builder(config).build()
    }

    /// Start a context whose registry can take provider-specific adapters
    pub fn builder(config: MappingConfig) -> MappingContextBuilder {
        MappingContextBuilder {
            registry: AdapterRegistry::for_date_format(config.date_format),
            config,
        }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict_fields
    }

    /// Convert a wire node to `T`, preferring a registered adapter
    pub fn adapt<T: FromWire>(&self, raw: &Value) -> Result<T> {
        match self.registry.get::<T>() {
            Some(adapter) => (**adapter)(raw),
            None => T::from_wire(raw, self),
        }
    }

    /// Parse a raw response body
    pub fn read(&self, bytes: &[u8], format: WireFormat) -> Result<WireDocument> {
        wire::parse_document(bytes, format)
    }
}

impl Default for MappingContext {
    fn default() -> Self {
        Self::new(MappingConfig::default())
    }
}

/// Configuration-time assembly of a [`MappingContext`]
#[derive(Debug)]
pub struct MappingContextBuilder {
    config: MappingConfig,
    registry: AdapterRegistry,
}

impl MappingContextBuilder {
    /// Register an adapter for `T`, replacing the default for that type
    pub fn register<T, F>(mut self, adapter: F) -> Self
    where
        T: 'static,
        F: Fn(&Value) -> Result<T> + Send + Sync + 'static,
    {
        self.registry.register(adapter);
        self
    }

    pub fn build(self) -> MappingContext {
        tracing::debug!(
            "Mapping context ready: date_format={}, strict_fields={}, adapters={}",
            self.config.date_format,
            self.config.strict_fields,
            self.registry.len()
        );
        MappingContext {
            config: self.config,
            registry: self.registry,
        }
    }
}
