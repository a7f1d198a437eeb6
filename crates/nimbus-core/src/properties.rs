//! Provider property sets
//!
//! Providers start from a table of defaults, layer caller overrides on top,
//! then run ordered transforms that derive or rewrite keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PROPERTY_ENDPOINT: &str = "nimbus.endpoint";
pub const PROPERTY_API_VERSION: &str = "nimbus.api-version";

/// Flat string key/value configuration of one provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Copy every entry of `other` over this set
    pub fn merge(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Rewrites a property set after defaults and overrides are merged
pub trait PropertiesTransform: Send + Sync {
    fn apply(&self, properties: &mut Properties);
}

impl<F> PropertiesTransform for F
where
    F: Fn(&mut Properties) + Send + Sync,
{
    fn apply(&self, properties: &mut Properties) {
        self(properties)
    }
}

/// Defaults plus ordered transforms
#[derive(Default)]
pub struct PropertiesBuilder {
    defaults: Properties,
    transforms: Vec<Box<dyn PropertiesTransform>>,
}

impl PropertiesBuilder {
    pub fn new(defaults: Properties) -> Self {
        Self {
            defaults,
            transforms: Vec::new(),
        }
    }

    pub fn transform(mut self, transform: impl PropertiesTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn defaults(&self) -> &Properties {
        &self.defaults
    }

    /// Merge `overrides` over the defaults, then apply each transform in order
    pub fn build(&self, overrides: &Properties) -> Properties {
        let mut properties = self.defaults.clone();
        properties.merge(overrides);

        for transform in &self.transforms {
            transform.apply(&mut properties);
        }

        tracing::debug!(
            "Built {} properties ({} override(s), {} transform(s))",
            properties.len(),
            overrides.len(),
            self.transforms.len()
        );
        properties
    }
}

impl std::fmt::Debug for PropertiesBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertiesBuilder")
            .field("defaults", &self.defaults)
            .field("transforms", &self.transforms.len())
            .finish()
    }
}
