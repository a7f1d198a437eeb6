//! Request option sets
//!
//! Options are plain values with chainable mutators. Composing an option set
//! yields request fragments: query parameters, headers and payload entries.
//! Provider-specific options extend a generic set through an
//! [`OptionExtension`] type parameter, so every chained call keeps the
//! derived type.

use crate::error::{MappingError, Result};
use std::fmt::Debug;

/// Where a fragment lands in the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Query,
    Header,
    Payload,
}

/// Declared request parameter of an option set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionField {
    pub name: &'static str,
    pub param: &'static str,
    pub placement: Placement,
}

impl OptionField {
    pub const fn query(name: &'static str, param: &'static str) -> Self {
        Self {
            name,
            param,
            placement: Placement::Query,
        }
    }

    pub const fn header(name: &'static str, param: &'static str) -> Self {
        Self {
            name,
            param,
            placement: Placement::Header,
        }
    }

    pub const fn payload(name: &'static str, param: &'static str) -> Self {
        Self {
            name,
            param,
            placement: Placement::Payload,
        }
    }
}

/// Ordered request fragments produced by composing option sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFragments {
    entries: Vec<(Placement, String, String)>,
}

impl RequestFragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment, keeping any earlier one with the same parameter
    pub fn push(&mut self, placement: Placement, param: impl Into<String>, value: impl ToString) {
        self.entries.push((placement, param.into(), value.to_string()));
    }

    /// Set a fragment, replacing an earlier one with the same placement and parameter
    pub fn set(&mut self, field: OptionField, value: impl ToString) {
        let value = value.to_string();
        match self
            .entries
            .iter_mut()
            .find(|(placement, param, _)| *placement == field.placement && param == field.param)
        {
            Some(entry) => entry.2 = value,
            None => self
                .entries
                .push((field.placement, field.param.to_string(), value)),
        }
    }

    pub fn get(&self, placement: Placement, param: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, name, _)| *p == placement && name == param)
            .map(|(_, _, value)| value.as_str())
    }

    pub fn query(&self) -> Vec<(&str, &str)> {
        self.placed(Placement::Query)
    }

    pub fn headers(&self) -> Vec<(&str, &str)> {
        self.placed(Placement::Header)
    }

    pub fn payload(&self) -> Vec<(&str, &str)> {
        self.placed(Placement::Payload)
    }

    /// All fragments as `(parameter, value)` pairs in insertion order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|(_, param, value)| (param.as_str(), value.as_str()))
            .collect()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.entries
            .into_iter()
            .map(|(_, param, value)| (param, value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn placed(&self, placement: Placement) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter(|(p, _, _)| *p == placement)
            .map(|(_, param, value)| (param.as_str(), value.as_str()))
            .collect()
    }
}

/// A value type that composes into request fragments
pub trait OptionSet: Debug {
    /// Write this set's fragments into `fragments`
    fn compose(&self, fragments: &mut RequestFragments);

    fn fragments(&self) -> RequestFragments {
        let mut fragments = RequestFragments::new();
        self.compose(&mut fragments);
        tracing::debug!("Composed {} request fragment(s) from {:?}", fragments.len(), self);
        fragments
    }

    /// All fragments flattened to `(parameter, value)` pairs
    fn flatten(&self) -> Vec<(String, String)> {
        self.fragments().into_pairs()
    }
}

/// Provider-specific fields layered on a generic option set
pub trait OptionExtension: Debug + Clone + Default + PartialEq {
    fn compose(&self, fragments: &mut RequestFragments);
}

impl OptionExtension for () {
    fn compose(&self, _fragments: &mut RequestFragments) {}
}

/// Reject zero for options that must be positive
pub fn require_positive(option: &'static str, value: u32) -> Result<u32> {
    if value == 0 {
        return Err(MappingError::invalid_argument(option, "must be positive"));
    }
    Ok(value)
}

/// Reject empty or whitespace-only text
pub fn require_non_empty(option: &'static str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(MappingError::invalid_argument(option, "must not be empty"));
    }
    Ok(value)
}
