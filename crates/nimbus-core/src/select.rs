//! Selector engine
//!
//! A [`SelectionPath`] names the part of a [`WireDocument`] that holds the
//! payload of interest. Paths are written dot-separated; a segment prefixed
//! with `..` searches at any depth, which steps past envelope wrappers whose
//! nesting differs between providers:
//!
//! ```text
//! loadbalancerrule                              direct key
//! listloadbalancerrulesresponse.loadbalancerrule
//! ..loadbalancerrule                            first match at any depth
//! reservationSet.item.instancesSet.item         distributed over sequences
//! ```

use crate::error::{MappingError, Result};
use crate::wire::WireDocument;
use serde_json::Value;
use std::borrow::Cow;

/// One step of a selection path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Look up a key in the current mapping
    Key(String),
    /// Find the first mapping holding this key at any depth, in document order
    Descendant(String),
}

impl Step {
    pub fn key(&self) -> &str {
        match self {
            Step::Key(key) | Step::Descendant(key) => key,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Key(key) => write!(f, "{}", key),
            Step::Descendant(key) => write!(f, "..{}", key),
        }
    }
}

/// Declared key path identifying the payload subtree within a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionPath {
    steps: Vec<Step>,
    optional: bool,
}

impl SelectionPath {
    /// The empty path, selecting the whole document
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Key(key.into())],
            optional: false,
        }
    }

    pub fn descendant(key: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Descendant(key.into())],
            optional: false,
        }
    }

    /// Parse a dot-separated path expression
    pub fn parse(expr: &str) -> Self {
        let mut steps = Vec::new();
        let mut rest = expr.trim();

        while !rest.is_empty() {
            let descendant = rest.starts_with("..");
            rest = rest.trim_start_matches('.');
            let end = rest.find('.').unwrap_or(rest.len());
            let key = &rest[..end];
            if !key.is_empty() {
                let key = key.to_string();
                steps.push(if descendant {
                    Step::Descendant(key)
                } else {
                    Step::Key(key)
                });
            }
            rest = &rest[end..];
        }

        Self {
            steps,
            optional: false,
        }
    }

    pub fn then(mut self, key: impl Into<String>) -> Self {
        self.steps.push(Step::Key(key.into()));
        self
    }

    pub fn then_descendant(mut self, key: impl Into<String>) -> Self {
        self.steps.push(Step::Descendant(key.into()));
        self
    }

    /// Mark the path optional: a missing segment yields "absent" instead of an error
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Key of the first step, if any
    pub fn head(&self) -> Option<&Step> {
        self.steps.first()
    }
}

impl From<&str> for SelectionPath {
    fn from(expr: &str) -> Self {
        Self::parse(expr)
    }
}

impl std::fmt::Display for SelectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 && matches!(step, Step::Key(_)) {
                write!(f, ".")?;
            }
            write!(f, "{}", step)?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Resolve `path` against `document`.
///
/// Returns `Ok(None)` when an optional path is absent. A mandatory path that
/// cannot be resolved fails with [`MappingError::Selection`] naming the step.
pub fn select<'a>(
    document: &'a WireDocument,
    path: &SelectionPath,
) -> Result<Option<Cow<'a, Value>>> {
    let mut current: Cow<'a, Value> = Cow::Borrowed(document);

    for step in path.steps() {
        let next = match &current {
            Cow::Borrowed(node) => resolve_step(*node, step),
            Cow::Owned(node) => resolve_step(node, step).map(|n| Cow::Owned(n.into_owned())),
        };

        current = match next {
            Some(node) => node,
            None if path.is_optional() => {
                tracing::trace!("Optional path {} absent at {}", path, step);
                return Ok(None);
            }
            None => {
                return Err(MappingError::Selection {
                    path: path.to_string(),
                    segment: step.to_string(),
                });
            }
        };
    }

    tracing::trace!("Selected {}", path);
    Ok(Some(current))
}

fn resolve_step<'a>(node: &'a Value, step: &Step) -> Option<Cow<'a, Value>> {
    match (node, step) {
        (Value::Array(items), _) => {
            // Distribute the step over every element; nested sequences are
            // flattened one level so envelopes of lists read as one list.
            let mut selected = Vec::new();
            for item in items {
                match resolve_step(item, step).map(Cow::into_owned) {
                    Some(Value::Array(inner)) => selected.extend(inner),
                    Some(value) => selected.push(value),
                    None => {}
                }
            }
            if selected.is_empty() && !items.is_empty() {
                None
            } else {
                Some(Cow::Owned(Value::Array(selected)))
            }
        }
        (_, Step::Descendant(key)) => find_descendant(node, key).map(Cow::Borrowed),
        (Value::Object(map), Step::Key(key)) => map.get(key).map(Cow::Borrowed),
        _ => None,
    }
}

fn find_descendant<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|child| find_descendant(child, key))),
        Value::Array(items) => items.iter().find_map(|item| find_descendant(item, key)),
        _ => None,
    }
}
