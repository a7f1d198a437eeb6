//! Materializer
//!
//! Converts a selected subtree into domain objects through their builders.
//! A single malformed element fails the whole call; no partial collection
//! is ever returned.

use crate::context::MappingContext;
use crate::error::{MappingError, Result};
use crate::object::{DomainObject, ObjectBuilder, conventional_attribute};
use crate::select::select;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;
use std::fmt::Display;
use std::hash::Hash;

/// Materialize one object from a mapping node.
///
/// A sequence holding exactly one element is accepted as that element.
pub fn one<D: DomainObject>(node: &Value, ctx: &MappingContext) -> Result<D> {
    let node = match node {
        Value::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };

    let Value::Object(fields) = node else {
        return Err(MappingError::malformed::<D>(node));
    };

    let table = D::field_table();
    let attributes = <D::Builder as ObjectBuilder>::ATTRIBUTES;
    let mut builder = D::builder();

    for (path, attribute) in table.entries() {
        if let Some(value) = select(node, path)? {
            if !value.is_null() {
                builder.set_wire(attribute, &value, ctx)?;
            }
        }
    }

    for (key, value) in fields {
        if table.claims(key) {
            continue;
        }
        match conventional_attribute(key, attributes) {
            Some(attribute) => {
                if !value.is_null() {
                    builder.set_wire(attribute.name, value, ctx)?;
                }
            }
            None if ctx.is_strict() => {
                return Err(MappingError::UnknownField {
                    entity: D::ENTITY,
                    field: key.clone(),
                });
            }
            None => {
                tracing::trace!("Ignoring unmapped key {} on {}", key, D::ENTITY);
            }
        }
    }

    builder.build()
}

/// Materialize an ordered list, preserving wire order
pub fn list<D: DomainObject>(node: &Value, ctx: &MappingContext) -> Result<Vec<D>> {
    let items = elements(node)
        .iter()
        .map(|item| one::<D>(item, ctx))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Materialized {} {} item(s)", items.len(), D::ENTITY);
    Ok(items)
}

/// Materialize an unordered set; structurally equal elements collapse
pub fn set<D: DomainObject>(node: &Value, ctx: &MappingContext) -> Result<HashSet<D>> {
    let items = elements(node)
        .iter()
        .map(|item| one::<D>(item, ctx))
        .collect::<Result<HashSet<_>>>()?;

    tracing::debug!("Materialized {} distinct {} item(s)", items.len(), D::ENTITY);
    Ok(items)
}

/// Materialize a map keyed by `key_fn`.
///
/// Two elements producing the same key fail with
/// [`MappingError::DuplicateKey`], even when the elements are equal.
pub fn map<D, K, F>(node: &Value, ctx: &MappingContext, key_fn: F) -> Result<HashMap<K, D>>
where
    D: DomainObject,
    K: Eq + Hash + Display,
    F: Fn(&D) -> K,
{
    let mut items = HashMap::new();

    for item in elements(node) {
        let object = one::<D>(item, ctx)?;
        match items.entry(key_fn(&object)) {
            Entry::Occupied(occupied) => {
                return Err(MappingError::DuplicateKey {
                    key: occupied.key().to_string(),
                });
            }
            Entry::Vacant(vacant) => {
                vacant.insert(object);
            }
        }
    }

    tracing::debug!("Materialized {} keyed {} item(s)", items.len(), D::ENTITY);
    Ok(items)
}

fn elements(node: &Value) -> &[Value] {
    match node {
        Value::Null => &[],
        Value::Array(items) => items,
        single => std::slice::from_ref(single),
    }
}
