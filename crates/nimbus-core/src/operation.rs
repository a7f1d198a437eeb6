//! Declared response-mapping operations
//!
//! An [`Operation`] binds a wire format and a selection path to a domain
//! type. Field tables are validated when the operation is declared, so a
//! broken mapping never reaches a response.

use crate::context::MappingContext;
use crate::error::Result;
use crate::materialize;
use crate::object::{DomainObject, ObjectBuilder};
use crate::select::{SelectionPath, select};
use crate::wire::{WireDocument, WireFormat};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

#[derive(Debug, Clone)]
pub struct Operation<D> {
    name: &'static str,
    selection: SelectionPath,
    format: WireFormat,
    target: PhantomData<fn() -> D>,
}

impl<D: DomainObject> Operation<D> {
    /// Declare an operation, validating `D`'s field table
    pub fn new(
        name: &'static str,
        selection: impl Into<SelectionPath>,
        format: WireFormat,
    ) -> Result<Self> {
        D::field_table().validate(D::ENTITY, <D::Builder as ObjectBuilder>::ATTRIBUTES)?;

        let selection = selection.into();
        tracing::debug!(
            "Declared operation {} selecting {} as {} from {}",
            name,
            selection,
            D::ENTITY,
            format
        );

        Ok(Self {
            name,
            selection,
            format,
            target: PhantomData,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn selection(&self) -> &SelectionPath {
        &self.selection
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Parse a raw response body into a document
    pub fn read(&self, ctx: &MappingContext, body: &[u8]) -> Result<WireDocument> {
        ctx.read(body, self.format)
    }

    /// A single object, or `None` when an optional selection is absent
    pub fn one(&self, ctx: &MappingContext, body: &[u8]) -> Result<Option<D>> {
        let document = self.read(ctx, body)?;
        self.one_from(ctx, &document)
    }

    pub fn list(&self, ctx: &MappingContext, body: &[u8]) -> Result<Vec<D>> {
        let document = self.read(ctx, body)?;
        self.list_from(ctx, &document)
    }

    pub fn set(&self, ctx: &MappingContext, body: &[u8]) -> Result<HashSet<D>> {
        let document = self.read(ctx, body)?;
        self.set_from(ctx, &document)
    }

    pub fn map<K, F>(&self, ctx: &MappingContext, body: &[u8], key_fn: F) -> Result<HashMap<K, D>>
    where
        K: Eq + Hash + Display,
        F: Fn(&D) -> K,
    {
        let document = self.read(ctx, body)?;
        self.map_from(ctx, &document, key_fn)
    }

    pub fn one_from(&self, ctx: &MappingContext, document: &WireDocument) -> Result<Option<D>> {
        match self.selected(document)? {
            Some(node) if !node.is_null() => materialize::one(&node, ctx).map(Some),
            _ => Ok(None),
        }
    }

    pub fn list_from(&self, ctx: &MappingContext, document: &WireDocument) -> Result<Vec<D>> {
        match self.selected(document)? {
            Some(node) => materialize::list(&node, ctx),
            None => Ok(Vec::new()),
        }
    }

    pub fn set_from(&self, ctx: &MappingContext, document: &WireDocument) -> Result<HashSet<D>> {
        match self.selected(document)? {
            Some(node) => materialize::set(&node, ctx),
            None => Ok(HashSet::new()),
        }
    }

    pub fn map_from<K, F>(
        &self,
        ctx: &MappingContext,
        document: &WireDocument,
        key_fn: F,
    ) -> Result<HashMap<K, D>>
    where
        K: Eq + Hash + Display,
        F: Fn(&D) -> K,
    {
        match self.selected(document)? {
            Some(node) => materialize::map(&node, ctx, key_fn),
            None => Ok(HashMap::new()),
        }
    }

    fn selected<'a>(&self, document: &'a WireDocument) -> Result<Option<Cow<'a, Value>>> {
        tracing::trace!("{}: selecting {}", self.name, self.selection);
        select(document, &self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::object::FieldTable;

    crate::domain_object! {
        pub struct Zone: ZoneBuilder {
            required {
                id: String,
                name: String,
            }
            optional {
                description: String,
            }
        }
    }

    const ZONES: &[u8] = br#"{
        "listzonesresponse": {
            "count": 2,
            "zone": [
                {"id": "z1", "name": "tokyo"},
                {"id": "z2", "name": "osaka", "description": "west"}
            ]
        }
    }"#;

    #[test]
    fn test_list_through_envelope() {
        let op = Operation::<Zone>::new("listZones", "..zone", WireFormat::Json).unwrap();
        let zones = op.list(&MappingContext::default(), ZONES).unwrap();

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[1].description().map(String::as_str), Some("west"));
    }

    #[test]
    fn test_mandatory_selection_missing() {
        let op = Operation::<Zone>::new("listZones", "..network", WireFormat::Json).unwrap();
        let err = op.list(&MappingContext::default(), ZONES).unwrap_err();
        assert!(matches!(err, MappingError::Selection { .. }));
    }

    #[test]
    fn test_optional_selection_missing_is_empty() {
        let op = Operation::<Zone>::new(
            "listZones",
            SelectionPath::descendant("network").optional(),
            WireFormat::Json,
        )
        .unwrap();
        let ctx = MappingContext::default();

        assert!(op.list(&ctx, ZONES).unwrap().is_empty());
        assert!(op.set(&ctx, ZONES).unwrap().is_empty());
        assert_eq!(op.one(&ctx, ZONES).unwrap(), None);
    }

    #[test]
    fn test_map_by_name() {
        let op = Operation::<Zone>::new("listZones", "..zone", WireFormat::Json).unwrap();
        let zones = op
            .map(&MappingContext::default(), ZONES, |z| z.name().clone())
            .unwrap();
        assert_eq!(zones["osaka"].id(), "z2");
    }

    #[test]
    fn test_malformed_body() {
        let op = Operation::<Zone>::new("listZones", "..zone", WireFormat::Json).unwrap();
        let err = op.list(&MappingContext::default(), b"{").unwrap_err();
        assert!(matches!(err, MappingError::Json(_)));
    }

    #[test]
    fn test_table_validation_uses_declared_attributes() {
        let table = FieldTable::conventional().map("zonename", "label");
        assert!(table.validate(Zone::ENTITY, <ZoneBuilder as ObjectBuilder>::ATTRIBUTES).is_err());
    }
}
