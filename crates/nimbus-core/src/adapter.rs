//! Type adapters
//!
//! A type adapter converts a wire scalar into a domain primitive. Adapters
//! are looked up by exact target type in an [`AdapterRegistry`]; targets
//! without a registered adapter fall back to their structural
//! [`FromWire`] conversion (strings, integers, booleans, floats, dates,
//! URIs, collections and nested domain objects).

use crate::config::DateFormat;
use crate::context::MappingContext;
use crate::error::{MappingError, Result};
use crate::wire::XML_TEXT_KEY;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;
use url::Url;

/// Structural conversion from a wire node, used when no adapter is registered
pub trait FromWire: Sized + 'static {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self>;
}

/// A registered adapter for target type `T`
pub type AdapterFn<T> = Arc<dyn Fn(&Value) -> Result<T> + Send + Sync>;

/// Adapters keyed by target type
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the date adapter matching `date_format`
    pub fn for_date_format(date_format: DateFormat) -> Self {
        let mut registry = Self::new();
        match date_format {
            DateFormat::Iso8601 => registry.register(iso8601_date),
            DateFormat::Epoch => registry.register(epoch_seconds_date),
            DateFormat::EpochMillis => registry.register(epoch_millis_date),
        };
        registry
    }

    /// Register `adapter` for target type `T`, replacing any previous one
    pub fn register<T, F>(&mut self, adapter: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&Value) -> Result<T> + Send + Sync + 'static,
    {
        let adapter: AdapterFn<T> = Arc::new(adapter);
        self.adapters.insert(TypeId::of::<T>(), Arc::new(adapter));
        self
    }

    pub fn get<T: 'static>(&self) -> Option<&AdapterFn<T>> {
        self.adapters
            .get(&TypeId::of::<T>())
            .and_then(|adapter| (**adapter).downcast_ref::<AdapterFn<T>>())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.adapters.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.adapters.len())
            .finish()
    }
}

/// ISO-8601 dates, accepting RFC 3339 and offsets without a colon (`+0200`)
pub fn iso8601_date(node: &Value) -> Result<DateTime<Utc>> {
    let text = scalar_of(node)
        .as_str()
        .ok_or_else(|| MappingError::malformed::<DateTime<Utc>>(node))?
        .trim();

    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| MappingError::malformed::<DateTime<Utc>>(node))
}

/// Dates as seconds since the Unix epoch
pub fn epoch_seconds_date(node: &Value) -> Result<DateTime<Utc>> {
    let seconds = integer_of(node).ok_or_else(|| MappingError::malformed::<DateTime<Utc>>(node))?;
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| MappingError::malformed::<DateTime<Utc>>(node))
}

/// Dates as milliseconds since the Unix epoch
pub fn epoch_millis_date(node: &Value) -> Result<DateTime<Utc>> {
    let millis = integer_of(node).ok_or_else(|| MappingError::malformed::<DateTime<Utc>>(node))?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| MappingError::malformed::<DateTime<Utc>>(node))
}

/// Adapt an enumerated token through its `FromStr` implementation
pub fn from_token<T: FromStr + 'static>(node: &Value) -> Result<T> {
    scalar_of(node)
        .as_str()
        .and_then(|token| token.trim().parse().ok())
        .ok_or_else(|| MappingError::malformed::<T>(node))
}

fn integer_of(node: &Value) -> Option<i64> {
    match scalar_of(node) {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// The scalar carried by `node`.
///
/// XML elements with both attributes and text normalise to a mapping; their
/// text content lives under [`XML_TEXT_KEY`].
pub fn scalar_of(node: &Value) -> &Value {
    match node {
        Value::Object(map) => map.get(XML_TEXT_KEY).unwrap_or(node),
        other => other,
    }
}

/// Elements of a loosely typed collection node.
///
/// Sequences yield their elements, null yields nothing and any other node is
/// a single element.
pub fn loose_elements(node: &Value) -> Vec<Cow<'_, Value>> {
    match node {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(Cow::Borrowed).collect(),
        other => vec![Cow::Borrowed(other)],
    }
}

/// Like [`loose_elements`], but a string yields its non-empty comma-separated pieces
pub fn comma_separated_elements(node: &Value) -> Vec<Cow<'_, Value>> {
    match scalar_of(node) {
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| Cow::Owned(Value::String(piece.to_string())))
            .collect(),
        _ => loose_elements(node),
    }
}

/// A collection whose wire form may also be one comma-separated string,
/// as in CloudStack's `cidrlist`.
///
/// Plain `Vec`/`BTreeSet` attributes never split strings.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommaSeparated<C>(pub C);

impl<C> CommaSeparated<C> {
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C> Deref for CommaSeparated<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.0
    }
}

impl<C> From<C> for CommaSeparated<C> {
    fn from(inner: C) -> Self {
        Self(inner)
    }
}

impl<C: fmt::Debug> fmt::Debug for CommaSeparated<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<T: FromWire> FromWire for CommaSeparated<Vec<T>> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        comma_separated_elements(node)
            .iter()
            .map(|element| ctx.adapt::<T>(element))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl<T: FromWire + Ord> FromWire for CommaSeparated<BTreeSet<T>> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        comma_separated_elements(node)
            .iter()
            .map(|element| ctx.adapt::<T>(element))
            .collect::<Result<BTreeSet<_>>>()
            .map(Self)
    }
}

impl FromWire for String {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
        match scalar_of(node) {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(MappingError::malformed::<String>(other)),
        }
    }
}

macro_rules! integer_from_wire {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromWire for $ty {
                fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
                    let parsed = match scalar_of(node) {
                        Value::Number(number) => number
                            .as_i64()
                            .and_then(|n| <$ty>::try_from(n).ok())
                            .or_else(|| number.as_u64().and_then(|n| <$ty>::try_from(n).ok())),
                        Value::String(text) => text.trim().parse::<$ty>().ok(),
                        _ => None,
                    };
                    parsed.ok_or_else(|| MappingError::malformed::<$ty>(node))
                }
            }
        )*
    };
}

integer_from_wire!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! float_from_wire {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromWire for $ty {
                fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
                    let parsed = match scalar_of(node) {
                        Value::Number(number) => number.as_f64().map(|n| n as $ty),
                        Value::String(text) => text.trim().parse::<$ty>().ok(),
                        _ => None,
                    };
                    parsed.ok_or_else(|| MappingError::malformed::<$ty>(node))
                }
            }
        )*
    };
}

float_from_wire!(f32, f64);

impl FromWire for bool {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
        match scalar_of(node) {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(MappingError::malformed::<bool>(node)),
            },
            other => Err(MappingError::malformed::<bool>(other)),
        }
    }
}

impl FromWire for DateTime<Utc> {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
        iso8601_date(node)
    }
}

impl FromWire for Url {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
        let text = match node {
            Value::String(text) => text.as_str(),
            // XML links usually carry the URI in an `href` attribute
            Value::Object(map) => map
                .get("href")
                .or_else(|| map.get(XML_TEXT_KEY))
                .and_then(Value::as_str)
                .ok_or_else(|| MappingError::malformed::<Url>(node))?,
            other => return Err(MappingError::malformed::<Url>(other)),
        };
        Url::parse(text.trim()).map_err(|_| MappingError::malformed::<Url>(node))
    }
}

impl FromWire for Value {
    fn from_wire(node: &Value, _ctx: &MappingContext) -> Result<Self> {
        Ok(node.clone())
    }
}

impl<T: FromWire> FromWire for Option<T> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        match node {
            Value::Null => Ok(None),
            other => ctx.adapt::<T>(other).map(Some),
        }
    }
}

impl<T: FromWire> FromWire for Vec<T> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        loose_elements(node)
            .iter()
            .map(|element| ctx.adapt::<T>(element))
            .collect()
    }
}

impl<T: FromWire + Ord> FromWire for BTreeSet<T> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        loose_elements(node)
            .iter()
            .map(|element| ctx.adapt::<T>(element))
            .collect()
    }
}

impl<T: FromWire> FromWire for BTreeMap<String, T> {
    fn from_wire(node: &Value, ctx: &MappingContext) -> Result<Self> {
        match node {
            Value::Null => Ok(BTreeMap::new()),
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| ctx.adapt::<T>(value).map(|adapted| (key.clone(), adapted)))
                .collect(),
            other => Err(MappingError::malformed::<BTreeMap<String, T>>(other)),
        }
    }
}
