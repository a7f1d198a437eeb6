//! Domain object builder protocol
//!
//! Every domain entity is an immutable value produced by exactly one
//! mutable builder. The [`domain_object!`](crate::domain_object) macro
//! declares both sides at once: the value type with read accessors,
//! the builder with one fluent setter per attribute, `build()` checking the
//! required attributes, and the wire hooks the materializer drives.
//!
//! Wire keys reach builder setters through a [`FieldTable`]: explicit
//! entries map a key (or a path relative to the object's node) onto an
//! attribute, and every other key is matched by convention, comparing names
//! with case, `_` and `-` ignored (`publicipid` matches `public_ip_id`).

use crate::context::MappingContext;
use crate::error::{MappingError, Result};
use crate::select::{SelectionPath, Step};
use serde_json::Value;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// One settable attribute of a builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: &'static str,
    pub required: bool,
}

impl Attribute {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// An immutable value with exactly one associated builder
pub trait DomainObject:
    Clone + Debug + Display + PartialEq + Eq + Hash + Ord + Send + Sync + Sized + 'static
{
    type Builder: ObjectBuilder<Target = Self>;

    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// Empty builder
    fn builder() -> Self::Builder;

    /// Declared wire-key mapping for this entity
    fn field_table() -> &'static FieldTable;
}

/// Mutable accumulator producing one domain object
pub trait ObjectBuilder: Default + Sized {
    type Target;

    const ATTRIBUTES: &'static [Attribute];

    /// Set `attribute` from a wire node, adapting it to the attribute's type
    fn set_wire(&mut self, attribute: &str, node: &Value, ctx: &MappingContext) -> Result<()>;

    /// Validate required attributes and produce the value
    fn build(self) -> Result<Self::Target>;
}

/// Explicit wire-key to attribute mapping of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    entries: Vec<(SelectionPath, &'static str)>,
}

impl FieldTable {
    /// A table relying on the naming convention alone
    pub fn conventional() -> Self {
        Self::default()
    }

    /// Map a wire key, or a dotted path relative to the object's node, onto an attribute
    pub fn map(mut self, wire: &str, attribute: &'static str) -> Self {
        self.entries.push((SelectionPath::parse(wire).optional(), attribute));
        self
    }

    pub fn entries(&self) -> &[(SelectionPath, &'static str)] {
        &self.entries
    }

    /// Whether an explicit entry consumes the wire key `key`
    pub fn claims(&self, key: &str) -> bool {
        self.entries
            .iter()
            .any(|(path, _)| matches!(path.head(), Some(Step::Key(head)) if head == key))
    }

    /// Check the table against a builder's attributes at configuration time
    pub fn validate(&self, entity: &'static str, attributes: &[Attribute]) -> Result<()> {
        let mut targeted: Vec<&str> = Vec::new();

        for (path, attribute) in &self.entries {
            if path.is_root() {
                return Err(MappingError::InvalidDeclaration {
                    entity,
                    reason: format!("empty wire path for attribute '{}'", attribute),
                });
            }
            if !attributes.iter().any(|a| a.name == *attribute) {
                return Err(MappingError::InvalidDeclaration {
                    entity,
                    reason: format!("'{}' maps to unknown attribute '{}'", path, attribute),
                });
            }
            if targeted.contains(attribute) {
                return Err(MappingError::InvalidDeclaration {
                    entity,
                    reason: format!("attribute '{}' is mapped more than once", attribute),
                });
            }
            targeted.push(attribute);
        }

        Ok(())
    }
}

/// Attribute matched by naming convention
pub fn conventional_attribute<'a>(key: &str, attributes: &'a [Attribute]) -> Option<&'a Attribute> {
    let key = normalize(key);
    attributes.iter().find(|a| normalize(a.name) == key)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[doc(hidden)]
pub fn write_attr(
    f: &mut std::fmt::Formatter<'_>,
    first: &mut bool,
    name: &str,
    value: &dyn Debug,
) -> std::fmt::Result {
    if !*first {
        write!(f, ", ")?;
    }
    *first = false;
    write!(f, "{}={:?}", name, value)
}

/// Declare a domain object and its builder.
///
/// ```ignore
/// domain_object! {
///     /// A port forwarding rule
///     pub struct PortRule: PortRuleBuilder {
///         required {
///             id: i64,
///             public_port: u16,
///         }
///         optional {
///             description: String,
///         }
///         defaulted {
///             cidrs: CommaSeparated<BTreeSet<String>>,
///         }
///         wire {
///             "cidrlist" => cidrs,
///         }
///     }
/// }
/// ```
///
/// Required attributes must be set before `build()`; optional attributes
/// read back as `Option<&T>`; defaulted attributes fall back to
/// `Default::default()` when unset.
#[macro_export]
macro_rules! domain_object {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $builder:ident {
            required {
                $( $(#[$rmeta:meta])* $rfield:ident : $rty:ty ),* $(,)?
            }
            $(optional {
                $( $(#[$ometa:meta])* $ofield:ident : $oty:ty ),* $(,)?
            })?
            $(defaulted {
                $( $(#[$dmeta:meta])* $dfield:ident : $dty:ty ),* $(,)?
            })?
            $(wire {
                $( $wire:literal => $wattr:ident ),* $(,)?
            })?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name {
            $( $rfield: $rty, )*
            $($( $ofield: ::std::option::Option<$oty>, )*)?
            $($( $dfield: $dty, )*)?
        }

        impl $name {
            /// Returns an empty builder
            pub fn builder() -> $builder {
                <$builder as ::std::default::Default>::default()
            }

            /// Returns a builder pre-populated with this value's attributes
            pub fn to_builder(&self) -> $builder {
                $builder {
                    $( $rfield: ::std::option::Option::Some(::std::clone::Clone::clone(&self.$rfield)), )*
                    $($( $ofield: ::std::clone::Clone::clone(&self.$ofield), )*)?
                    $($( $dfield: ::std::option::Option::Some(::std::clone::Clone::clone(&self.$dfield)), )*)?
                }
            }

            $(
                $(#[$rmeta])*
                pub fn $rfield(&self) -> &$rty {
                    &self.$rfield
                }
            )*

            $($(
                $(#[$ometa])*
                pub fn $ofield(&self) -> ::std::option::Option<&$oty> {
                    self.$ofield.as_ref()
                }
            )*)?

            $($(
                $(#[$dmeta])*
                pub fn $dfield(&self) -> &$dty {
                    &self.$dfield
                }
            )*)?
        }

        #[doc = concat!("Builder for [`", stringify!($name), "`]")]
        #[derive(Debug, Clone, Default)]
        $vis struct $builder {
            $( $rfield: ::std::option::Option<$rty>, )*
            $($( $ofield: ::std::option::Option<$oty>, )*)?
            $($( $dfield: ::std::option::Option<$dty>, )*)?
        }

        impl $builder {
            $(
                pub fn $rfield(mut self, $rfield: $rty) -> Self {
                    self.$rfield = ::std::option::Option::Some($rfield);
                    self
                }
            )*

            $($(
                pub fn $ofield(mut self, $ofield: $oty) -> Self {
                    self.$ofield = ::std::option::Option::Some($ofield);
                    self
                }
            )*)?

            $($(
                pub fn $dfield(mut self, $dfield: $dty) -> Self {
                    self.$dfield = ::std::option::Option::Some($dfield);
                    self
                }
            )*)?

            /// Names of required attributes that are still unset
            pub fn missing(&self) -> ::std::vec::Vec<&'static str> {
                #[allow(unused_mut)]
                let mut missing = ::std::vec::Vec::new();
                $(
                    if self.$rfield.is_none() {
                        missing.push(stringify!($rfield));
                    }
                )*
                missing
            }

            pub fn build(self) -> $crate::Result<$name> {
                let missing = self.missing();
                match ( $( self.$rfield, )* ) {
                    ( $( ::std::option::Option::Some($rfield), )* ) => ::std::result::Result::Ok($name {
                        $( $rfield, )*
                        $($( $ofield: self.$ofield, )*)?
                        $($( $dfield: self.$dfield.unwrap_or_default(), )*)?
                    }),
                    _ => ::std::result::Result::Err($crate::MappingError::IncompleteObject {
                        entity: stringify!($name),
                        missing,
                    }),
                }
            }
        }

        impl $crate::ObjectBuilder for $builder {
            type Target = $name;

            const ATTRIBUTES: &'static [$crate::Attribute] = &[
                $( $crate::Attribute::required(stringify!($rfield)), )*
                $($( $crate::Attribute::optional(stringify!($ofield)), )*)?
                $($( $crate::Attribute::optional(stringify!($dfield)), )*)?
            ];

            fn set_wire(
                &mut self,
                attribute: &str,
                node: &$crate::serde_json::Value,
                ctx: &$crate::MappingContext,
            ) -> $crate::Result<()> {
                match attribute {
                    $(
                        stringify!($rfield) => {
                            self.$rfield = ::std::option::Option::Some(ctx.adapt::<$rty>(node)?);
                        }
                    )*
                    $($(
                        stringify!($ofield) => {
                            self.$ofield = ::std::option::Option::Some(ctx.adapt::<$oty>(node)?);
                        }
                    )*)?
                    $($(
                        stringify!($dfield) => {
                            self.$dfield = ::std::option::Option::Some(ctx.adapt::<$dty>(node)?);
                        }
                    )*)?
                    other => {
                        return ::std::result::Result::Err($crate::MappingError::UnknownField {
                            entity: stringify!($name),
                            field: ::std::string::ToString::to_string(other),
                        });
                    }
                }
                ::std::result::Result::Ok(())
            }

            fn build(self) -> $crate::Result<$name> {
                $builder::build(self)
            }
        }

        impl $crate::DomainObject for $name {
            type Builder = $builder;

            const ENTITY: &'static str = stringify!($name);

            fn builder() -> $builder {
                <$builder as ::std::default::Default>::default()
            }

            fn field_table() -> &'static $crate::FieldTable {
                static TABLE: ::std::sync::OnceLock<$crate::FieldTable> = ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| {
                    $crate::FieldTable::conventional()
                        $($( .map($wire, stringify!($wattr)) )*)?
                })
            }
        }

        impl $crate::FromWire for $name {
            fn from_wire(
                node: &$crate::serde_json::Value,
                ctx: &$crate::MappingContext,
            ) -> $crate::Result<Self> {
                $crate::materialize::one::<$name>(node, ctx)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}{{", stringify!($name))?;
                let mut first = true;
                $( $crate::object::write_attr(f, &mut first, stringify!($rfield), &self.$rfield)?; )*
                $($(
                    if let ::std::option::Option::Some(value) = &self.$ofield {
                        $crate::object::write_attr(f, &mut first, stringify!($ofield), value)?;
                    }
                )*)?
                $($( $crate::object::write_attr(f, &mut first, stringify!($dfield), &self.$dfield)?; )*)?
                let _ = first;
                write!(f, "}}")
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CommaSeparated;
    use crate::materialize;
    use serde_json::json;
    use std::collections::BTreeSet;

    crate::domain_object! {
        /// Three required attributes and a few extras
        pub struct Volume: VolumeBuilder {
            required {
                id: String,
                size_gb: u32,
                zone: String,
            }
            optional {
                label: String,
            }
            defaulted {
                tags: CommaSeparated<BTreeSet<String>>,
            }
            wire {
                "zonename" => zone,
                "meta.tags" => tags,
            }
        }
    }

    #[test]
    fn test_build_complete() {
        let volume = Volume::builder()
            .id("vol-1".to_string())
            .size_gb(20)
            .zone("tk1a".to_string())
            .build()
            .unwrap();

        assert_eq!(volume.id(), "vol-1");
        assert_eq!(*volume.size_gb(), 20);
        assert_eq!(volume.label(), None);
        assert!(volume.tags().is_empty());
    }

    #[test]
    fn test_build_names_missing_required_attribute() {
        let err = Volume::builder()
            .id("vol-1".to_string())
            .size_gb(20)
            .build()
            .unwrap_err();

        match err {
            MappingError::IncompleteObject { entity, missing } => {
                assert_eq!(entity, "Volume");
                assert_eq!(missing, vec!["zone"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_incomplete_message_lists_all_missing() {
        let err = Volume::builder().build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Incomplete Volume: missing required attribute(s) id, size_gb, zone"
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let volume = Volume::builder()
            .id("vol-1".to_string())
            .size_gb(20)
            .zone("tk1a".to_string())
            .label("data".to_string())
            .build()
            .unwrap();

        assert_eq!(
            volume.to_string(),
            r#"Volume{id="vol-1", size_gb=20, zone="tk1a", label="data", tags={}}"#
        );
    }

    #[test]
    fn test_to_builder_round_trip() {
        let volume = Volume::builder()
            .id("vol-1".to_string())
            .size_gb(20)
            .zone("tk1a".to_string())
            .build()
            .unwrap();

        let resized = volume.to_builder().size_gb(40).build().unwrap();
        assert_eq!(*resized.size_gb(), 40);
        assert_eq!(resized.id(), volume.id());
        assert_ne!(resized, volume);
    }

    #[test]
    fn test_field_table_from_declaration() {
        let table = Volume::field_table();
        assert_eq!(table.entries().len(), 2);
        assert!(table.claims("zonename"));
        assert!(table.claims("meta"));
        assert!(!table.claims("zone"));
        table
            .validate(Volume::ENTITY, <VolumeBuilder as ObjectBuilder>::ATTRIBUTES)
            .unwrap();
    }

    #[test]
    fn test_field_table_rejects_unknown_attribute() {
        let table = FieldTable::conventional().map("sizegb", "capacity");
        let err = table
            .validate("Volume", <VolumeBuilder as ObjectBuilder>::ATTRIBUTES)
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidDeclaration { .. }));
    }

    #[test]
    fn test_field_table_rejects_double_mapping() {
        let table = FieldTable::conventional()
            .map("zonename", "zone")
            .map("zoneid", "zone");
        assert!(
            table
                .validate("Volume", <VolumeBuilder as ObjectBuilder>::ATTRIBUTES)
                .is_err()
        );
    }

    #[test]
    fn test_conventional_attribute_matching() {
        let attributes = <VolumeBuilder as ObjectBuilder>::ATTRIBUTES;
        assert_eq!(conventional_attribute("sizegb", attributes).unwrap().name, "size_gb");
        assert_eq!(conventional_attribute("Size-GB", attributes).unwrap().name, "size_gb");
        assert!(conventional_attribute("zonename", attributes).is_none());
    }

    #[test]
    fn test_set_wire_rejects_unknown_attribute() {
        let mut builder = Volume::builder();
        let ctx = MappingContext::default();
        let err = builder.set_wire("capacity", &json!(1), &ctx).unwrap_err();
        assert!(matches!(err, MappingError::UnknownField { .. }));
    }

    #[test]
    fn test_nested_path_in_field_table() {
        let ctx = MappingContext::default();
        let node = json!({
            "id": "vol-1",
            "sizegb": "20",
            "zonename": "tk1a",
            "meta": {"tags": "ssd,backup"}
        });

        let volume: Volume = materialize::one(&node, &ctx).unwrap();
        assert_eq!(volume.zone(), "tk1a");
        assert_eq!(volume.tags().len(), 2);
        assert!(volume.tags().contains("ssd"));
    }
}
