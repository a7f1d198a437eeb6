//! Terremark options for instantiating a vApp template
//!
//! Terremark adds an administrator password and a placement group/row on
//! top of the vCloud options. The module-level functions start a chain from
//! any single mutator:
//!
//! ```ignore
//! use nimbus_terremark::options;
//!
//! let options = options::in_group("web")
//!     .cpu_count(2)?
//!     .in_row("r1");
//! ```

use nimbus_core::{OptionExtension, OptionField, RequestFragments, Result};
use nimbus_vcloud::InstantiateVAppTemplateOptions;
use url::Url;

const PASSWORD: OptionField = OptionField::payload("password", "password");
const GROUP: OptionField = OptionField::payload("group", "group");
const ROW: OptionField = OptionField::payload("row", "row");

/// Terremark-only fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerremarkExtension {
    password: Option<String>,
    group: Option<String>,
    row: Option<String>,
}

impl OptionExtension for TerremarkExtension {
    fn compose(&self, fragments: &mut RequestFragments) {
        if let Some(password) = &self.password {
            fragments.set(PASSWORD, password);
        }
        if let Some(group) = &self.group {
            fragments.set(GROUP, group);
        }
        if let Some(row) = &self.row {
            fragments.set(ROW, row);
        }
    }
}

pub type TerremarkInstantiateVAppTemplateOptions =
    InstantiateVAppTemplateOptions<TerremarkExtension>;

/// Terremark mutators and accessors on the extended options
pub trait TerremarkOptionsExt: Sized {
    fn with_password(self, password: impl Into<String>) -> Self;
    fn in_group(self, group: impl Into<String>) -> Self;
    fn in_row(self, row: impl Into<String>) -> Self;

    fn password(&self) -> Option<&str>;
    fn group(&self) -> Option<&str>;
    fn row(&self) -> Option<&str>;
}

impl TerremarkOptionsExt for TerremarkInstantiateVAppTemplateOptions {
    fn with_password(self, password: impl Into<String>) -> Self {
        let password = password.into();
        self.map_extension(|ext| TerremarkExtension {
            password: Some(password),
            ..ext
        })
    }

    fn in_group(self, group: impl Into<String>) -> Self {
        let group = group.into();
        self.map_extension(|ext| TerremarkExtension {
            group: Some(group),
            ..ext
        })
    }

    fn in_row(self, row: impl Into<String>) -> Self {
        let row = row.into();
        self.map_extension(|ext| TerremarkExtension {
            row: Some(row),
            ..ext
        })
    }

    fn password(&self) -> Option<&str> {
        self.extension().password.as_deref()
    }

    fn group(&self) -> Option<&str> {
        self.extension().group.as_deref()
    }

    fn row(&self) -> Option<&str> {
        self.extension().row.as_deref()
    }
}

pub fn cpu_count(cpu_count: u32) -> Result<TerremarkInstantiateVAppTemplateOptions> {
    TerremarkInstantiateVAppTemplateOptions::new().cpu_count(cpu_count)
}

pub fn megabytes(megabytes: u32) -> Result<TerremarkInstantiateVAppTemplateOptions> {
    TerremarkInstantiateVAppTemplateOptions::new().megabytes(megabytes)
}

pub fn in_network(network: Url) -> TerremarkInstantiateVAppTemplateOptions {
    TerremarkInstantiateVAppTemplateOptions::new().in_network(network)
}

pub fn with_password(password: impl Into<String>) -> TerremarkInstantiateVAppTemplateOptions {
    TerremarkInstantiateVAppTemplateOptions::new().with_password(password)
}

pub fn in_group(group: impl Into<String>) -> TerremarkInstantiateVAppTemplateOptions {
    TerremarkInstantiateVAppTemplateOptions::new().in_group(group)
}

pub fn in_row(row: impl Into<String>) -> TerremarkInstantiateVAppTemplateOptions {
    TerremarkInstantiateVAppTemplateOptions::new().in_row(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::OptionSet;

    #[test]
    fn test_extension_mutators() {
        let options = with_password("s3cret").in_group("web").in_row("r1");

        assert_eq!(options.password(), Some("s3cret"));
        assert_eq!(options.group(), Some("web"));
        assert_eq!(options.row(), Some("r1"));
    }

    #[test]
    fn test_later_mutator_overwrites() {
        let options = in_group("web").in_group("db");
        assert_eq!(options.group(), Some("db"));
        assert_eq!(options.flatten(), vec![("group".to_string(), "db".to_string())]);
    }

    #[test]
    fn test_shortcuts_start_from_empty() {
        let options = megabytes(1024).unwrap();
        assert_eq!(options.get_megabytes(), Some(1024));
        assert_eq!(options.password(), None);
        assert!(cpu_count(0).is_err());
    }

    #[test]
    fn test_base_fields_precede_extension_fields() {
        let options = in_row("r1").cpu_count(4).unwrap();
        let pairs = options.flatten();
        assert_eq!(pairs[0].0, "cpuCount");
        assert_eq!(pairs[1].0, "row");
    }
}
