//! `DescribeImages` request options

use crate::error::{Ec2Error, Result};
use nimbus_core::{OptionSet, Placement, RequestFragments};

/// Filters for `DescribeImages`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribeImagesOptions {
    image_ids: Vec<String>,
    filters: Vec<(String, Vec<String>)>,
}

impl DescribeImagesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options equivalent to an AMI query property value.
    ///
    /// Clauses are `;`-separated `name=v1,v2` pairs; an empty query has no filters.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut options = Self::new();
        for clause in query.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let (name, values) = clause
                .split_once('=')
                .ok_or_else(|| Ec2Error::MalformedQuery(clause.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(Ec2Error::MalformedQuery(clause.to_string()));
            }
            options = options.filter(name, values.split(',').map(str::trim));
        }
        Ok(options)
    }

    pub fn image_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn owners<I, S>(self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter("owner-id", owners)
    }

    pub fn filter<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.is_empty())
            .collect();
        if !values.is_empty() {
            self.filters.push((name.into(), values));
        }
        self
    }

    pub fn filters(&self) -> &[(String, Vec<String>)] {
        &self.filters
    }
}

impl OptionSet for DescribeImagesOptions {
    fn compose(&self, fragments: &mut RequestFragments) {
        for (i, id) in self.image_ids.iter().enumerate() {
            fragments.push(Placement::Query, format!("ImageId.{}", i + 1), id);
        }
        for (i, (name, values)) in self.filters.iter().enumerate() {
            fragments.push(Placement::Query, format!("Filter.{}.Name", i + 1), name);
            for (j, value) in values.iter().enumerate() {
                fragments.push(
                    Placement::Query,
                    format!("Filter.{}.Value.{}", i + 1, j + 1),
                    value,
                );
            }
        }
    }
}
