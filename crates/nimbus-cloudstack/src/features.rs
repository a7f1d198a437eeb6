//! Load balancer rule operations

use crate::domain::LoadBalancerRule;
use crate::error::{CloudStackError, Result};
use nimbus_core::{
    MappingContext, OptionField, OptionSet, Operation, RequestFragments, WireFormat,
};
use std::collections::HashSet;

pub const LIST_LOAD_BALANCER_RULES: &str = "listLoadBalancerRules";

/// `listLoadBalancerRules`, selecting the rules under any response envelope
pub fn list_load_balancer_rules() -> Result<Operation<LoadBalancerRule>> {
    Ok(Operation::new(
        LIST_LOAD_BALANCER_RULES,
        "..loadbalancerrule",
        WireFormat::Json,
    )?)
}

/// Parse a `listLoadBalancerRules` response body into its rules
pub fn parse_load_balancer_rules(
    ctx: &MappingContext,
    body: &[u8],
) -> Result<HashSet<LoadBalancerRule>> {
    let rules = list_load_balancer_rules()?.set(ctx, body)?;
    tracing::debug!("{} returned {} rule(s)", LIST_LOAD_BALANCER_RULES, rules.len());
    Ok(rules)
}

const ID: OptionField = OptionField::query("id", "id");
const NAME: OptionField = OptionField::query("name", "name");
const PUBLIC_IP_ID: OptionField = OptionField::query("public_ip_id", "publicipid");
const VIRTUAL_MACHINE_ID: OptionField =
    OptionField::query("virtual_machine_id", "virtualmachineid");
const ZONE_ID: OptionField = OptionField::query("zone_id", "zoneid");
const ACCOUNT: OptionField = OptionField::query("account", "account");
const DOMAIN_ID: OptionField = OptionField::query("domain_id", "domainid");
const KEYWORD: OptionField = OptionField::query("keyword", "keyword");
const PAGE: OptionField = OptionField::query("page", "page");
const PAGE_SIZE: OptionField = OptionField::query("page_size", "pagesize");

/// Filters for `listLoadBalancerRules`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListLoadBalancerRulesOptions {
    id: Option<i64>,
    name: Option<String>,
    public_ip_id: Option<i64>,
    virtual_machine_id: Option<i64>,
    zone_id: Option<i64>,
    account: Option<String>,
    domain_id: Option<i64>,
    keyword: Option<String>,
    page: Option<u32>,
    page_size: Option<u32>,
}

impl ListLoadBalancerRulesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn public_ip_id(mut self, public_ip_id: i64) -> Self {
        self.public_ip_id = Some(public_ip_id);
        self
    }

    pub fn virtual_machine_id(mut self, virtual_machine_id: i64) -> Self {
        self.virtual_machine_id = Some(virtual_machine_id);
        self
    }

    pub fn zone_id(mut self, zone_id: i64) -> Self {
        self.zone_id = Some(zone_id);
        self
    }

    /// Rules of `account`; CloudStack also needs [`Self::domain_id`]
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn domain_id(mut self, domain_id: i64) -> Self {
        self.domain_id = Some(domain_id);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Page to return; CloudStack also needs [`Self::page_size`]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(CloudStackError::InvalidPageSize(page_size));
        }
        self.page_size = Some(page_size);
        Ok(self)
    }

    /// Check options that CloudStack only accepts together
    pub fn validate(&self) -> Result<()> {
        if self.account.is_some() && self.domain_id.is_none() {
            return Err(CloudStackError::MissingCompanion {
                option: ACCOUNT.name,
                requires: DOMAIN_ID.name,
            });
        }
        if self.page.is_some() && self.page_size.is_none() {
            return Err(CloudStackError::MissingCompanion {
                option: PAGE.name,
                requires: PAGE_SIZE.name,
            });
        }
        Ok(())
    }

    /// Validated request fragments
    pub fn request(&self) -> Result<RequestFragments> {
        self.validate()?;
        Ok(self.fragments())
    }
}

impl OptionSet for ListLoadBalancerRulesOptions {
    fn compose(&self, fragments: &mut RequestFragments) {
        if let Some(id) = self.id {
            fragments.set(ID, id);
        }
        if let Some(name) = &self.name {
            fragments.set(NAME, name);
        }
        if let Some(public_ip_id) = self.public_ip_id {
            fragments.set(PUBLIC_IP_ID, public_ip_id);
        }
        if let Some(virtual_machine_id) = self.virtual_machine_id {
            fragments.set(VIRTUAL_MACHINE_ID, virtual_machine_id);
        }
        if let Some(zone_id) = self.zone_id {
            fragments.set(ZONE_ID, zone_id);
        }
        if let Some(account) = &self.account {
            fragments.set(ACCOUNT, account);
        }
        if let Some(domain_id) = self.domain_id {
            fragments.set(DOMAIN_ID, domain_id);
        }
        if let Some(keyword) = &self.keyword {
            fragments.set(KEYWORD, keyword);
        }
        if let Some(page) = self.page {
            fragments.set(PAGE, page);
        }
        if let Some(page_size) = self.page_size {
            fragments.set(PAGE_SIZE, page_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_declares() {
        let op = list_load_balancer_rules().unwrap();
        assert_eq!(op.name(), "listLoadBalancerRules");
        assert_eq!(op.selection().to_string(), "..loadbalancerrule");
        assert_eq!(op.format(), WireFormat::Json);
    }

    #[test]
    fn test_options_flatten() {
        let options = ListLoadBalancerRulesOptions::new()
            .zone_id(1)
            .account("admin")
            .domain_id(1)
            .page(2)
            .page_size(50)
            .unwrap();
        assert!(options.validate().is_ok());

        assert_eq!(
            options.flatten(),
            vec![
                ("zoneid".to_string(), "1".to_string()),
                ("account".to_string(), "admin".to_string()),
                ("domainid".to_string(), "1".to_string()),
                ("page".to_string(), "2".to_string()),
                ("pagesize".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_options_emit_nothing() {
        assert!(ListLoadBalancerRulesOptions::new().flatten().is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ListLoadBalancerRulesOptions::new().page(1).page_size(0).unwrap_err();
        assert!(matches!(err, CloudStackError::InvalidPageSize(0)));
    }

    #[test]
    fn test_account_needs_domain() {
        let options = ListLoadBalancerRulesOptions::new().account("admin");
        assert_eq!(options.flatten().len(), 1);

        let err = options.request().unwrap_err();
        assert!(matches!(
            err,
            CloudStackError::MissingCompanion { option: "account", requires: "domain_id" }
        ));
        assert_eq!(
            err.to_string(),
            "Option account requires domain_id to be set"
        );
    }

    #[test]
    fn test_page_needs_page_size() {
        let options = ListLoadBalancerRulesOptions::new().page(3);
        assert!(options.request().is_err());

        let fragments = options.page_size(20).unwrap().request().unwrap();
        assert_eq!(fragments.query(), vec![("page", "3"), ("pagesize", "20")]);
    }
}
