//! Portable load balancer service

use crate::domain::{BalancedNode, LoadBalancerMetadata};
use crate::error::Result;
use async_trait::async_trait;

/// Load balancing across compute nodes, implemented once per provider
#[async_trait]
pub trait LoadBalancerService: Send + Sync {
    /// Balance `protocol` traffic on `load_balancer_port` across `nodes`
    async fn create_load_balancer_in_location(
        &self,
        location: Option<&str>,
        name: &str,
        protocol: &str,
        load_balancer_port: u16,
        instance_port: u16,
        nodes: &[BalancedNode],
    ) -> Result<LoadBalancerMetadata>;

    /// Destroy a load balancer; destroying an unknown id is not an error
    async fn destroy_load_balancer(&self, id: &str) -> Result<()>;

    async fn list_load_balancers(&self) -> Result<Vec<LoadBalancerMetadata>>;

    async fn get_load_balancer(&self, id: &str) -> Result<Option<LoadBalancerMetadata>>;
}
