//! Portable load balancer service abstraction for Nimbus
//!
//! Orchestration code drives [`LoadBalancerService`] implementations through
//! a [`ContextScope`], which closes the provider context on every exit path.
//!
//! ```ignore
//! let scope = ContextScope::new(provider_context);
//! let lb = scope
//!     .load_balancer_service()
//!     .create_load_balancer_in_location(None, "web", "HTTP", 80, 80, &nodes)
//!     .await?;
//! scope.load_balancer_service().destroy_load_balancer(lb.id()).await?;
//! scope.close();
//! ```

pub mod context;
pub mod domain;
pub mod error;
pub mod service;

pub use context::{ContextScope, LoadBalancerServiceContext, ServiceContext};
pub use domain::{
    BalancedNode, BalancedNodeBuilder, LoadBalancerMetadata, LoadBalancerMetadataBuilder,
};
pub use error::{LoadBalancerError, Result};
pub use service::LoadBalancerService;
