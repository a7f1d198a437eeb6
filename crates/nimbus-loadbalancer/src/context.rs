//! Service contexts and their scoped lifetime

use crate::service::LoadBalancerService;
use std::ops::{Deref, DerefMut};

/// A provider connection that must be closed when no longer needed
pub trait ServiceContext: Send {
    /// Provider name, e.g. "cloudstack"
    fn provider(&self) -> &str;

    /// Release the context's resources
    fn close(&mut self);
}

/// A context exposing a load balancer service
pub trait LoadBalancerServiceContext: ServiceContext {
    fn load_balancer_service(&self) -> &dyn LoadBalancerService;
}

/// RAII guard closing its context exactly once.
///
/// The context is closed by [`ContextScope::close`] or, failing that, when
/// the scope is dropped, including on early returns and panics.
pub struct ContextScope<C: ServiceContext> {
    context: C,
    closed: bool,
}

impl<C: ServiceContext> ContextScope<C> {
    pub fn new(context: C) -> Self {
        tracing::debug!("Opened {} context", context.provider());
        Self {
            context,
            closed: false,
        }
    }

    /// Close the context now
    pub fn close(mut self) {
        self.close_once();
    }

    fn close_once(&mut self) {
        if !self.closed {
            self.context.close();
            self.closed = true;
            tracing::debug!("Closed {} context", self.context.provider());
        }
    }
}

impl<C: ServiceContext> Deref for ContextScope<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.context
    }
}

impl<C: ServiceContext> DerefMut for ContextScope<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.context
    }
}

impl<C: ServiceContext> Drop for ContextScope<C> {
    fn drop(&mut self) {
        self.close_once();
    }
}
