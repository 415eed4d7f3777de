//! Lazily resolved context services.
//!
//! The security manager and the information owner are expensive to build
//! (directory lookups, tenant metadata), so a context resolves them at most
//! once, on first use, through a process-wide registered provider.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::context::RequestContext;
use crate::error::{ContextError, ContextResult};

/// Permission checks for the current user.
pub trait SecurityManager: Send + Sync {
    /// Whether `user_name` holds `permission`.
    fn has_permission(&self, user_name: &str, permission: &str) -> bool;

    /// Whether `user_name` is a member of `role`.
    fn is_in_role(&self, user_name: &str, role: &str) -> bool;
}

/// Builds a [`SecurityManager`] for a given request context.
pub trait SecurityManagerProvider: Send + Sync {
    fn resolve(&self, context: &RequestContext) -> ContextResult<Arc<dyn SecurityManager>>;
}

/// The tenant/organizational unit a request operates on behalf of.
pub trait InformationOwner: Send + Sync {
    fn code(&self) -> String;
    fn display_name(&self) -> String;
}

/// Builds an [`InformationOwner`] for a given request context.
pub trait InformationOwnerProvider: Send + Sync {
    fn resolve(&self, context: &RequestContext) -> ContextResult<Arc<dyn InformationOwner>>;
}

static SECURITY_PROVIDER: Lazy<RwLock<Option<Arc<dyn SecurityManagerProvider>>>> =
    Lazy::new(|| RwLock::new(None));

static OWNER_PROVIDER: Lazy<RwLock<Option<Arc<dyn InformationOwnerProvider>>>> =
    Lazy::new(|| RwLock::new(None));

/// Register the process-wide security manager provider.
pub fn set_security_manager_provider(provider: Arc<dyn SecurityManagerProvider>) {
    *SECURITY_PROVIDER.write() = Some(provider);
}

/// Register the process-wide information owner provider.
pub fn set_information_owner_provider(provider: Arc<dyn InformationOwnerProvider>) {
    *OWNER_PROVIDER.write() = Some(provider);
}

pub(crate) fn resolve_security_manager(
    context: &RequestContext,
) -> ContextResult<Arc<dyn SecurityManager>> {
    let provider = SECURITY_PROVIDER
        .read()
        .clone()
        .ok_or(ContextError::NoProvider {
            service: "security manager",
        })?;
    provider.resolve(context)
}

pub(crate) fn resolve_information_owner(
    context: &RequestContext,
) -> ContextResult<Arc<dyn InformationOwner>> {
    let provider = OWNER_PROVIDER
        .read()
        .clone()
        .ok_or(ContextError::NoProvider {
            service: "information owner",
        })?;
    provider.resolve(context)
}
