//! The request context value.
//!
//! A [`RequestContext`] is an explicit, injectable bag of per-flow state:
//! the authenticated user, culture, tokens, and the lazily resolved
//! security services. Call sites that cannot take a parameter reach the
//! current one through [`crate::ambient`].

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::error::ContextResult;
use crate::keys;
use crate::providers::{
    resolve_information_owner, resolve_security_manager, InformationOwner, SecurityManager,
};

/// Per-request/per-flow context state.
///
/// Values are a flat string-keyed map under the fixed keys in
/// [`crate::keys`]. The security manager and information owner are
/// resolved at most once per context and memoized.
#[derive(Default)]
pub struct RequestContext {
    values: RwLock<HashMap<String, String>>,
    security_manager: OnceCell<Arc<dyn SecurityManager>>,
    information_owner: OnceCell<Arc<dyn InformationOwner>>,
}

impl RequestContext {
    /// An empty context. Getters return `None` until values are set; there
    /// is no implicit default user.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context pre-populated with the authenticated user name.
    pub fn for_user(user_name: impl Into<String>) -> Self {
        let context = Self::new();
        context.set(keys::USER_NAME, user_name);
        context
    }

    /// A context for background service work. Treated as not authenticated
    /// by [`is_authenticated`](Self::is_authenticated).
    pub fn for_service_account() -> Self {
        Self::for_user(keys::SERVICE_ACCOUNT_NAME)
    }

    /// Raw read of a context value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    /// Raw write of a context value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(key.into(), value.into());
    }

    /// Remove a context value, returning the previous one.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    /// The authenticated user name, if any.
    pub fn user_name(&self) -> Option<String> {
        self.get(keys::USER_NAME)
    }

    /// The originating client IP, if recorded.
    pub fn user_ip(&self) -> Option<String> {
        self.get(keys::USER_IP)
    }

    /// The opaque security token issued at sign-in, if present.
    pub fn security_token(&self) -> Option<String> {
        self.get(keys::SECURITY_TOKEN)
    }

    /// The logical session identifier, if present.
    pub fn session_id(&self) -> Option<String> {
        self.get(keys::SESSION_ID)
    }

    /// The client application name inside the suite, if present.
    pub fn application_name(&self) -> Option<String> {
        self.get(keys::APPLICATION_NAME)
    }

    /// The full culture identifier (e.g. `en-US`), if present.
    pub fn user_culture(&self) -> Option<String> {
        self.get(keys::USER_CULTURE)
    }

    /// The UI language. The only getter with a built-in fallback: defaults
    /// to [`keys::DEFAULT_LANGUAGE`] when unset.
    pub fn user_language(&self) -> String {
        self.get(keys::USER_LANGUAGE)
            .filter(|language| !language.is_empty())
            .unwrap_or_else(|| keys::DEFAULT_LANGUAGE.to_string())
    }

    /// Whether this context carries a real authenticated user.
    ///
    /// The service account sentinel counts as *not* authenticated, so
    /// background work never passes user-level checks by accident.
    pub fn is_authenticated(&self) -> bool {
        match self.user_name() {
            Some(name) => !name.is_empty() && name != keys::SERVICE_ACCOUNT_NAME,
            None => false,
        }
    }

    /// The security manager for this context, resolved on first use via the
    /// registered provider and memoized for the context lifetime.
    pub fn security_manager(&self) -> ContextResult<Arc<dyn SecurityManager>> {
        self.security_manager
            .get_or_try_init(|| resolve_security_manager(self))
            .map(Arc::clone)
    }

    /// The information owner for this context, resolved on first use via
    /// the registered provider and memoized for the context lifetime.
    pub fn information_owner(&self) -> ContextResult<Arc<dyn InformationOwner>> {
        self.information_owner
            .get_or_try_init(|| resolve_information_owner(self))
            .map(Arc::clone)
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("user_name", &self.user_name())
            .field("session_id", &self.session_id())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
