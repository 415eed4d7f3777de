//! Per-request ambient context for the crestline suite.
//!
//! Holds the state every tier needs about the flow it is serving (user
//! identity, culture, security token, session) as an explicit
//! [`RequestContext`] value, plus scoped installation so deep call sites
//! can ask for "the current user" without parameter plumbing.
//!
//! Design rules:
//!
//! - no installed context means no user: getters return `None`, never a
//!   default identity;
//! - the single exception is language, which falls back to `"en"`;
//! - the background service account is never reported as authenticated.

pub mod ambient;
pub mod context;
pub mod error;
pub mod keys;
pub mod providers;

pub use ambient::{
    application_language, current, current_user_language, current_user_name, is_authenticated,
    is_thread_context_authenticated, scope, set_application_language, thread_current,
    thread_scope, ThreadScopeGuard,
};
pub use context::RequestContext;
pub use error::{ContextError, ContextResult};
pub use providers::{
    set_information_owner_provider, set_security_manager_provider, InformationOwner,
    InformationOwnerProvider, SecurityManager, SecurityManagerProvider,
};
