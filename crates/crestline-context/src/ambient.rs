//! Ambient access to the current request context.
//!
//! The context itself is an explicit value (see [`RequestContext`]); these
//! helpers install one for the duration of a flow so deep call sites can
//! read "the current user" without threading a parameter through every
//! signature. Task scopes propagate across `.await` and stay isolated
//! between concurrent flows; a thread scope covers synchronous call stacks.

use std::cell::RefCell;
use std::future::Future;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::context::RequestContext;
use crate::keys;

tokio::task_local! {
    static TASK_CONTEXT: Arc<RequestContext>;
}

thread_local! {
    static THREAD_CONTEXT: RefCell<Vec<Arc<RequestContext>>> = const { RefCell::new(Vec::new()) };
}

static APPLICATION_LANGUAGE: Lazy<RwLock<Option<String>>> = Lazy::new(|| RwLock::new(None));

/// Run `future` with `context` installed as the current task context.
pub async fn scope<F>(context: Arc<RequestContext>, future: F) -> F::Output
where
    F: Future,
{
    TASK_CONTEXT.scope(context, future).await
}

/// Install `context` for the current thread until the guard drops.
/// Scopes nest; the innermost wins.
pub fn thread_scope(context: Arc<RequestContext>) -> ThreadScopeGuard {
    THREAD_CONTEXT.with(|stack| stack.borrow_mut().push(context));
    ThreadScopeGuard { _private: () }
}

/// Restores the previous thread context on drop.
#[must_use = "the context is uninstalled when the guard drops"]
pub struct ThreadScopeGuard {
    _private: (),
}

impl Drop for ThreadScopeGuard {
    fn drop(&mut self) {
        THREAD_CONTEXT.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// The current context: the task scope when inside one, otherwise the
/// innermost thread scope, otherwise `None`.
pub fn current() -> Option<Arc<RequestContext>> {
    if let Ok(context) = TASK_CONTEXT.try_with(Arc::clone) {
        return Some(context);
    }
    thread_current()
}

/// The innermost thread-scoped context, ignoring any task scope.
pub fn thread_current() -> Option<Arc<RequestContext>> {
    THREAD_CONTEXT.with(|stack| stack.borrow().last().cloned())
}

/// User name from the current context, if any. No context means no user.
pub fn current_user_name() -> Option<String> {
    current().and_then(|context| context.user_name())
}

/// UI language from the current context; `"en"` when no context is
/// installed or the context has no language.
pub fn current_user_language() -> String {
    current()
        .map(|context| context.user_language())
        .unwrap_or_else(|| keys::DEFAULT_LANGUAGE.to_string())
}

/// Whether the current context carries a real authenticated user.
/// The service account sentinel is not authenticated.
pub fn is_authenticated() -> bool {
    current().is_some_and(|context| context.is_authenticated())
}

/// Like [`is_authenticated`] but reads only the thread scope. Used by
/// synchronous infrastructure that must not observe a task scope.
pub fn is_thread_context_authenticated() -> bool {
    thread_current().is_some_and(|context| context.is_authenticated())
}

/// The process-wide application language; `"en"` unless configured.
pub fn application_language() -> String {
    APPLICATION_LANGUAGE
        .read()
        .clone()
        .unwrap_or_else(|| keys::DEFAULT_LANGUAGE.to_string())
}

/// Configure the process-wide application language.
pub fn set_application_language(language: impl Into<String>) {
    *APPLICATION_LANGUAGE.write() = Some(language.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scope_means_no_context() {
        assert!(thread_current().is_none());
        assert_eq!(current_user_language(), "en");
        assert!(!is_thread_context_authenticated());
    }

    #[test]
    fn test_thread_scopes_nest() {
        let outer = Arc::new(RequestContext::for_user("outer"));
        let inner = Arc::new(RequestContext::for_user("inner"));

        let _outer_guard = thread_scope(outer);
        assert_eq!(current_user_name().as_deref(), Some("outer"));
        {
            let _inner_guard = thread_scope(inner);
            assert_eq!(current_user_name().as_deref(), Some("inner"));
        }
        assert_eq!(current_user_name().as_deref(), Some("outer"));
    }

    #[tokio::test]
    async fn test_task_scope_wins_over_thread_scope() {
        let context = Arc::new(RequestContext::for_user("task-user"));
        scope(context, async {
            assert_eq!(current_user_name().as_deref(), Some("task-user"));
            assert!(is_authenticated());
        })
        .await;
        assert!(current().is_none());
    }

    #[tokio::test]
    async fn test_parallel_tasks_are_isolated() {
        let first = tokio::spawn(scope(
            Arc::new(RequestContext::for_user("alpha")),
            async {
                tokio::task::yield_now().await;
                current_user_name()
            },
        ));
        let second = tokio::spawn(scope(
            Arc::new(RequestContext::for_user("beta")),
            async {
                tokio::task::yield_now().await;
                current_user_name()
            },
        ));

        assert_eq!(first.await.unwrap().as_deref(), Some("alpha"));
        assert_eq!(second.await.unwrap().as_deref(), Some("beta"));
    }
}
