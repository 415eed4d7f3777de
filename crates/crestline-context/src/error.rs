//! Context error types.

use thiserror::Error;

/// Errors raised while resolving context-scoped services.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no {service} provider registered")]
    NoProvider { service: &'static str },

    #[error("{service} resolution failed: {message}")]
    ResolutionFailed {
        service: &'static str,
        message: String,
    },
}

/// Result type for context operations.
pub type ContextResult<T> = Result<T, ContextError>;
