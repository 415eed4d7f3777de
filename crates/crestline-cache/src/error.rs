//! Cache error types.

use thiserror::Error;

/// Errors surfaced by the caching layer. The caches themselves do not
/// fail; only the injected providers can.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("light-info provider failed for {entity_type}: {message}")]
    Provider {
        entity_type: String,
        message: String,
    },
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
