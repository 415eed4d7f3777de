//! Small in-process caches for the crestline suite.
//!
//! Two shapes cover what the applications actually need:
//!
//! - [`TtlCache`]: a generic cache with one expiration policy (sliding or
//!   absolute) for the whole cache, plus the two process-wide singletons
//!   with the suite-default lifetimes;
//! - [`EntityLightInfoCache`]: a read-through id/code/name lookup cache
//!   with a deliberately blunt epoch flush after a configured number of
//!   cumulative lookups.
//!
//! Nothing here talks to the network or disk; providers are injected.

pub mod entity;
pub mod error;
pub mod ttl;

pub use entity::{
    EntityCacheConfig, EntityLightInfo, EntityLightInfoCache, EntityLightInfoProvider,
};
pub use error::{CacheError, Result};
pub use ttl::{
    absolute_cache, sliding_cache, CacheStats, Expiry, TtlCache, ABSOLUTE_LIFETIME,
    SLIDING_LIFETIME,
};
