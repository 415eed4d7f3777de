//! Entity light-info lookup cache.
//!
//! Screens and reports constantly resolve entity ids to codes and display
//! names. The cache keeps those small records per entity type, keyed both
//! ways, and fills itself through an injected provider. Eviction is a
//! deliberate blunt instrument: after a configured number of cumulative
//! lookups across *all* entity types the whole cache is dropped and the
//! counter zeroed. An epoch reset, not per-entry aging.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Minimal identity record for referencing an entity cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityLightInfo {
    pub id: String,
    pub code: String,
    pub name: String,
    pub entity_type: String,
    /// Additional display elements by name (e.g. `"city"`, `"vat_number"`).
    #[serde(default)]
    pub extra: HashMap<String, String>,
}

/// Source of light-info records, usually backed by the entity store.
pub trait EntityLightInfoProvider: Send + Sync {
    fn by_id(&self, entity_type: &str, id: &str) -> Result<Option<EntityLightInfo>>;
    fn by_code(&self, entity_type: &str, code: &str) -> Result<Option<EntityLightInfo>>;
}

/// Cache tuning. The default flush threshold matches the suite-wide
/// policy; tests shrink it to exercise the reset cheaply.
#[derive(Debug, Clone)]
pub struct EntityCacheConfig {
    /// Cumulative lookups (across all entity types) after which the whole
    /// cache is flushed.
    pub flush_threshold: u64,
}

impl Default for EntityCacheConfig {
    fn default() -> Self {
        Self {
            flush_threshold: 5000,
        }
    }
}

#[derive(Default)]
struct TypeMaps {
    by_id: HashMap<String, EntityLightInfo>,
    by_code: HashMap<String, EntityLightInfo>,
}

#[derive(Default)]
struct CacheState {
    types: HashMap<String, TypeMaps>,
    lookups: u64,
}

/// Read-through cache of [`EntityLightInfo`] records.
///
/// One lock over the whole state: lookups are cheap map probes and the
/// collection-level lock mirrors the access pattern the suite actually
/// has (bursts from a single report at a time).
pub struct EntityLightInfoCache {
    provider: Arc<dyn EntityLightInfoProvider>,
    config: EntityCacheConfig,
    state: Mutex<CacheState>,
}

impl EntityLightInfoCache {
    pub fn new(provider: Arc<dyn EntityLightInfoProvider>) -> Self {
        Self::with_config(provider, EntityCacheConfig::default())
    }

    pub fn with_config(provider: Arc<dyn EntityLightInfoProvider>, config: EntityCacheConfig) -> Self {
        Self {
            provider,
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Resolve a record by entity id, filling the cache on a miss.
    pub fn get_by_id(&self, entity_type: &str, id: &str) -> Result<Option<EntityLightInfo>> {
        self.count_lookup();
        if let Some(info) = self.cached(entity_type, |maps| maps.by_id.get(id).cloned()) {
            return Ok(Some(info));
        }

        let fetched = self.provider.by_id(entity_type, id)?;
        if let Some(info) = &fetched {
            self.store(info.clone());
        }
        Ok(fetched)
    }

    /// Resolve a record by entity code, filling the cache on a miss.
    pub fn get_by_code(&self, entity_type: &str, code: &str) -> Result<Option<EntityLightInfo>> {
        self.count_lookup();
        if let Some(info) = self.cached(entity_type, |maps| maps.by_code.get(code).cloned()) {
            return Ok(Some(info));
        }

        let fetched = self.provider.by_code(entity_type, code)?;
        if let Some(info) = &fetched {
            self.store(info.clone());
        }
        Ok(fetched)
    }

    /// Resolve a code to the entity id.
    pub fn get_id_for_entity_code(&self, entity_type: &str, code: &str) -> Result<Option<String>> {
        Ok(self.get_by_code(entity_type, code)?.map(|info| info.id))
    }

    /// Resolve an id to the display name.
    pub fn get_name_for_entity_id(&self, entity_type: &str, id: &str) -> Result<Option<String>> {
        Ok(self.get_by_id(entity_type, id)?.map(|info| info.name))
    }

    /// Drop everything and zero the lookup counter.
    pub fn flush(&self) {
        let mut state = self.state.lock();
        state.types.clear();
        state.lookups = 0;
    }

    /// Cumulative lookups since construction or the last flush.
    pub fn lookup_count(&self) -> u64 {
        self.state.lock().lookups
    }

    /// Count one lookup; crossing the threshold flushes the whole cache,
    /// so the crossing request itself runs against an empty cache.
    fn count_lookup(&self) {
        let mut state = self.state.lock();
        state.lookups += 1;
        if state.lookups > self.config.flush_threshold {
            debug!(
                threshold = self.config.flush_threshold,
                "entity light-info cache flushed"
            );
            state.types.clear();
            state.lookups = 0;
        }
    }

    fn cached<F>(&self, entity_type: &str, probe: F) -> Option<EntityLightInfo>
    where
        F: FnOnce(&TypeMaps) -> Option<EntityLightInfo>,
    {
        let state = self.state.lock();
        state.types.get(entity_type).and_then(probe)
    }

    fn store(&self, info: EntityLightInfo) {
        let mut state = self.state.lock();
        let maps = state.types.entry(info.entity_type.clone()).or_default();
        maps.by_id.insert(info.id.clone(), info.clone());
        maps.by_code.insert(info.code.clone(), info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingProvider {
        fetches: AtomicU64,
    }

    impl CountingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fetches: AtomicU64::new(0),
            })
        }

        fn fetch_count(&self) -> u64 {
            self.fetches.load(Ordering::SeqCst)
        }

        fn record(&self, entity_type: &str, id: &str, code: &str) -> EntityLightInfo {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            EntityLightInfo {
                id: id.to_string(),
                code: code.to_string(),
                name: format!("{entity_type} {code}"),
                entity_type: entity_type.to_string(),
                extra: HashMap::new(),
            }
        }
    }

    impl EntityLightInfoProvider for CountingProvider {
        fn by_id(&self, entity_type: &str, id: &str) -> Result<Option<EntityLightInfo>> {
            Ok(Some(self.record(entity_type, id, &format!("C{id}"))))
        }

        fn by_code(&self, entity_type: &str, code: &str) -> Result<Option<EntityLightInfo>> {
            let id = code.trim_start_matches('C').to_string();
            Ok(Some(self.record(entity_type, &id, code)))
        }
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let provider = CountingProvider::new();
        let cache = EntityLightInfoCache::new(provider.clone());

        let first = cache.get_by_id("Customer", "7").unwrap().unwrap();
        let second = cache.get_by_id("Customer", "7").unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.fetch_count(), 1);
    }

    #[test]
    fn test_fill_by_id_also_serves_by_code() {
        let provider = CountingProvider::new();
        let cache = EntityLightInfoCache::new(provider.clone());

        cache.get_by_id("Customer", "7").unwrap();
        let id = cache.get_id_for_entity_code("Customer", "C7").unwrap();

        assert_eq!(id.as_deref(), Some("7"));
        assert_eq!(provider.fetch_count(), 1);
    }

    #[test]
    fn test_types_are_kept_apart() {
        let provider = CountingProvider::new();
        let cache = EntityLightInfoCache::new(provider.clone());

        cache.get_by_id("Customer", "7").unwrap();
        cache.get_by_id("Supplier", "7").unwrap();

        assert_eq!(provider.fetch_count(), 2);
        let name = cache.get_name_for_entity_id("Supplier", "7").unwrap();
        assert_eq!(name.as_deref(), Some("Supplier C7"));
    }

    #[test]
    fn test_crossing_the_threshold_flushes_once() {
        let provider = CountingProvider::new();
        let cache = EntityLightInfoCache::with_config(
            provider.clone(),
            EntityCacheConfig { flush_threshold: 5 },
        );

        // Five lookups of the same record: one provider fetch.
        for _ in 0..5 {
            cache.get_by_id("Customer", "7").unwrap();
        }
        assert_eq!(provider.fetch_count(), 1);
        assert_eq!(cache.lookup_count(), 5);

        // The sixth lookup crosses the threshold: flush, counter zeroed,
        // and the request runs against the empty cache (a fresh fetch).
        cache.get_by_id("Customer", "7").unwrap();
        assert_eq!(provider.fetch_count(), 2);
        assert_eq!(cache.lookup_count(), 0);

        // No second flush until the counter climbs again.
        cache.get_by_id("Customer", "7").unwrap();
        assert_eq!(provider.fetch_count(), 2);
        assert_eq!(cache.lookup_count(), 1);
    }

    #[test]
    fn test_manual_flush_clears_everything() {
        let provider = CountingProvider::new();
        let cache = EntityLightInfoCache::new(provider.clone());

        cache.get_by_id("Customer", "7").unwrap();
        cache.flush();

        assert_eq!(cache.lookup_count(), 0);
        cache.get_by_id("Customer", "7").unwrap();
        assert_eq!(provider.fetch_count(), 2);
    }
}
