//! Generic TTL caches.
//!
//! One policy per cache, not per key: either every entry slides on access
//! or every entry expires a fixed interval after it was stored. The two
//! process-wide singletons at the bottom carry the suite-wide defaults.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;

/// Expiration policy for a whole cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// The entry lives `Duration` past its most recent access.
    Sliding(Duration),
    /// The entry lives `Duration` past the moment it was stored,
    /// regardless of access.
    Absolute(Duration),
}

impl Expiry {
    fn lifetime(&self) -> Duration {
        match self {
            Expiry::Sliding(lifetime) | Expiry::Absolute(lifetime) => *lifetime,
        }
    }
}

/// Counters describing cache behavior since construction (or the last
/// [`TtlCache::reset_stats`]).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entry_count: usize,
}

impl CacheStats {
    /// Hit rate in percent; 0 when nothing was looked up yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// In-process cache with a single TTL policy.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    expiry: Expiry,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(expiry: Expiry) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            expiry,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// Look a value up, evicting it if it expired. A sliding cache
    /// refreshes the entry's lifetime on every hit.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                if let Expiry::Sliding(lifetime) = self.expiry {
                    entry.expires_at = Instant::now() + lifetime;
                }
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value under the cache-wide policy, replacing any previous
    /// entry for the key.
    pub fn set(&self, key: K, value: V) {
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.expiry.lifetime(),
        };
        self.entries.write().insert(key, entry);
    }

    /// Fetch the cached value or compute, store, and return it.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.set(key, value.clone());
        value
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().remove(key).map(|entry| entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries
            .read()
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Number of stored entries, expired ones included until they are
    /// touched or purged.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired entry now instead of waiting for access.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let dropped = (before - entries.len()) as u64;
        if dropped > 0 {
            self.evictions.fetch_add(dropped, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entry_count: self.len(),
        }
    }

    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }
}

/// Suite-wide default lifetime of the sliding singleton.
pub const SLIDING_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Suite-wide default lifetime of the absolute singleton.
pub const ABSOLUTE_LIFETIME: Duration = Duration::from_secs(200);

static SLIDING: Lazy<TtlCache<String, serde_json::Value>> =
    Lazy::new(|| TtlCache::new(Expiry::Sliding(SLIDING_LIFETIME)));

static ABSOLUTE: Lazy<TtlCache<String, serde_json::Value>> =
    Lazy::new(|| TtlCache::new(Expiry::Absolute(ABSOLUTE_LIFETIME)));

/// The process-wide sliding cache (5-minute lifetime, refreshed on
/// access). Shared by all callers; keys are namespaced by convention
/// (`"area.item"`).
pub fn sliding_cache() -> &'static TtlCache<String, serde_json::Value> {
    &SLIDING
}

/// The process-wide absolute cache (200-second lifetime from store time).
pub fn absolute_cache() -> &'static TtlCache<String, serde_json::Value> {
    &ABSOLUTE
}
