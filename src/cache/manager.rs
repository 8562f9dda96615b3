//! In-memory cache manager with TTL-based freshness
//!
//! Provides a `CacheManager` that stores cloned values keyed by string with
//! expiry timestamps. Entries are never evicted on expiry; they stay readable
//! as stale data until overwritten or cleared.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A single cached value with its timestamps
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry stops being fresh
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug, Clone)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Manages reading and writing cached values in memory
///
/// All access goes through a single mutex; each operation holds it only for
/// the duration of one map lookup or update, so the manager can be shared
/// between tasks behind an `Arc` or a `&`.
#[derive(Debug)]
pub struct CacheManager<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
    ttl: Duration,
}

impl<T: Clone> CacheManager<T> {
    /// Creates an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Creates an empty cache with a TTL given in whole seconds
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    /// The freshness window applied to new entries
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<T>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Writes data to the cache, replacing any previous entry for `key`
    pub fn write(&self, key: &str, data: T) {
        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        self.lock().insert(key.to_string(), entry);
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if no entry exists for `key`.
    /// Returns `Some(CachedData)` with `is_expired = true` if the entry exists
    /// but is older than the TTL, so callers can fall back to it when the
    /// upstream is unavailable.
    pub fn read(&self, key: &str) -> Option<CachedData<T>> {
        let entries = self.lock();
        let entry = entries.get(key)?;

        let now = Utc::now();
        let is_expired = now >= entry.expires_at;

        Some(CachedData {
            data: entry.data.clone(),
            cached_at: entry.cached_at,
            is_expired,
        })
    }

    /// Removes every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries currently held, fresh or expired
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no entries are held
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
