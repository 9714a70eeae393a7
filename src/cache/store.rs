//! Cache Store Module
//!
//! Keyed store whose entries are checked against a TTL at read time.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, Clock, SystemClock};

// == TTL Cache ==
/// Keyed store with a single TTL applied on read.
///
/// There is no background sweep and no eviction: stale entries stay in memory
/// until the next successful write for the same key replaces them.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Maximum age of a usable entry
    ttl: Duration,
    /// Time source for freshness checks
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the value for `key` if one was stored less than one TTL ago.
    ///
    /// Takes only a read lock and never modifies the map.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous entry.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry::new(value, self.clock.now());
        self.entries.write().await.insert(key.into(), entry);
    }

    // == Length ==
    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn cache_with_clock(ttl_secs: u64) -> (TtlCache<String>, ManualClock) {
        let clock = ManualClock::new();
        let cache = TtlCache::with_clock(Duration::from_secs(ttl_secs), Arc::new(clock.clone()));
        (cache, clock)
    }

    #[tokio::test]
    async fn test_cache_new() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);
        assert_eq!(cache.ttl(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let (cache, _clock) = cache_with_clock(60);

        cache.insert("key1", "value1".to_string()).await;

        assert_eq!(cache.get("key1").await.as_deref(), Some("value1"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_get_missing() {
        let (cache, _clock) = cache_with_clock(60);
        assert!(cache.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_cache_overwrite() {
        let (cache, _clock) = cache_with_clock(60);

        cache.insert("key1", "value1".to_string()).await;
        cache.insert("key1", "value2".to_string()).await;

        assert_eq!(cache.get("key1").await.as_deref(), Some("value2"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_stale_entry_is_kept_but_not_served() {
        let (cache, clock) = cache_with_clock(60);

        cache.insert("key1", "value1".to_string()).await;
        clock.advance(Duration::from_secs(60));

        assert!(cache.get("key1").await.is_none());
        // No sweep: the stale entry is still in the map
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_overwrite_refreshes_timestamp() {
        let (cache, clock) = cache_with_clock(60);

        cache.insert("key1", "old".to_string()).await;
        clock.advance(Duration::from_secs(90));
        cache.insert("key1", "new".to_string()).await;
        clock.advance(Duration::from_secs(30));

        assert_eq!(cache.get("key1").await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_cache_keys_are_independent() {
        let (cache, clock) = cache_with_clock(60);

        cache.insert("user:a", "a".to_string()).await;
        clock.advance(Duration::from_secs(45));
        cache.insert("user:b", "b".to_string()).await;
        clock.advance(Duration::from_secs(20));

        assert!(cache.get("user:a").await.is_none());
        assert_eq!(cache.get("user:b").await.as_deref(), Some("b"));
    }
}
