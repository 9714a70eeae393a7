//! Cache Entry Module
//!
//! A stored value together with the instant it was written.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry. Entries are replaced whole, never edited.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was stored
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    // == Is Fresh ==
    /// Checks if the entry is still usable at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale, so the
    /// entry is valid only while `now - stored_at < ttl`.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }

    /// Age of the entry at `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fresh_before_ttl() {
        let start = Instant::now();
        let entry = CacheEntry::new("value", start);

        assert!(entry.is_fresh(start, Duration::from_secs(60)));
        assert!(entry.is_fresh(start + Duration::from_secs(59), Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_stale_at_boundary() {
        let start = Instant::now();
        let entry = CacheEntry::new("value", start);

        assert!(
            !entry.is_fresh(start + Duration::from_secs(60), Duration::from_secs(60)),
            "Entry should be stale once its age equals the TTL"
        );
    }

    #[test]
    fn test_entry_zero_ttl_never_fresh() {
        let start = Instant::now();
        let entry = CacheEntry::new(1u8, start);
        assert!(!entry.is_fresh(start, Duration::ZERO));
    }

    #[test]
    fn test_entry_age() {
        let start = Instant::now();
        let entry = CacheEntry::new((), start);
        assert_eq!(entry.age(start + Duration::from_millis(1500)), Duration::from_millis(1500));
        // A clock reading before the write is treated as age zero
        assert_eq!(entry.age(start), Duration::ZERO);
    }
}
