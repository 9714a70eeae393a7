//! Cached Fetch Module
//!
//! Cache-aside JSON fetch: fresh entries are served from the cache, misses go
//! upstream and only successful payloads are stored.

use serde_json::Value;
use tracing::{debug, error};

use crate::cache::TtlCache;
use crate::error::{FetchError, Result};

use super::Upstream;

/// Returns the JSON at `url`, going to the network only when `cache` holds no
/// fresh entry under `key`.
///
/// Only successful responses are stored. Failures are returned to the caller
/// and the next call for the same key fetches again.
pub async fn fetch_json(
    upstream: &dyn Upstream,
    url: &str,
    cache: &TtlCache<Value>,
    key: &str,
) -> Result<Value> {
    if let Some(data) = cache.get(key).await {
        debug!(key, "cache hit");
        return Ok(data);
    }

    debug!(key, url, "cache miss, fetching");
    match upstream.get_json(url).await {
        Ok(data) => {
            cache.insert(key, data.clone()).await;
            Ok(data)
        }
        Err(err @ FetchError::Status { .. }) => Err(err),
        Err(err) => {
            error!(url, error = ?err, "network or parsing error");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::fetch::FetchedBytes;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Replays queued results and counts calls.
    #[derive(Default)]
    struct ScriptedUpstream {
        responses: Mutex<VecDeque<Result<Value>>>,
        calls: AtomicUsize,
    }

    impl ScriptedUpstream {
        fn with(responses: Vec<Result<Value>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Upstream for ScriptedUpstream {
        async fn get_json(&self, _url: &str) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".into())))
        }

        async fn get_bytes(&self, _url: &str) -> Result<FetchedBytes> {
            Err(FetchError::Transport("not scripted".into()))
        }
    }

    fn cache(clock: &ManualClock) -> TtlCache<Value> {
        TtlCache::with_clock(Duration::from_secs(3600), Arc::new(clock.clone()))
    }

    #[tokio::test]
    async fn test_hit_suppresses_fetch() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        let upstream = ScriptedUpstream::with(vec![Ok(json!({"login": "octocat"}))]);

        let first = fetch_json(&upstream, "u", &cache, "user:octocat").await.unwrap();
        let second = fetch_json(&upstream, "u", &cache, "user:octocat").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(upstream.calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_triggers_exactly_one_refetch() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        let upstream = ScriptedUpstream::with(vec![
            Ok(json!({"followers": 1})),
            Ok(json!({"followers": 2})),
        ]);

        fetch_json(&upstream, "u", &cache, "user:a").await.unwrap();
        clock.advance(Duration::from_secs(3600));

        let refreshed = fetch_json(&upstream, "u", &cache, "user:a").await.unwrap();
        let again = fetch_json(&upstream, "u", &cache, "user:a").await.unwrap();

        assert_eq!(refreshed, json!({"followers": 2}));
        assert_eq!(again, refreshed);
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_status_error_not_cached() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        let upstream = ScriptedUpstream::with(vec![
            Err(FetchError::from_status(502)),
            Ok(json!({"login": "octocat"})),
        ]);

        let err = fetch_json(&upstream, "u", &cache, "user:octocat").await.unwrap_err();
        assert_eq!(err.status(), 502);
        assert!(cache.is_empty().await);

        let ok = fetch_json(&upstream, "u", &cache, "user:octocat").await.unwrap();
        assert_eq!(ok["login"], "octocat");
        assert_eq!(upstream.calls(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_not_cached() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        let upstream = ScriptedUpstream::with(vec![Err(FetchError::Transport("reset".into()))]);

        let err = fetch_json(&upstream, "u", &cache, "repos:a").await.unwrap_err();
        assert_eq!(err.status(), 500);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_empty_payload_is_cached() {
        let clock = ManualClock::new();
        let cache = cache(&clock);
        let upstream = ScriptedUpstream::with(vec![Ok(json!([]))]);

        fetch_json(&upstream, "u", &cache, "repos:empty").await.unwrap();
        let cached = fetch_json(&upstream, "u", &cache, "repos:empty").await.unwrap();

        assert_eq!(cached, json!([]));
        assert_eq!(upstream.calls(), 1);
    }
}
