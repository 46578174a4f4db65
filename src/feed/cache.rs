// src/feed/cache.rs
//! Short-lived response cache keyed by endpoint.
//!
//! Within the revalidation window a repeated request reuses the stored
//! snapshot; after it the next request fetches again. Failed fetches are
//! never stored, and concurrent misses are not coalesced (each one fetches).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::counter;

use crate::error::FetchError;
use crate::feed::source::FeedSource;
use crate::feed::types::FeedSnapshot;

/// Default revalidation window (5 minutes).
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(300);

#[derive(Debug)]
pub struct ResponseCache {
    inner: Mutex<HashMap<String, Entry>>,
    revalidate: Duration,
}

#[derive(Debug, Clone)]
struct Entry {
    stored_at: Instant,
    snapshot: FeedSnapshot,
}

impl ResponseCache {
    pub fn new(revalidate: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            revalidate,
        }
    }

    /// Fresh snapshot for `endpoint`, if one was stored less than the window ago.
    pub fn get(&self, endpoint: &str) -> Option<FeedSnapshot> {
        let now = Instant::now();
        let mut map = self.inner.lock().expect("response cache mutex poisoned");
        let fresh = map
            .get(endpoint)
            .map(|e| (now.duration_since(e.stored_at) < self.revalidate, e.snapshot.clone()));
        match fresh {
            Some((true, snap)) => Some(snap),
            Some((false, _)) => {
                map.remove(endpoint);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, endpoint: &str, snapshot: FeedSnapshot) {
        let mut map = self.inner.lock().expect("response cache mutex poisoned");
        map.insert(
            endpoint.to_string(),
            Entry {
                stored_at: Instant::now(),
                snapshot,
            },
        );
    }

    /// Drop every stored response.
    pub fn clear(&self) {
        self.inner
            .lock()
            .expect("response cache mutex poisoned")
            .clear();
    }

    pub fn revalidate_window(&self) -> Duration {
        self.revalidate
    }
}

/// [`FeedSource`] decorator that consults a shared [`ResponseCache`] first.
pub struct CachedFeedSource {
    inner: Arc<dyn FeedSource>,
    cache: Arc<ResponseCache>,
}

impl CachedFeedSource {
    pub fn new(inner: Arc<dyn FeedSource>, cache: Arc<ResponseCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl FeedSource for CachedFeedSource {
    async fn get_feed_snapshot(&self) -> Result<FeedSnapshot, FetchError> {
        let endpoint = self.inner.endpoint();
        if let Some(snap) = self.cache.get(endpoint) {
            counter!("feed_cache_hits_total").increment(1);
            tracing::debug!(target: "cache", endpoint, "feed cache hit");
            return Ok(snap);
        }

        counter!("feed_cache_misses_total").increment(1);
        tracing::debug!(target: "cache", endpoint, "feed cache miss");

        // The lock is never held across the await.
        let snap = self.inner.get_feed_snapshot().await?;
        self.cache.put(endpoint, snap.clone());
        Ok(snap)
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::FeedEnvelope;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FeedSource for Counting {
        async fn get_feed_snapshot(&self) -> Result<FeedSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FetchError::Status(500))
            } else {
                Ok(FeedSnapshot::new(FeedEnvelope::default()))
            }
        }

        fn endpoint(&self) -> &str {
            "counting"
        }
    }

    fn counting(fail: bool) -> Arc<Counting> {
        Arc::new(Counting {
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    #[tokio::test]
    async fn second_call_inside_window_is_served_from_cache() {
        let src = counting(false);
        let cache = Arc::new(ResponseCache::new(DEFAULT_REVALIDATE));
        let cached = CachedFeedSource::new(src.clone(), cache);

        let a = cached.get_feed_snapshot().await.unwrap();
        let b = cached.get_feed_snapshot().await.unwrap();
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
        assert!(a.same_fetch(&b));
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let src = counting(true);
        let cache = Arc::new(ResponseCache::new(DEFAULT_REVALIDATE));
        let cached = CachedFeedSource::new(src.clone(), cache);

        assert!(cached.get_feed_snapshot().await.is_err());
        assert!(cached.get_feed_snapshot().await.is_err());
        assert_eq!(src.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_window_always_refetches() {
        let src = counting(false);
        let cache = Arc::new(ResponseCache::new(Duration::ZERO));
        let cached = CachedFeedSource::new(src.clone(), cache);

        cached.get_feed_snapshot().await.unwrap();
        cached.get_feed_snapshot().await.unwrap();
        assert_eq!(src.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn clear_forgets_entries() {
        let cache = ResponseCache::new(DEFAULT_REVALIDATE);
        cache.put("e", FeedSnapshot::default());
        assert!(cache.get("e").is_some());
        cache.clear();
        assert!(cache.get("e").is_none());
    }
}
