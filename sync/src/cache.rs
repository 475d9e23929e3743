//! Query cache with freshness windows and prefix invalidation.
//!
//! # Design
//! An explicit, injectable cache service keyed by hierarchical `QueryKey`s
//! (`["events"]`, `["events", {id}, "rsvps"]`, …). A fetched value is served
//! without refetching for a fixed freshness window; `invalidate` marks every
//! entry under a key prefix stale so the next read refetches. Invalidating
//! `["events"]` therefore also covers that resource's metrics and RSVP
//! sub-keys — coordinated invalidation by resource tag.
//!
//! Per key, at most one fetch is in flight: subscribers serialize on a
//! per-key lock and re-check the cache after acquiring it, so a burst of
//! concurrent subscribers produces exactly one network call. Failed fetches
//! cache nothing.
//!
//! Freshness is measured on the tokio clock so tests can pause and advance
//! time.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::SyncError;

/// How long a fetched collection is served without refetching.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5 * 60);

/// Hierarchical cache key: an ordered list of segments. Prefix relationships
/// drive invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Extend this key with one more segment.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

struct CachedValue {
    data: Arc<dyn Any + Send + Sync>,
    fetched_at: Instant,
}

#[derive(Default)]
struct Slot {
    value: Option<CachedValue>,
    fetch_lock: Arc<Mutex<()>>,
}

/// Process-wide shared cache. All subscribers to the same key observe the
/// same data after an operation resolves.
pub struct QueryCache {
    fresh_for: Duration,
    entries: Mutex<HashMap<QueryKey, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::with_freshness(DEFAULT_FRESHNESS)
    }

    pub fn with_freshness(fresh_for: Duration) -> Self {
        Self {
            fresh_for,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value when present and fresh; otherwise run `fetch`
    /// and cache its result. At most one fetch runs per key at a time.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Arc<T>, SyncError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SyncError>>,
    {
        let fetch_lock = {
            let mut entries = self.entries.lock().await;
            let slot = entries.entry(key.clone()).or_default();
            if let Some(data) = self.fresh(slot) {
                return downcast(key, data);
            }
            Arc::clone(&slot.fetch_lock)
        };

        // Serialize fetches for this key. Whoever acquires the lock first
        // populates the cache; later waiters observe its result here instead
        // of fetching again.
        let _guard = fetch_lock.lock().await;
        {
            let entries = self.entries.lock().await;
            if let Some(slot) = entries.get(key) {
                if let Some(data) = self.fresh(slot) {
                    return downcast(key, data);
                }
            }
        }

        tracing::debug!(key = %key, "cache miss, fetching");
        let value: Arc<T> = Arc::new(fetch().await?);

        let mut entries = self.entries.lock().await;
        let slot = entries.entry(key.clone()).or_default();
        slot.value = Some(CachedValue {
            data: value.clone(),
            fetched_at: Instant::now(),
        });
        Ok(value)
    }

    /// Mark every entry whose key starts with `prefix` stale. The next read
    /// of an invalidated key refetches.
    pub async fn invalidate(&self, prefix: &QueryKey) {
        let mut entries = self.entries.lock().await;
        let mut dropped = 0;
        for (key, slot) in entries.iter_mut() {
            if key.starts_with(prefix) && slot.value.take().is_some() {
                dropped += 1;
            }
        }
        tracing::debug!(prefix = %prefix, dropped, "cache invalidated");
    }

    fn fresh(&self, slot: &Slot) -> Option<Arc<dyn Any + Send + Sync>> {
        let value = slot.value.as_ref()?;
        (value.fetched_at.elapsed() < self.fresh_for).then(|| Arc::clone(&value.data))
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: Send + Sync + 'static>(
    key: &QueryKey,
    data: Arc<dyn Any + Send + Sync>,
) -> Result<Arc<T>, SyncError> {
    data.downcast::<T>()
        .map_err(|_| SyncError::Cache(key.to_string()))
}
