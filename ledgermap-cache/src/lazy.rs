//! Lazy, request-collapsing cache over a [`ResourceLoader`].
//!
//! Each cache slot moves through `absent -> pending -> settled` and only
//! returns to `absent` through an explicit invalidation. The settled state
//! keeps whichever outcome the retrieval produced, failure included.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ledgermap_core::{CacheKey, CatalogResult, DomainId, ResourceKind, ResourcePayload};
use tokio::sync::{Mutex, OnceCell};

use crate::loader::ResourceLoader;

/// Outcome shared by every caller of one cache key.
type Outcome = CatalogResult<Arc<ResourcePayload>>;

/// One cache slot: empty while its retrieval is in flight, then settled
/// for process lifetime or until invalidated. Callers hold clones of the
/// handle, so invalidation never strands an in-flight waiter.
type Entry = Arc<OnceCell<Outcome>>;

/// Memoizing cache keyed by `(domain, resource kind)`.
///
/// Guarantees that each distinct [`CacheKey`] reaches the loader at most
/// once between invalidations, and that concurrent requests for the same
/// key observe the identical underlying retrieval.
///
/// # Collapsing
///
/// `get` inserts the entry handle into the map *before* the loader is
/// invoked, under a lock that is never held across an await. A second
/// request for the same key therefore always finds the existing handle
/// and awaits it instead of racing to create a duplicate retrieval.
pub struct LazyCache<L: ResourceLoader> {
    loader: Arc<L>,
    entries: Arc<Mutex<HashMap<CacheKey, Entry>>>,
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

/// Snapshot of cache usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests that found an existing entry (settled or in flight).
    pub hits: u64,
    /// Requests that created a new entry and triggered a retrieval.
    pub misses: u64,
    /// Entries currently in the cache.
    pub entry_count: u64,
    /// Entries removed by invalidation calls.
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl<L: ResourceLoader> LazyCache<L> {
    /// Create a cache over the given loader.
    pub fn new(loader: Arc<L>) -> Self {
        Self {
            loader,
            entries: Arc::new(Mutex::new(HashMap::new())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Get the resource for `(domain, kind)`, retrieving it at most once.
    ///
    /// The first request for a key triggers a single loader invocation;
    /// every later request — including ones issued while that retrieval is
    /// still in flight — shares its outcome. A stored failure is returned
    /// as-is on every call until the key is invalidated; there is no
    /// implicit retry and no fallback to stale data.
    pub async fn get(
        &self,
        domain: &DomainId,
        kind: ResourceKind,
    ) -> CatalogResult<Arc<ResourcePayload>> {
        let key = CacheKey::new(domain.clone(), kind);

        // Check-then-insert happens entirely under the guard, and the
        // guard never spans an await: the entry is visible to every other
        // task before the retrieval below can start.
        let entry = {
            let mut entries = self.entries.lock().await;
            match entries.get(&key) {
                Some(entry) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(key = %key, "cache hit");
                    Arc::clone(entry)
                }
                None => {
                    self.counters.misses.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key = %key, "cache miss, retrieval scheduled");
                    let entry: Entry = Arc::new(OnceCell::new());
                    entries.insert(key.clone(), Arc::clone(&entry));
                    entry
                }
            }
        };

        entry
            .get_or_init(|| async {
                self.loader
                    .resolve(key.domain(), key.kind())
                    .await
                    .map(Arc::new)
            })
            .await
            .clone()
    }

    /// Remove every cached entry.
    ///
    /// The next `get` for any previously cached key starts a fresh
    /// retrieval.
    pub async fn invalidate(&self) {
        let mut entries = self.entries.lock().await;
        let removed = entries.len() as u64;
        entries.clear();
        self.counters
            .invalidations
            .fetch_add(removed, Ordering::Relaxed);
        tracing::debug!(removed, "cache cleared");
    }

    /// Remove the cached entries belonging to one domain.
    ///
    /// Matches the key's domain component by exact equality; entries for
    /// every other domain stay untouched and are not re-retrieved.
    pub async fn invalidate_domain(&self, domain: &DomainId) {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|key, _| key.domain() != domain);
        let removed = (before - entries.len()) as u64;
        self.counters
            .invalidations
            .fetch_add(removed, Ordering::Relaxed);
        tracing::debug!(domain = %domain, removed, "domain entries invalidated");
    }

    /// Snapshot the usage counters.
    pub async fn stats(&self) -> CacheStats {
        let entry_count = self.entries.lock().await.len() as u64;
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            entry_count,
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
        }
    }

    /// Get a reference to the loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: ResourceLoader> Clone for LazyCache<L> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            entries: Arc::clone(&self.entries),
            counters: Arc::clone(&self.counters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ledgermap_core::{CatalogError, GlossaryEntry};
    use std::sync::atomic::AtomicUsize;

    /// Loader that counts invocations and yields once mid-retrieval, the
    /// way a real module load would suspend.
    struct CountingLoader {
        calls: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ResourceLoader for CountingLoader {
        async fn resolve(
            &self,
            domain: &DomainId,
            kind: ResourceKind,
        ) -> CatalogResult<ResourcePayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            match domain.as_str() {
                "customer" | "deposits" | "transactions" => {
                    Ok(ResourcePayload::Glossary(vec![GlossaryEntry {
                        term: format!("{domain}-term"),
                        definition: format!("definition for {domain}/{kind}"),
                    }]))
                }
                "broken" => Err(CatalogError::Retrieval {
                    domain: domain.clone(),
                    kind,
                    reason: "malformed module".to_owned(),
                }),
                _ => Err(CatalogError::UnknownDomain {
                    domain: domain.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_sequential_gets_invoke_loader_once() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let deposits = DomainId::from("deposits");

        let first = cache
            .get(&deposits, ResourceKind::Glossary)
            .await
            .expect("first get should succeed");
        let second = cache
            .get(&deposits, ResourceKind::Glossary)
            .await
            .expect("second get should succeed");

        assert_eq!(loader.calls(), 1);
        assert!(
            Arc::ptr_eq(&first, &second),
            "Both callers must share one payload"
        );
    }

    #[tokio::test]
    async fn test_concurrent_gets_collapse_to_one_retrieval() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let customer = DomainId::from("customer");

        let (a, b) = tokio::join!(
            cache.get(&customer, ResourceKind::Metadata),
            cache.get(&customer, ResourceKind::Metadata),
        );

        let a = a.expect("first concurrent get should succeed");
        let b = b.expect("second concurrent get should succeed");
        assert_eq!(loader.calls(), 1, "Concurrent requests must collapse");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_distinct_kinds_are_distinct_slots() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let deposits = DomainId::from("deposits");

        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        cache
            .get(&deposits, ResourceKind::GoldMetrics)
            .await
            .expect("get should succeed");

        assert_eq!(loader.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_domain_is_scoped() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let deposits = DomainId::from("deposits");
        let customer = DomainId::from("customer");

        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        cache
            .get(&customer, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        assert_eq!(loader.calls(), 2);

        cache.invalidate_domain(&deposits).await;

        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        assert_eq!(loader.calls(), 3, "Invalidated key must re-retrieve");

        cache
            .get(&customer, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        assert_eq!(loader.calls(), 3, "Other domains must stay cached");
    }

    #[tokio::test]
    async fn test_full_reset_re_retrieves_every_key() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let deposits = DomainId::from("deposits");
        let customer = DomainId::from("customer");

        cache
            .get(&deposits, ResourceKind::UseCases)
            .await
            .expect("get should succeed");
        cache
            .get(&customer, ResourceKind::UseCases)
            .await
            .expect("get should succeed");
        assert_eq!(loader.calls(), 2);

        cache.invalidate().await;

        cache
            .get(&deposits, ResourceKind::UseCases)
            .await
            .expect("get should succeed");
        cache
            .get(&customer, ResourceKind::UseCases)
            .await
            .expect("get should succeed");
        assert_eq!(loader.calls(), 4);
    }

    #[tokio::test]
    async fn test_unknown_domain_failure_is_cached() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let bogus = DomainId::from("not-a-domain");

        let first = cache.get(&bogus, ResourceKind::Metadata).await;
        let second = cache.get(&bogus, ResourceKind::Metadata).await;

        assert_eq!(loader.calls(), 1, "Cached failure must not re-dispatch");
        let expected = CatalogError::UnknownDomain {
            domain: bogus.clone(),
        };
        assert_eq!(first.unwrap_err(), expected);
        assert_eq!(second.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn test_failure_is_sticky_until_invalidated() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let broken = DomainId::from("broken");

        for _ in 0..3 {
            let err = cache
                .get(&broken, ResourceKind::Sttm)
                .await
                .expect_err("broken domain must fail");
            assert!(matches!(err, CatalogError::Retrieval { .. }));
        }
        assert_eq!(loader.calls(), 1);

        cache.invalidate_domain(&broken).await;
        let _ = cache.get(&broken, ResourceKind::Sttm).await;
        assert_eq!(loader.calls(), 2, "Invalidation must allow a fresh try");
    }

    #[tokio::test]
    async fn test_stats_track_hits_misses_and_invalidations() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let deposits = DomainId::from("deposits");

        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        cache
            .get(&deposits, ResourceKind::Glossary)
            .await
            .expect("get should succeed");

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entry_count, 2);
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 0.001);

        cache.invalidate().await;
        let stats = cache.stats().await;
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.invalidations, 2);
    }

    #[test]
    fn test_hit_rate_of_idle_cache_is_zero() {
        let stats = CacheStats::default();
        assert!((stats.hit_rate() - 0.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let loader = CountingLoader::new();
        let cache = LazyCache::new(Arc::clone(&loader));
        let clone = cache.clone();
        let deposits = DomainId::from("deposits");

        cache
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        clone
            .get(&deposits, ResourceKind::Metadata)
            .await
            .expect("get should succeed");

        assert_eq!(loader.calls(), 1, "Clones must share the entry map");
    }
}
