//! Domain registry: eager summaries plus cache-backed detail lookups.
//!
//! The registry is the surface the UI talks to. Listing data is embedded
//! at construction time; every other resource is fetched through the lazy
//! cache, so the registry itself holds no mutable state.

use std::sync::Arc;

use ledgermap_cache::{CacheStats, LazyCache, ResourceLoader};
use ledgermap_core::{CatalogResult, DomainId, DomainSummary, ResourceKind, ResourcePayload};

use crate::dispatch::DomainDispatcher;

/// Catalog front door: lists domains and proxies detail requests.
pub struct DomainRegistry<L: ResourceLoader> {
    summaries: Vec<DomainSummary>,
    cache: LazyCache<L>,
}

impl DomainRegistry<DomainDispatcher> {
    /// Registry over the built-in banking domains with a fresh cache.
    pub fn builtin() -> Self {
        let dispatcher = DomainDispatcher::builtin();
        let summaries = dispatcher.summaries();
        Self::new(summaries, LazyCache::new(Arc::new(dispatcher)))
    }
}

impl<L: ResourceLoader> DomainRegistry<L> {
    /// Build a registry from pre-assembled summaries and an injected cache.
    pub fn new(summaries: Vec<DomainSummary>, cache: LazyCache<L>) -> Self {
        Self { summaries, cache }
    }

    /// All registered domain summaries, in registration order.
    pub fn domains(&self) -> &[DomainSummary] {
        &self.summaries
    }

    /// The summary for one domain, if registered.
    pub fn summary(&self, domain: &DomainId) -> Option<&DomainSummary> {
        self.summaries.iter().find(|s| &s.id == domain)
    }

    /// Fetch one resource through the cache.
    pub async fn get(
        &self,
        domain: &DomainId,
        kind: ResourceKind,
    ) -> CatalogResult<Arc<ResourcePayload>> {
        self.cache.get(domain, kind).await
    }

    /// Drop every cached resource.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }

    /// Drop the cached resources of one domain.
    pub async fn invalidate_domain(&self, domain: &DomainId) {
        self.cache.invalidate_domain(domain).await;
    }

    /// Snapshot the underlying cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_lists_three_domains() {
        let registry = DomainRegistry::builtin();
        let ids: Vec<&str> = registry.domains().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["customer", "deposits", "transactions"]);
    }

    #[tokio::test]
    async fn test_summary_lookup() {
        let registry = DomainRegistry::builtin();
        let deposits = DomainId::from("deposits");

        let summary = registry
            .summary(&deposits)
            .expect("deposits should be registered");
        assert_eq!(summary.display_name, "Deposits & Funding");
        assert!(!summary.sub_domains.is_empty());
        assert!(!summary.gold_metrics.is_empty());

        assert!(registry.summary(&DomainId::from("loans")).is_none());
    }

    #[tokio::test]
    async fn test_detail_requests_go_through_the_cache() {
        let registry = DomainRegistry::builtin();
        let customer = DomainId::from("customer");

        registry
            .get(&customer, ResourceKind::Metadata)
            .await
            .expect("get should succeed");
        registry
            .get(&customer, ResourceKind::Metadata)
            .await
            .expect("get should succeed");

        let stats = registry.cache_stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }
}
