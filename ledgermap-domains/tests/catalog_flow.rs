//! End-to-end flow through the registry, cache, and built-in domains.

use ledgermap_core::{CatalogError, DomainId, ResourceKind, ResourcePayload};
use ledgermap_domains::DomainRegistry;

#[tokio::test]
async fn listing_then_drilling_into_a_domain() {
    let registry = DomainRegistry::builtin();

    // Listing is synchronous and touches no cache entries.
    let listed: Vec<&str> = registry.domains().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(listed, ["customer", "deposits", "transactions"]);
    assert_eq!(registry.cache_stats().await.entry_count, 0);

    // Drill into deposits the way the UI does: metadata first, then tables.
    let deposits = DomainId::from("deposits");
    let metadata = registry
        .get(&deposits, ResourceKind::Metadata)
        .await
        .expect("metadata should load");
    let ResourcePayload::Metadata(metadata) = metadata.as_ref() else {
        panic!("wrong payload variant");
    };
    assert_eq!(metadata.display_name, "Deposits & Funding Domain");

    registry
        .get(&deposits, ResourceKind::GoldTables)
        .await
        .expect("gold tables should load");

    let stats = registry.cache_stats().await;
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entry_count, 2);
}

#[tokio::test]
async fn repeated_reads_hit_the_cache_until_invalidated() {
    let registry = DomainRegistry::builtin();
    let customer = DomainId::from("customer");
    let deposits = DomainId::from("deposits");

    let first = registry
        .get(&customer, ResourceKind::Glossary)
        .await
        .expect("glossary should load");
    let second = registry
        .get(&customer, ResourceKind::Glossary)
        .await
        .expect("glossary should load");
    assert!(
        std::sync::Arc::ptr_eq(&first, &second),
        "Repeated reads must share one payload"
    );

    registry
        .get(&deposits, ResourceKind::Glossary)
        .await
        .expect("glossary should load");

    // Scoped invalidation: customer re-retrieves, deposits stays warm.
    registry.invalidate_domain(&customer).await;
    let stats_before = registry.cache_stats().await;
    assert_eq!(stats_before.entry_count, 1);

    registry
        .get(&customer, ResourceKind::Glossary)
        .await
        .expect("glossary should reload");
    registry
        .get(&deposits, ResourceKind::Glossary)
        .await
        .expect("glossary should still be cached");

    let stats = registry.cache_stats().await;
    assert_eq!(stats.misses, 3, "Only the invalidated key reloads");
}

#[tokio::test]
async fn unknown_domain_failure_is_cached_and_serializable_payloads_are_tagged() {
    let registry = DomainRegistry::builtin();
    let bogus = DomainId::from("not-a-domain");

    let err = registry
        .get(&bogus, ResourceKind::Metadata)
        .await
        .expect_err("unknown domain must fail");
    assert_eq!(
        err,
        CatalogError::UnknownDomain {
            domain: bogus.clone()
        }
    );

    // The failure occupies a slot like any other outcome.
    let before = registry.cache_stats().await;
    let _ = registry.get(&bogus, ResourceKind::Metadata).await;
    let after = registry.cache_stats().await;
    assert_eq!(after.misses, before.misses, "Cached failure must not re-dispatch");
    assert_eq!(after.hits, before.hits + 1);

    // Successful payloads carry the kind tag the UI discriminates on.
    let transactions = DomainId::from("transactions");
    let payload = registry
        .get(&transactions, ResourceKind::BronzeIngestionJobs)
        .await
        .expect("ingestion jobs should load");
    let value = serde_json::to_value(payload.as_ref()).expect("serialize should succeed");
    assert_eq!(value["kind"], "bronze-ingestion-jobs");
    assert_eq!(value["data"]["jobs"], serde_json::json!([]));
}

#[tokio::test]
async fn full_reset_drops_every_domain() {
    let registry = DomainRegistry::builtin();

    for id in ["customer", "deposits", "transactions"] {
        registry
            .get(&DomainId::from(id), ResourceKind::UseCases)
            .await
            .expect("use cases should load");
    }
    assert_eq!(registry.cache_stats().await.entry_count, 3);

    registry.invalidate().await;
    let stats = registry.cache_stats().await;
    assert_eq!(stats.entry_count, 0);
    assert_eq!(stats.invalidations, 3);

    registry
        .get(&DomainId::from("customer"), ResourceKind::UseCases)
        .await
        .expect("use cases should reload");
    assert_eq!(registry.cache_stats().await.misses, 4);
}
