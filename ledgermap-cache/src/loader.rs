//! Resource loader seam between the cache and domain dispatch.

use async_trait::async_trait;
use ledgermap_core::{CatalogResult, DomainId, ResourceKind, ResourcePayload};

/// Resolves one `(domain, kind)` request to its payload.
///
/// Implementations own the routing decision — which domain module answers
/// the request — and perform no caching of their own; reuse is entirely
/// the cache's concern. The cache calls a loader at most once per key
/// until that key is invalidated, so retrieval routines behind this trait
/// only need to be safe for a single invocation per process lifetime.
///
/// Unknown domains and unsupported resource kinds are reported as failed
/// outcomes, not panics; the loader never recovers from them locally.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Retrieve the payload of `kind` for `domain`.
    async fn resolve(
        &self,
        domain: &DomainId,
        kind: ResourceKind,
    ) -> CatalogResult<ResourcePayload>;
}
