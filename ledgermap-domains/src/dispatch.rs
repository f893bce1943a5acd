//! Resource loader dispatch over the registered domain sources.
//!
//! Pure routing: the dispatcher maps a `(domain, kind)` pair to the
//! domain's retrieval routine and passes the outcome through unchanged.
//! It holds no mutable state and performs no caching, so it is safe to
//! share and call concurrently without coordination.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use ledgermap_cache::ResourceLoader;
use ledgermap_core::{
    CatalogError, CatalogResult, DomainId, DomainSummary, ResourceKind, ResourcePayload,
};

use crate::source::DomainSource;
use crate::{CustomerDomain, DepositsDomain, TransactionsDomain};

/// Routes resource requests to the registered domain sources.
///
/// The registration table is built once at startup and is immutable
/// afterwards; unknown domains and unsupported kinds surface as failed
/// outcomes rather than panics.
pub struct DomainDispatcher {
    order: Vec<DomainId>,
    sources: HashMap<DomainId, Arc<dyn DomainSource>>,
}

impl DomainDispatcher {
    /// Build a dispatcher over the given sources.
    ///
    /// Registration order is preserved for listing. Registering two
    /// sources with the same id keeps the later one.
    pub fn new(sources: impl IntoIterator<Item = Arc<dyn DomainSource>>) -> Self {
        let mut order = Vec::new();
        let mut table: HashMap<DomainId, Arc<dyn DomainSource>> = HashMap::new();
        for source in sources {
            let id = source.id();
            if table.insert(id.clone(), source).is_none() {
                order.push(id);
            }
        }
        Self {
            order,
            sources: table,
        }
    }

    /// Dispatcher over the built-in banking domains.
    pub fn builtin() -> Self {
        Self::new([
            Arc::new(CustomerDomain) as Arc<dyn DomainSource>,
            Arc::new(DepositsDomain),
            Arc::new(TransactionsDomain),
        ])
    }

    /// Ids of the registered domains, in registration order.
    pub fn domain_ids(&self) -> &[DomainId] {
        &self.order
    }

    /// Eager summaries of the registered domains, in registration order.
    pub fn summaries(&self) -> Vec<DomainSummary> {
        self.order
            .iter()
            .filter_map(|id| self.sources.get(id))
            .map(|source| source.summary())
            .collect()
    }
}

#[async_trait]
impl ResourceLoader for DomainDispatcher {
    async fn resolve(
        &self,
        domain: &DomainId,
        kind: ResourceKind,
    ) -> CatalogResult<ResourcePayload> {
        let Some(source) = self.sources.get(domain) else {
            tracing::debug!(domain = %domain, "request for unregistered domain");
            return Err(CatalogError::UnknownDomain {
                domain: domain.clone(),
            });
        };
        if !source.supported_kinds().contains(&kind) {
            tracing::debug!(domain = %domain, kind = %kind, "unsupported resource kind");
            return Err(CatalogError::UnsupportedResource {
                domain: domain.clone(),
                kind,
            });
        }
        source.fetch(kind).await
    }
}
