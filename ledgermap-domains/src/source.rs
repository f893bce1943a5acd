//! Domain source trait: one bounded unit of banking metadata.

use async_trait::async_trait;
use ledgermap_core::{CatalogResult, DomainId, DomainSummary, ResourceKind, ResourcePayload};

/// A domain and its retrieval routines, one per supported resource kind.
///
/// Sources are registered with the dispatcher at startup and never change
/// afterwards. Retrieval is called at most once per kind between
/// invalidations of the corresponding cache entry, so implementations may
/// do work that would be wasteful to repeat (parsing embedded catalogs,
/// assembling combined reports) without memoizing anything themselves.
#[async_trait]
pub trait DomainSource: Send + Sync {
    /// Stable identifier for this domain.
    fn id(&self) -> DomainId;

    /// Eagerly available listing data for this domain.
    fn summary(&self) -> DomainSummary;

    /// The resource kinds this domain can answer. Defaults to every kind.
    fn supported_kinds(&self) -> &'static [ResourceKind] {
        &ResourceKind::ALL
    }

    /// Retrieve the payload for one resource kind.
    ///
    /// A kind with no content yet still succeeds with an empty or absent
    /// payload; failure is reserved for routines that could not produce
    /// valid data at all.
    async fn fetch(&self, kind: ResourceKind) -> CatalogResult<ResourcePayload>;
}
