//! Error types for catalog operations

use crate::{DomainId, ResourceKind};
use thiserror::Error;

/// Failures surfaced by resource dispatch and retrieval.
///
/// All three variants travel through the cache uniformly: a failed
/// retrieval is stored like a successful one and handed back unchanged to
/// every caller until the entry is explicitly invalidated. Nothing here is
/// fatal to the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown domain: {domain}")]
    UnknownDomain { domain: DomainId },

    #[error("Domain {domain} does not provide {kind}")]
    UnsupportedResource { domain: DomainId, kind: ResourceKind },

    #[error("Retrieval failed for {domain}/{kind}: {reason}")]
    Retrieval {
        domain: DomainId,
        kind: ResourceKind,
        reason: String,
    },
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
