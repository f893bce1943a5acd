//! LEDGERMAP Core - Catalog Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains the identity types for domains and their resources,
//! the typed payload model consumed by the browser UI, and the catalog
//! error taxonomy.

mod domain;
mod error;
mod model;

pub use domain::{CacheKey, DomainId, ParseResourceKindError, ResourceKind};
pub use error::{CatalogError, CatalogResult};
pub use model::{
    BusinessValue, ColumnDef, Complexity, DataClassification, DomainMetadata, DomainSummary,
    GlossaryEntry, IngestionCatalog, IngestionJob, Layer, LoadType, LogicalEntity, LogicalModel,
    LogicalRelationship, MetricDef, Priority, RefreshFrequency, ResourcePayload, SttmGap,
    SttmMapping, SttmReport, SubDomain, TableCoverage, TableDef, TableRole, UseCase,
};
