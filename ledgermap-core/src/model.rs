//! Typed payload model for domain resources.
//!
//! These are the shapes the browser UI renders. The caching layer treats
//! every payload as opaque; only the dispatch layer and the domain modules
//! construct them.

use serde::{Deserialize, Serialize};

use crate::{DomainId, ResourceKind};

// ============================================================================
// CLASSIFICATION ENUMS
// ============================================================================

/// Delivery priority of a domain on the platform roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

/// Implementation complexity of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// Business value classification of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessValue {
    Critical,
    High,
    Medium,
    Low,
}

/// How often a domain's warehouse layers are refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefreshFrequency {
    #[serde(rename = "Real-time")]
    RealTime,
    Hourly,
    Daily,
    Weekly,
}

/// Data classification tier for access governance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

/// Medallion layer a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Bronze,
    Silver,
    Gold,
}

/// Modeling role of a warehouse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableRole {
    Dimension,
    Fact,
    Snapshot,
    Reference,
}

/// Load strategy of an ingestion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadType {
    Full,
    Incremental,
    Cdc,
}

// ============================================================================
// DOMAIN METADATA
// ============================================================================

/// Descriptive metadata for one banking domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    pub id: DomainId,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub priority: Priority,
    pub complexity: Complexity,
    pub business_value: BusinessValue,
    /// Principal entities modeled by the domain.
    pub key_entities: Vec<String>,
    /// System of record feeding the bronze layer.
    pub source_system: String,
    /// Grain of the domain's primary fact or snapshot.
    pub grain: String,
    pub refresh_schedule: String,
    pub refresh_frequency: RefreshFrequency,
    pub data_classification: DataClassification,
    /// Columns requiring masking or restricted access.
    pub pii_fields: Vec<String>,
}

/// A gold-layer business metric with its defining SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDef {
    pub name: String,
    pub description: String,
    pub sql: String,
    pub unit: Option<String>,
}

/// A bounded sub-area within a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDomain {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A business use case served by a domain's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A business glossary term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

// ============================================================================
// WAREHOUSE TABLES
// ============================================================================

/// One column of a warehouse table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    /// Marked when the column carries personally identifiable data.
    pub pii: bool,
    pub description: String,
}

/// A bronze, silver, or gold table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub layer: Layer,
    pub role: Option<TableRole>,
    pub description: String,
    pub grain: Option<String>,
    /// Source-system table this one is derived from, where applicable.
    pub source_table: Option<String>,
    pub columns: Vec<ColumnDef>,
}

// ============================================================================
// SOURCE-TO-TARGET MAPPING
// ============================================================================

/// One source-column-to-silver-column mapping row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttmMapping {
    pub source_system: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
}

/// A known unmapped source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttmGap {
    pub source_column: String,
    pub note: String,
}

/// Mapping coverage for one source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCoverage {
    pub name: String,
    pub coverage_pct: u8,
}

/// Combined source-to-target mapping report for a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SttmReport {
    pub mappings: Vec<SttmMapping>,
    pub gaps: Vec<SttmGap>,
    pub table_coverage: Vec<TableCoverage>,
}

// ============================================================================
// INGESTION
// ============================================================================

/// One scheduled ingestion job feeding a warehouse layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionJob {
    pub name: String,
    pub source: String,
    pub target_table: String,
    pub schedule: String,
    pub load_type: LoadType,
}

/// The ingestion jobs of one domain at one layer.
///
/// A domain with no jobs yet publishes an empty catalog rather than
/// failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionCatalog {
    pub domain: DomainId,
    pub layer: Layer,
    pub jobs: Vec<IngestionJob>,
}

impl IngestionCatalog {
    /// An empty bronze-layer catalog for a domain with no jobs defined.
    pub fn empty(domain: DomainId) -> Self {
        Self {
            domain,
            layer: Layer::Bronze,
            jobs: Vec::new(),
        }
    }
}

// ============================================================================
// LOGICAL MODEL
// ============================================================================

/// An entity in a domain's logical model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalEntity {
    pub name: String,
    pub description: String,
    pub attributes: Vec<String>,
}

/// A relationship between two logical entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalRelationship {
    pub from: String,
    pub to: String,
    pub cardinality: String,
}

/// Entity-relationship view of a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalModel {
    pub entities: Vec<LogicalEntity>,
    pub relationships: Vec<LogicalRelationship>,
}

// ============================================================================
// PAYLOAD UNION AND SUMMARIES
// ============================================================================

/// The payload delivered for one `(domain, resource kind)` request.
///
/// Serializes with a `kind` tag matching [`ResourceKind::as_str`] so the
/// UI can discriminate payloads without out-of-band context. Not every
/// domain has every payload populated: a domain without a logical model
/// delivers `LogicalModel(None)` as a successful outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "kebab-case")]
pub enum ResourcePayload {
    Metadata(DomainMetadata),
    GoldMetrics(Vec<MetricDef>),
    SubDomains(Vec<SubDomain>),
    UseCases(Vec<UseCase>),
    Glossary(Vec<GlossaryEntry>),
    Sttm(SttmReport),
    BronzeTables(Vec<TableDef>),
    SilverTables(Vec<TableDef>),
    GoldTables(Vec<TableDef>),
    BronzeIngestionJobs(IngestionCatalog),
    LogicalModel(Option<LogicalModel>),
}

impl ResourcePayload {
    /// The resource kind this payload answers.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePayload::Metadata(_) => ResourceKind::Metadata,
            ResourcePayload::GoldMetrics(_) => ResourceKind::GoldMetrics,
            ResourcePayload::SubDomains(_) => ResourceKind::SubDomains,
            ResourcePayload::UseCases(_) => ResourceKind::UseCases,
            ResourcePayload::Glossary(_) => ResourceKind::Glossary,
            ResourcePayload::Sttm(_) => ResourceKind::Sttm,
            ResourcePayload::BronzeTables(_) => ResourceKind::BronzeTables,
            ResourcePayload::SilverTables(_) => ResourceKind::SilverTables,
            ResourcePayload::GoldTables(_) => ResourceKind::GoldTables,
            ResourcePayload::BronzeIngestionJobs(_) => ResourceKind::BronzeIngestionJobs,
            ResourcePayload::LogicalModel(_) => ResourceKind::LogicalModel,
        }
    }
}

/// Eagerly available listing data for one domain.
///
/// Everything here is cheap enough to embed at startup; all other detail
/// is loaded on demand through the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSummary {
    pub id: DomainId,
    pub display_name: String,
    pub sub_domains: Vec<SubDomain>,
    pub use_cases: Vec<UseCase>,
    pub gold_metrics: Vec<MetricDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_mapping() {
        let payload = ResourcePayload::Glossary(vec![GlossaryEntry {
            term: "Ledger".to_owned(),
            definition: "Book of record for account balances".to_owned(),
        }]);
        assert_eq!(payload.kind(), ResourceKind::Glossary);

        let payload = ResourcePayload::LogicalModel(None);
        assert_eq!(payload.kind(), ResourceKind::LogicalModel);
    }

    #[test]
    fn test_payload_serializes_with_kind_tag() {
        let payload = ResourcePayload::GoldMetrics(vec![MetricDef {
            name: "total_deposit_balance".to_owned(),
            description: "Sum of end-of-day balances".to_owned(),
            sql: "SELECT SUM(eod_balance) FROM fact_deposit_balance_daily".to_owned(),
            unit: Some("USD".to_owned()),
        }]);

        let value = serde_json::to_value(&payload).expect("serialize should succeed");
        assert_eq!(value["kind"], payload.kind().as_str());
        assert_eq!(value["data"][0]["name"], "total_deposit_balance");
    }

    #[test]
    fn test_payload_tag_matches_kind_str_for_all_variants() {
        let payloads = [
            ResourcePayload::SubDomains(Vec::new()),
            ResourcePayload::UseCases(Vec::new()),
            ResourcePayload::BronzeTables(Vec::new()),
            ResourcePayload::SilverTables(Vec::new()),
            ResourcePayload::GoldTables(Vec::new()),
            ResourcePayload::BronzeIngestionJobs(IngestionCatalog::empty(DomainId::from(
                "transactions",
            ))),
            ResourcePayload::LogicalModel(None),
        ];
        for payload in payloads {
            let value = serde_json::to_value(&payload).expect("serialize should succeed");
            assert_eq!(
                value["kind"],
                payload.kind().as_str(),
                "Tag mismatch for {}",
                payload.kind()
            );
        }
    }

    #[test]
    fn test_empty_ingestion_catalog() {
        let catalog = IngestionCatalog::empty(DomainId::from("transactions"));
        assert_eq!(catalog.layer, Layer::Bronze);
        assert!(catalog.jobs.is_empty());
    }

    #[test]
    fn test_complexity_serde_rename() {
        let value = serde_json::to_value(Complexity::VeryHigh).expect("serialize should succeed");
        assert_eq!(value, "Very High");
        let value = serde_json::to_value(RefreshFrequency::RealTime).expect("serialize");
        assert_eq!(value, "Real-time");
    }
}
