//! Customer Core domain: identity, relationships, and segmentation.

use async_trait::async_trait;
use ledgermap_core::{
    BusinessValue, CatalogResult, ColumnDef, Complexity, DataClassification, DomainId,
    DomainMetadata, DomainSummary, GlossaryEntry, IngestionCatalog, IngestionJob, Layer, LoadType,
    LogicalEntity, LogicalModel, LogicalRelationship, MetricDef, Priority, RefreshFrequency,
    ResourceKind, ResourcePayload, SttmGap, SttmMapping, SttmReport, SubDomain, TableCoverage,
    TableDef, TableRole, UseCase,
};

use crate::source::DomainSource;

pub const DOMAIN_ID: &str = "customer";

/// Customer Core domain source.
pub struct CustomerDomain;

#[async_trait]
impl DomainSource for CustomerDomain {
    fn id(&self) -> DomainId {
        DomainId::from(DOMAIN_ID)
    }

    fn summary(&self) -> DomainSummary {
        DomainSummary {
            id: self.id(),
            display_name: "Customer Core".to_owned(),
            sub_domains: sub_domains(),
            use_cases: use_cases(),
            gold_metrics: gold_metrics(),
        }
    }

    async fn fetch(&self, kind: ResourceKind) -> CatalogResult<ResourcePayload> {
        Ok(match kind {
            ResourceKind::Metadata => ResourcePayload::Metadata(metadata()),
            ResourceKind::GoldMetrics => ResourcePayload::GoldMetrics(gold_metrics()),
            ResourceKind::SubDomains => ResourcePayload::SubDomains(sub_domains()),
            ResourceKind::UseCases => ResourcePayload::UseCases(use_cases()),
            ResourceKind::Glossary => ResourcePayload::Glossary(glossary()),
            ResourceKind::Sttm => ResourcePayload::Sttm(sttm()),
            ResourceKind::BronzeTables => ResourcePayload::BronzeTables(bronze_tables()),
            ResourceKind::SilverTables => ResourcePayload::SilverTables(silver_tables()),
            ResourceKind::GoldTables => {
                // Gold set is dimensions followed by facts.
                let mut tables = gold_dimensions();
                tables.extend(gold_facts());
                ResourcePayload::GoldTables(tables)
            }
            ResourceKind::BronzeIngestionJobs => {
                ResourcePayload::BronzeIngestionJobs(ingestion_jobs())
            }
            ResourceKind::LogicalModel => ResourcePayload::LogicalModel(Some(logical_model())),
        })
    }
}

fn col(name: &str, data_type: &str, nullable: bool, pii: bool, description: &str) -> ColumnDef {
    ColumnDef {
        name: name.to_owned(),
        data_type: data_type.to_owned(),
        nullable,
        pii,
        description: description.to_owned(),
    }
}

pub fn metadata() -> DomainMetadata {
    DomainMetadata {
        id: DomainId::from(DOMAIN_ID),
        name: "Customer Core".to_owned(),
        display_name: "Customer Core Domain".to_owned(),
        description: "Single view of the customer across retail and commercial lines: \
                      identity, demographics, relationships, households, and segmentation"
            .to_owned(),
        priority: Priority::P0,
        complexity: Complexity::High,
        business_value: BusinessValue::Critical,
        key_entities: vec![
            "Customer".to_owned(),
            "Household".to_owned(),
            "Relationship".to_owned(),
            "Address".to_owned(),
            "Segment".to_owned(),
        ],
        source_system: "FIS".to_owned(),
        grain: "One row per customer".to_owned(),
        refresh_schedule: "Daily at 6:00 AM UTC".to_owned(),
        refresh_frequency: RefreshFrequency::Daily,
        data_classification: DataClassification::Confidential,
        pii_fields: vec![
            "full_name".to_owned(),
            "tax_id".to_owned(),
            "date_of_birth".to_owned(),
            "email".to_owned(),
        ],
    }
}

pub fn gold_metrics() -> Vec<MetricDef> {
    vec![
        MetricDef {
            name: "active_customer_count".to_owned(),
            description: "Customers with at least one open account".to_owned(),
            sql: "SELECT COUNT(DISTINCT customer_key) FROM fact_customer_daily \
                  WHERE snapshot_date = CURRENT_DATE AND open_account_count > 0"
                .to_owned(),
            unit: Some("customers".to_owned()),
        },
        MetricDef {
            name: "avg_products_per_customer".to_owned(),
            description: "Average open products held per active customer".to_owned(),
            sql: "SELECT AVG(open_account_count) FROM fact_customer_daily \
                  WHERE snapshot_date = CURRENT_DATE AND open_account_count > 0"
                .to_owned(),
            unit: None,
        },
        MetricDef {
            name: "customer_attrition_rate".to_owned(),
            description: "Share of customers closing their last account in the trailing 90 days"
                .to_owned(),
            sql: "SELECT COUNT(*) FILTER (WHERE churned) * 1.0 / COUNT(*) \
                  FROM gold_customer_attrition_90d"
                .to_owned(),
            unit: Some("%".to_owned()),
        },
    ]
}

pub fn sub_domains() -> Vec<SubDomain> {
    vec![
        SubDomain {
            id: "customer-identity".to_owned(),
            name: "Identity".to_owned(),
            description: "Legal identity, KYC attributes, and identifiers".to_owned(),
        },
        SubDomain {
            id: "customer-relationships".to_owned(),
            name: "Relationships".to_owned(),
            description: "Households, joint ownership, and customer-to-customer links".to_owned(),
        },
        SubDomain {
            id: "customer-segments".to_owned(),
            name: "Segmentation".to_owned(),
            description: "Behavioral and value-based segments for targeting".to_owned(),
        },
    ]
}

pub fn use_cases() -> Vec<UseCase> {
    vec![
        UseCase {
            id: "single-customer-view".to_owned(),
            name: "Single Customer View".to_owned(),
            description: "One consolidated profile per customer for branch and digital channels"
                .to_owned(),
        },
        UseCase {
            id: "churn-early-warning".to_owned(),
            name: "Churn Early Warning".to_owned(),
            description: "Flag customers whose engagement signals predict attrition".to_owned(),
        },
        UseCase {
            id: "kyc-refresh-prioritization".to_owned(),
            name: "KYC Refresh Prioritization".to_owned(),
            description: "Rank periodic KYC reviews by risk and staleness".to_owned(),
        },
    ]
}

pub fn glossary() -> Vec<GlossaryEntry> {
    vec![
        GlossaryEntry {
            term: "Household".to_owned(),
            definition: "Group of customers sharing an address and financial relationship"
                .to_owned(),
        },
        GlossaryEntry {
            term: "Primary Customer".to_owned(),
            definition: "The customer designated as main owner of a joint account".to_owned(),
        },
        GlossaryEntry {
            term: "KYC".to_owned(),
            definition: "Know Your Customer: identity verification required by regulation"
                .to_owned(),
        },
    ]
}

pub fn sttm() -> SttmReport {
    SttmReport {
        mappings: vec![
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "CIS_CUST_MASTER.CUST_NBR".to_owned(),
                target_table: "silver_customer".to_owned(),
                target_column: "customer_id".to_owned(),
            },
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "CIS_CUST_MASTER.CUST_NAME".to_owned(),
                target_table: "silver_customer".to_owned(),
                target_column: "full_name".to_owned(),
            },
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "CIS_ADDR.ADDR_LINE_1".to_owned(),
                target_table: "silver_customer_address".to_owned(),
                target_column: "address_line_1".to_owned(),
            },
        ],
        gaps: vec![SttmGap {
            source_column: "CIS_CUST_MASTER.LEGACY_BRANCH_CD".to_owned(),
            note: "Branch hierarchy not yet modeled in silver".to_owned(),
        }],
        table_coverage: vec![
            TableCoverage {
                name: "CIS_CUST_MASTER".to_owned(),
                coverage_pct: 92,
            },
            TableCoverage {
                name: "CIS_ADDR".to_owned(),
                coverage_pct: 85,
            },
        ],
    }
}

pub fn bronze_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: "bronze_cis_cust_master".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw daily extract of the FIS customer master".to_owned(),
            grain: Some("One row per customer per extract".to_owned()),
            source_table: Some("CIS_CUST_MASTER".to_owned()),
            columns: vec![
                col("CUST_NBR", "VARCHAR(20)", false, false, "Source customer number"),
                col("CUST_NAME", "VARCHAR(120)", true, true, "Customer legal name"),
                col("TAX_ID", "VARCHAR(16)", true, true, "Tax identifier"),
                col("OPEN_DT", "DATE", true, false, "Relationship open date"),
            ],
        },
        TableDef {
            name: "bronze_cis_addr".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw daily extract of customer addresses".to_owned(),
            grain: Some("One row per customer address per extract".to_owned()),
            source_table: Some("CIS_ADDR".to_owned()),
            columns: vec![
                col("CUST_NBR", "VARCHAR(20)", false, false, "Source customer number"),
                col("ADDR_LINE_1", "VARCHAR(80)", true, true, "Street address"),
                col("CITY", "VARCHAR(40)", true, false, "City"),
                col("POSTAL_CD", "VARCHAR(10)", true, false, "Postal code"),
            ],
        },
    ]
}

pub fn silver_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: "silver_customer".to_owned(),
            layer: Layer::Silver,
            role: None,
            description: "Conformed customer profile with survivorship applied".to_owned(),
            grain: Some("One row per customer".to_owned()),
            source_table: Some("bronze_cis_cust_master".to_owned()),
            columns: vec![
                col("customer_id", "BIGINT", false, false, "Surrogate customer id"),
                col("full_name", "VARCHAR(120)", false, true, "Resolved legal name"),
                col("tax_id", "VARCHAR(16)", true, true, "Tax identifier"),
                col("customer_since", "DATE", true, false, "Earliest relationship date"),
                col("segment_code", "VARCHAR(8)", true, false, "Assigned segment"),
            ],
        },
        TableDef {
            name: "silver_customer_address".to_owned(),
            layer: Layer::Silver,
            role: None,
            description: "Standardized, geocoded customer addresses".to_owned(),
            grain: Some("One row per customer per address role".to_owned()),
            source_table: Some("bronze_cis_addr".to_owned()),
            columns: vec![
                col("customer_id", "BIGINT", false, false, "Surrogate customer id"),
                col("address_line_1", "VARCHAR(80)", false, true, "Street address"),
                col("city", "VARCHAR(40)", false, false, "City"),
                col("postal_code", "VARCHAR(10)", true, false, "Postal code"),
            ],
        },
    ]
}

pub fn gold_dimensions() -> Vec<TableDef> {
    vec![TableDef {
        name: "dim_customer".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Dimension),
        description: "Slowly changing customer dimension (type 2)".to_owned(),
        grain: Some("One row per customer per attribute version".to_owned()),
        source_table: Some("silver_customer".to_owned()),
        columns: vec![
            col("customer_key", "BIGINT", false, false, "Surrogate key"),
            col("customer_id", "BIGINT", false, false, "Natural key"),
            col("segment_code", "VARCHAR(8)", true, false, "Segment at version"),
            col("valid_from", "DATE", false, false, "Version start"),
            col("valid_to", "DATE", true, false, "Version end, open when null"),
        ],
    }]
}

pub fn gold_facts() -> Vec<TableDef> {
    vec![TableDef {
        name: "fact_customer_daily".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Fact),
        description: "Daily customer activity and holdings snapshot".to_owned(),
        grain: Some("One row per customer per day".to_owned()),
        source_table: None,
        columns: vec![
            col("customer_key", "BIGINT", false, false, "Customer dimension key"),
            col("snapshot_date", "DATE", false, false, "Snapshot date"),
            col("open_account_count", "INT", false, false, "Open accounts held"),
            col("digital_login_count_30d", "INT", false, false, "Trailing 30-day logins"),
        ],
    }]
}

pub fn ingestion_jobs() -> IngestionCatalog {
    IngestionCatalog {
        domain: DomainId::from(DOMAIN_ID),
        layer: Layer::Bronze,
        jobs: vec![
            IngestionJob {
                name: "cis_cust_master_daily".to_owned(),
                source: "FIS CIS extract".to_owned(),
                target_table: "bronze_cis_cust_master".to_owned(),
                schedule: "Daily 04:30 UTC".to_owned(),
                load_type: LoadType::Full,
            },
            IngestionJob {
                name: "cis_addr_daily".to_owned(),
                source: "FIS CIS extract".to_owned(),
                target_table: "bronze_cis_addr".to_owned(),
                schedule: "Daily 04:45 UTC".to_owned(),
                load_type: LoadType::Incremental,
            },
        ],
    }
}

pub fn logical_model() -> LogicalModel {
    LogicalModel {
        entities: vec![
            LogicalEntity {
                name: "Customer".to_owned(),
                description: "A person or organization holding a relationship with the bank"
                    .to_owned(),
                attributes: vec![
                    "customer_id".to_owned(),
                    "full_name".to_owned(),
                    "customer_since".to_owned(),
                ],
            },
            LogicalEntity {
                name: "Address".to_owned(),
                description: "A postal address attached to a customer".to_owned(),
                attributes: vec!["address_line_1".to_owned(), "city".to_owned()],
            },
            LogicalEntity {
                name: "Household".to_owned(),
                description: "A group of related customers".to_owned(),
                attributes: vec!["household_id".to_owned()],
            },
        ],
        relationships: vec![
            LogicalRelationship {
                from: "Customer".to_owned(),
                to: "Address".to_owned(),
                cardinality: "1:N".to_owned(),
            },
            LogicalRelationship {
                from: "Household".to_owned(),
                to: "Customer".to_owned(),
                cardinality: "1:N".to_owned(),
            },
        ],
    }
}
