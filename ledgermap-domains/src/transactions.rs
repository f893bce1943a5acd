//! Transactions domain: payment and card movement across all channels.

use async_trait::async_trait;
use ledgermap_core::{
    BusinessValue, CatalogResult, ColumnDef, Complexity, DataClassification, DomainId,
    DomainMetadata, DomainSummary, GlossaryEntry, IngestionCatalog, Layer, MetricDef, Priority,
    RefreshFrequency, ResourceKind, ResourcePayload, SttmGap, SttmMapping, SttmReport, SubDomain,
    TableCoverage, TableDef, TableRole, UseCase,
};

use crate::source::DomainSource;

pub const DOMAIN_ID: &str = "transactions";

/// Transactions domain source.
pub struct TransactionsDomain;

#[async_trait]
impl DomainSource for TransactionsDomain {
    fn id(&self) -> DomainId {
        DomainId::from(DOMAIN_ID)
    }

    fn summary(&self) -> DomainSummary {
        DomainSummary {
            id: self.id(),
            display_name: "Transactions".to_owned(),
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
                let mut tables = gold_dimensions();
                tables.extend(gold_facts());
                ResourcePayload::GoldTables(tables)
            }
            // Streaming ingestion is still being migrated; no batch jobs
            // are cataloged yet, and that is not a failure.
            ResourceKind::BronzeIngestionJobs => ResourcePayload::BronzeIngestionJobs(
                IngestionCatalog::empty(DomainId::from(DOMAIN_ID)),
            ),
            ResourceKind::LogicalModel => ResourcePayload::LogicalModel(None),
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
        name: "Transactions".to_owned(),
        display_name: "Transactions Domain".to_owned(),
        description: "Monetary movement across ACH, wire, card, and teller channels, \
                      normalized to a single transaction spine for analytics and \
                      fraud monitoring"
            .to_owned(),
        priority: Priority::P0,
        complexity: Complexity::VeryHigh,
        business_value: BusinessValue::Critical,
        key_entities: vec![
            "Transaction".to_owned(),
            "Channel".to_owned(),
            "Counterparty".to_owned(),
            "Merchant".to_owned(),
        ],
        source_system: "FIS / Card networks".to_owned(),
        grain: "One row per transaction".to_owned(),
        refresh_schedule: "Hourly, top of hour".to_owned(),
        refresh_frequency: RefreshFrequency::Hourly,
        data_classification: DataClassification::Restricted,
        pii_fields: vec!["counterparty_name".to_owned(), "card_number_masked".to_owned()],
    }
}

pub fn gold_metrics() -> Vec<MetricDef> {
    vec![
        MetricDef {
            name: "daily_transaction_volume".to_owned(),
            description: "Count of settled transactions per day".to_owned(),
            sql: "SELECT COUNT(*) FROM fact_transaction \
                  WHERE settled_date = CURRENT_DATE - 1"
                .to_owned(),
            unit: Some("transactions".to_owned()),
        },
        MetricDef {
            name: "digital_channel_share".to_owned(),
            description: "Share of transaction count initiated on digital channels".to_owned(),
            sql: "SELECT COUNT(*) FILTER (WHERE c.is_digital) * 1.0 / COUNT(*) \
                  FROM fact_transaction f \
                  JOIN dim_channel c ON c.channel_key = f.channel_key \
                  WHERE f.settled_date >= CURRENT_DATE - 30"
                .to_owned(),
            unit: Some("%".to_owned()),
        },
        MetricDef {
            name: "fraud_flag_rate".to_owned(),
            description: "Share of transactions flagged by fraud screening".to_owned(),
            sql: "SELECT COUNT(*) FILTER (WHERE fraud_flag) * 10000.0 / COUNT(*) \
                  FROM fact_transaction \
                  WHERE settled_date >= CURRENT_DATE - 7"
                .to_owned(),
            unit: Some("bps".to_owned()),
        },
    ]
}

pub fn sub_domains() -> Vec<SubDomain> {
    vec![
        SubDomain {
            id: "transactions-payments".to_owned(),
            name: "Payments".to_owned(),
            description: "ACH, wire, and real-time payment movement".to_owned(),
        },
        SubDomain {
            id: "transactions-cards".to_owned(),
            name: "Cards".to_owned(),
            description: "Debit and credit card authorizations and settlements".to_owned(),
        },
        SubDomain {
            id: "transactions-fraud".to_owned(),
            name: "Fraud Signals".to_owned(),
            description: "Screening outcomes and dispute lifecycle".to_owned(),
        },
    ]
}

pub fn use_cases() -> Vec<UseCase> {
    vec![
        UseCase {
            id: "channel-migration".to_owned(),
            name: "Channel Migration".to_owned(),
            description: "Track movement of volume from branch to digital channels".to_owned(),
        },
        UseCase {
            id: "fraud-monitoring".to_owned(),
            name: "Fraud Monitoring".to_owned(),
            description: "Daily review of flagged transactions and false-positive rates"
                .to_owned(),
        },
        UseCase {
            id: "interchange-revenue".to_owned(),
            name: "Interchange Revenue".to_owned(),
            description: "Attribute card interchange to products and segments".to_owned(),
        },
    ]
}

pub fn glossary() -> Vec<GlossaryEntry> {
    vec![
        GlossaryEntry {
            term: "Settlement".to_owned(),
            definition: "Final movement of funds completing a transaction".to_owned(),
        },
        GlossaryEntry {
            term: "Interchange".to_owned(),
            definition: "Fee paid between banks for card transaction processing".to_owned(),
        },
        GlossaryEntry {
            term: "Transaction Spine".to_owned(),
            definition: "The unified, channel-agnostic transaction record".to_owned(),
        },
    ]
}

pub fn sttm() -> SttmReport {
    SttmReport {
        mappings: vec![
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "TXN_HIST.TXN_ID".to_owned(),
                target_table: "silver_transaction".to_owned(),
                target_column: "transaction_id".to_owned(),
            },
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "TXN_HIST.TXN_AMT".to_owned(),
                target_table: "silver_transaction".to_owned(),
                target_column: "amount".to_owned(),
            },
            SttmMapping {
                source_system: "Card network".to_owned(),
                source_column: "CARD_SETTLE.MERCHANT_NAME".to_owned(),
                target_table: "silver_transaction".to_owned(),
                target_column: "counterparty_name".to_owned(),
            },
        ],
        gaps: vec![
            SttmGap {
                source_column: "TXN_HIST.TELLER_ID".to_owned(),
                note: "Teller dimension pending HR feed approval".to_owned(),
            },
            SttmGap {
                source_column: "CARD_SETTLE.MCC_CD".to_owned(),
                note: "Merchant category reference table incomplete".to_owned(),
            },
        ],
        table_coverage: vec![
            TableCoverage {
                name: "TXN_HIST".to_owned(),
                coverage_pct: 81,
            },
            TableCoverage {
                name: "CARD_SETTLE".to_owned(),
                coverage_pct: 66,
            },
        ],
    }
}

pub fn bronze_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: "bronze_txn_hist".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw hourly extract of core transaction history".to_owned(),
            grain: Some("One row per posted transaction".to_owned()),
            source_table: Some("TXN_HIST".to_owned()),
            columns: vec![
                col("TXN_ID", "VARCHAR(32)", false, false, "Source transaction id"),
                col("ACCT_NBR", "VARCHAR(20)", false, false, "Account number"),
                col("TXN_AMT", "DECIMAL(18,2)", false, false, "Signed amount"),
                col("TXN_DT", "TIMESTAMP", false, false, "Posting timestamp"),
                col("CHANNEL_CD", "VARCHAR(8)", true, false, "Originating channel"),
            ],
        },
        TableDef {
            name: "bronze_card_settle".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw card network settlement file".to_owned(),
            grain: Some("One row per settled card transaction".to_owned()),
            source_table: Some("CARD_SETTLE".to_owned()),
            columns: vec![
                col("SETTLE_ID", "VARCHAR(32)", false, false, "Settlement id"),
                col("CARD_NBR_MASK", "VARCHAR(19)", false, true, "Masked card number"),
                col("MERCHANT_NAME", "VARCHAR(60)", true, true, "Merchant name"),
                col("SETTLE_AMT", "DECIMAL(18,2)", false, false, "Settled amount"),
            ],
        },
    ]
}

pub fn silver_tables() -> Vec<TableDef> {
    vec![TableDef {
        name: "silver_transaction".to_owned(),
        layer: Layer::Silver,
        role: None,
        description: "Channel-agnostic transaction spine".to_owned(),
        grain: Some("One row per transaction".to_owned()),
        source_table: Some("bronze_txn_hist".to_owned()),
        columns: vec![
            col("transaction_id", "BIGINT", false, false, "Surrogate transaction id"),
            col("account_id", "BIGINT", false, false, "Owning account"),
            col("amount", "DECIMAL(18,2)", false, false, "Signed amount"),
            col("posted_at", "TIMESTAMP", false, false, "Posting timestamp"),
            col("channel_code", "VARCHAR(8)", false, false, "Normalized channel"),
            col("counterparty_name", "VARCHAR(60)", true, true, "Counterparty or merchant"),
        ],
    }]
}

pub fn gold_dimensions() -> Vec<TableDef> {
    vec![TableDef {
        name: "dim_channel".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Dimension),
        description: "Transaction channel dimension".to_owned(),
        grain: Some("One row per channel".to_owned()),
        source_table: None,
        columns: vec![
            col("channel_key", "BIGINT", false, false, "Surrogate key"),
            col("channel_code", "VARCHAR(8)", false, false, "Natural key"),
            col("channel_name", "VARCHAR(40)", false, false, "Display name"),
            col("is_digital", "BOOLEAN", false, false, "Digital channel flag"),
        ],
    }]
}

pub fn gold_facts() -> Vec<TableDef> {
    vec![TableDef {
        name: "fact_transaction".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Fact),
        description: "Settled transaction fact at transaction grain".to_owned(),
        grain: Some("One row per transaction".to_owned()),
        source_table: Some("silver_transaction".to_owned()),
        columns: vec![
            col("transaction_key", "BIGINT", false, false, "Surrogate key"),
            col("account_key", "BIGINT", false, false, "Account dimension key"),
            col("channel_key", "BIGINT", false, false, "Channel dimension key"),
            col("settled_date", "DATE", false, false, "Settlement date"),
            col("amount", "DECIMAL(18,2)", false, false, "Signed amount"),
            col("fraud_flag", "BOOLEAN", false, false, "Flagged by screening"),
        ],
    }]
}
