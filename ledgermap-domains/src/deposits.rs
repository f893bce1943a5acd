//! Deposits & Funding domain: accounts, balances, products, and interest.

use async_trait::async_trait;
use ledgermap_core::{
    BusinessValue, CatalogResult, ColumnDef, Complexity, DataClassification, DomainId,
    DomainMetadata, DomainSummary, GlossaryEntry, IngestionCatalog, IngestionJob, Layer, LoadType,
    MetricDef, Priority, RefreshFrequency, ResourceKind, ResourcePayload, SttmGap, SttmMapping,
    SttmReport, SubDomain, TableCoverage, TableDef, TableRole, UseCase,
};

use crate::source::DomainSource;

pub const DOMAIN_ID: &str = "deposits";

/// Deposits & Funding domain source.
pub struct DepositsDomain;

#[async_trait]
impl DomainSource for DepositsDomain {
    fn id(&self) -> DomainId {
        DomainId::from(DOMAIN_ID)
    }

    fn summary(&self) -> DomainSummary {
        DomainSummary {
            id: self.id(),
            display_name: "Deposits & Funding".to_owned(),
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
            ResourceKind::BronzeIngestionJobs => {
                ResourcePayload::BronzeIngestionJobs(ingestion_jobs())
            }
            // No entity-relationship model published for deposits yet.
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
        name: "Deposits & Funding".to_owned(),
        display_name: "Deposits & Funding Domain".to_owned(),
        description: "Retail and commercial deposit accounts, daily balances, interest \
                      accrual, product performance, and funding concentration"
            .to_owned(),
        priority: Priority::P0,
        complexity: Complexity::High,
        business_value: BusinessValue::Critical,
        key_entities: vec![
            "Account".to_owned(),
            "Balance".to_owned(),
            "Product".to_owned(),
            "Interest".to_owned(),
            "Maturity".to_owned(),
        ],
        source_system: "FIS".to_owned(),
        grain: "One row per account per day".to_owned(),
        refresh_schedule: "Daily at 6:30 AM UTC".to_owned(),
        refresh_frequency: RefreshFrequency::Daily,
        data_classification: DataClassification::Confidential,
        pii_fields: vec!["account_title".to_owned()],
    }
}

pub fn gold_metrics() -> Vec<MetricDef> {
    vec![
        MetricDef {
            name: "total_deposit_balance".to_owned(),
            description: "Sum of end-of-day balances across all open deposit accounts".to_owned(),
            sql: "SELECT SUM(eod_balance) FROM fact_deposit_balance_daily \
                  WHERE snapshot_date = CURRENT_DATE"
                .to_owned(),
            unit: Some("USD".to_owned()),
        },
        MetricDef {
            name: "cost_of_funds".to_owned(),
            description: "Annualized interest expense over average deposit balance".to_owned(),
            sql: "SELECT SUM(interest_accrued) * 365.0 / NULLIF(AVG(eod_balance), 0) \
                  FROM fact_deposit_balance_daily \
                  WHERE snapshot_date >= CURRENT_DATE - INTERVAL '30 days'"
                .to_owned(),
            unit: Some("%".to_owned()),
        },
        MetricDef {
            name: "cd_maturity_runoff_90d".to_owned(),
            description: "Balance of certificates maturing within 90 days".to_owned(),
            sql: "SELECT SUM(eod_balance) FROM fact_deposit_balance_daily f \
                  JOIN dim_deposit_product p ON p.product_key = f.product_key \
                  WHERE p.product_type = 'CD' \
                  AND f.maturity_date BETWEEN CURRENT_DATE AND CURRENT_DATE + 90"
                .to_owned(),
            unit: Some("USD".to_owned()),
        },
    ]
}

pub fn sub_domains() -> Vec<SubDomain> {
    vec![
        SubDomain {
            id: "deposits-accounts".to_owned(),
            name: "Accounts & Balances".to_owned(),
            description: "Account master and daily balance snapshots".to_owned(),
        },
        SubDomain {
            id: "deposits-products".to_owned(),
            name: "Products & Pricing".to_owned(),
            description: "Deposit product catalog, rate tiers, and promotions".to_owned(),
        },
        SubDomain {
            id: "deposits-interest".to_owned(),
            name: "Interest & Accrual".to_owned(),
            description: "Interest accrual, posting, and expense attribution".to_owned(),
        },
    ]
}

pub fn use_cases() -> Vec<UseCase> {
    vec![
        UseCase {
            id: "funding-concentration".to_owned(),
            name: "Funding Concentration".to_owned(),
            description: "Monitor dependence on large depositors and hot money".to_owned(),
        },
        UseCase {
            id: "deposit-pricing".to_owned(),
            name: "Deposit Pricing".to_owned(),
            description: "Evaluate rate changes against balance retention".to_owned(),
        },
        UseCase {
            id: "maturity-ladder".to_owned(),
            name: "CD Maturity Ladder".to_owned(),
            description: "Project certificate runoff for liquidity planning".to_owned(),
        },
    ]
}

pub fn glossary() -> Vec<GlossaryEntry> {
    vec![
        GlossaryEntry {
            term: "Core Deposits".to_owned(),
            definition: "Stable deposit balances unlikely to reprice or leave quickly".to_owned(),
        },
        GlossaryEntry {
            term: "Hot Money".to_owned(),
            definition: "Rate-sensitive balances that move on small pricing differences"
                .to_owned(),
        },
        GlossaryEntry {
            term: "EOD Balance".to_owned(),
            definition: "Ledger balance at end-of-day processing".to_owned(),
        },
    ]
}

pub fn sttm() -> SttmReport {
    SttmReport {
        mappings: vec![
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "DEP_ACCOUNTS.ACCT_NBR".to_owned(),
                target_table: "silver_deposit_account".to_owned(),
                target_column: "account_id".to_owned(),
            },
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "DEP_ACCOUNTS.CUR_BAL".to_owned(),
                target_table: "silver_deposit_balance_daily".to_owned(),
                target_column: "eod_balance".to_owned(),
            },
            SttmMapping {
                source_system: "FIS".to_owned(),
                source_column: "DEP_ACCOUNTS.PROD_CD".to_owned(),
                target_table: "silver_deposit_account".to_owned(),
                target_column: "product_code".to_owned(),
            },
        ],
        gaps: vec![SttmGap {
            source_column: "DEP_ACCOUNTS.PROMO_RATE_FLAG".to_owned(),
            note: "Promotional pricing history lives in a spreadsheet today".to_owned(),
        }],
        table_coverage: vec![
            TableCoverage {
                name: "DEP_ACCOUNTS".to_owned(),
                coverage_pct: 88,
            },
            TableCoverage {
                name: "DEP_INT_ACCRUAL".to_owned(),
                coverage_pct: 74,
            },
        ],
    }
}

pub fn bronze_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: "bronze_dep_accounts".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw daily snapshot of the FIS deposit account file".to_owned(),
            grain: Some("One row per account per day".to_owned()),
            source_table: Some("DEP_ACCOUNTS".to_owned()),
            columns: vec![
                col("ACCT_NBR", "VARCHAR(20)", false, false, "Source account number"),
                col("CUST_NBR", "VARCHAR(20)", false, false, "Owning customer number"),
                col("PROD_CD", "VARCHAR(8)", false, false, "Product code"),
                col("CUR_BAL", "DECIMAL(18,2)", true, false, "Current balance"),
                col("OPEN_DT", "DATE", true, false, "Account open date"),
            ],
        },
        TableDef {
            name: "bronze_dep_int_accrual".to_owned(),
            layer: Layer::Bronze,
            role: None,
            description: "Raw daily interest accrual postings".to_owned(),
            grain: Some("One row per account per accrual day".to_owned()),
            source_table: Some("DEP_INT_ACCRUAL".to_owned()),
            columns: vec![
                col("ACCT_NBR", "VARCHAR(20)", false, false, "Source account number"),
                col("ACCRUAL_DT", "DATE", false, false, "Accrual date"),
                col("ACCRUAL_AMT", "DECIMAL(18,6)", false, false, "Accrued interest"),
            ],
        },
    ]
}

pub fn silver_tables() -> Vec<TableDef> {
    vec![
        TableDef {
            name: "silver_deposit_account".to_owned(),
            layer: Layer::Silver,
            role: None,
            description: "Conformed deposit account master".to_owned(),
            grain: Some("One row per account".to_owned()),
            source_table: Some("bronze_dep_accounts".to_owned()),
            columns: vec![
                col("account_id", "BIGINT", false, false, "Surrogate account id"),
                col("customer_id", "BIGINT", false, false, "Owning customer"),
                col("product_code", "VARCHAR(8)", false, false, "Product code"),
                col("account_title", "VARCHAR(120)", true, true, "Styled account title"),
                col("opened_on", "DATE", true, false, "Open date"),
            ],
        },
        TableDef {
            name: "silver_deposit_balance_daily".to_owned(),
            layer: Layer::Silver,
            role: None,
            description: "Cleaned daily balance and accrual history".to_owned(),
            grain: Some("One row per account per day".to_owned()),
            source_table: Some("bronze_dep_accounts".to_owned()),
            columns: vec![
                col("account_id", "BIGINT", false, false, "Surrogate account id"),
                col("balance_date", "DATE", false, false, "Balance date"),
                col("eod_balance", "DECIMAL(18,2)", false, false, "End-of-day balance"),
                col("interest_accrued", "DECIMAL(18,6)", true, false, "Interest accrued"),
            ],
        },
    ]
}

pub fn gold_dimensions() -> Vec<TableDef> {
    vec![TableDef {
        name: "dim_deposit_product".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Dimension),
        description: "Deposit product dimension with rate tier attributes".to_owned(),
        grain: Some("One row per product".to_owned()),
        source_table: None,
        columns: vec![
            col("product_key", "BIGINT", false, false, "Surrogate key"),
            col("product_code", "VARCHAR(8)", false, false, "Natural key"),
            col("product_type", "VARCHAR(12)", false, false, "DDA, SAV, CD, MMDA"),
            col("rate_tier", "VARCHAR(8)", true, false, "Pricing tier"),
        ],
    }]
}

pub fn gold_facts() -> Vec<TableDef> {
    vec![TableDef {
        name: "fact_deposit_balance_daily".to_owned(),
        layer: Layer::Gold,
        role: Some(TableRole::Fact),
        description: "Daily deposit balance and accrual fact".to_owned(),
        grain: Some("One row per account per day".to_owned()),
        source_table: Some("silver_deposit_balance_daily".to_owned()),
        columns: vec![
            col("account_key", "BIGINT", false, false, "Account dimension key"),
            col("product_key", "BIGINT", false, false, "Product dimension key"),
            col("snapshot_date", "DATE", false, false, "Snapshot date"),
            col("eod_balance", "DECIMAL(18,2)", false, false, "End-of-day balance"),
            col("interest_accrued", "DECIMAL(18,6)", true, false, "Interest accrued"),
            col("maturity_date", "DATE", true, false, "CD maturity, when applicable"),
        ],
    }]
}

pub fn ingestion_jobs() -> IngestionCatalog {
    IngestionCatalog {
        domain: DomainId::from(DOMAIN_ID),
        layer: Layer::Bronze,
        jobs: vec![
            IngestionJob {
                name: "dep_accounts_daily".to_owned(),
                source: "FIS deposit snapshot".to_owned(),
                target_table: "bronze_dep_accounts".to_owned(),
                schedule: "Daily 05:00 UTC".to_owned(),
                load_type: LoadType::Full,
            },
            IngestionJob {
                name: "dep_int_accrual_daily".to_owned(),
                source: "FIS accrual postings".to_owned(),
                target_table: "bronze_dep_int_accrual".to_owned(),
                schedule: "Daily 05:15 UTC".to_owned(),
                load_type: LoadType::Incremental,
            },
        ],
    }
}
