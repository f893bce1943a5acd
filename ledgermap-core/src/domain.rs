//! Domain and resource identity types.
//!
//! A [`CacheKey`] pairs a [`DomainId`] with a [`ResourceKind`] and
//! identifies exactly one cacheable unit of work. Keys are compared by
//! value: two keys built from equal parts denote the same cache slot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier for one bounded unit of banking metadata.
///
/// The built-in catalog ships `customer`, `deposits`, and `transactions`,
/// but the type is open: unknown ids are valid inputs that surface as an
/// `UnknownDomain` failure at dispatch time rather than a construction
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(String);

impl DomainId {
    /// Create a domain id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DomainId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DomainId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Category of metadata requested for a domain.
///
/// Closed enumeration; the kebab-case string forms returned by
/// [`ResourceKind::as_str`] are stable and appear in logs and in the
/// serialized payload tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Metadata,
    GoldMetrics,
    SubDomains,
    UseCases,
    Glossary,
    Sttm,
    BronzeTables,
    SilverTables,
    GoldTables,
    BronzeIngestionJobs,
    LogicalModel,
}

impl ResourceKind {
    /// Every resource kind, in catalog display order.
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Metadata,
        ResourceKind::GoldMetrics,
        ResourceKind::SubDomains,
        ResourceKind::UseCases,
        ResourceKind::Glossary,
        ResourceKind::Sttm,
        ResourceKind::BronzeTables,
        ResourceKind::SilverTables,
        ResourceKind::GoldTables,
        ResourceKind::BronzeIngestionJobs,
        ResourceKind::LogicalModel,
    ];

    /// Stable kebab-case name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Metadata => "metadata",
            ResourceKind::GoldMetrics => "gold-metrics",
            ResourceKind::SubDomains => "sub-domains",
            ResourceKind::UseCases => "use-cases",
            ResourceKind::Glossary => "glossary",
            ResourceKind::Sttm => "sttm",
            ResourceKind::BronzeTables => "bronze-tables",
            ResourceKind::SilverTables => "silver-tables",
            ResourceKind::GoldTables => "gold-tables",
            ResourceKind::BronzeIngestionJobs => "bronze-ingestion-jobs",
            ResourceKind::LogicalModel => "logical-model",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized resource kind name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unrecognized resource kind: {0}")]
pub struct ParseResourceKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseResourceKindError(s.to_owned()))
    }
}

/// Identifies one cacheable unit of work: a domain plus a resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    domain: DomainId,
    kind: ResourceKind,
}

impl CacheKey {
    /// Create a key from its two components.
    pub fn new(domain: DomainId, kind: ResourceKind) -> Self {
        Self { domain, kind }
    }

    /// The domain component.
    pub fn domain(&self) -> &DomainId {
        &self.domain
    }

    /// The resource kind component.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_kind_str_roundtrip_all() {
        for kind in ResourceKind::ALL {
            let parsed: ResourceKind = kind.as_str().parse().expect("parse should succeed");
            assert_eq!(kind, parsed, "Roundtrip failed for {kind}");
        }
    }

    #[test]
    fn test_kind_parse_unknown() {
        let err = "silver-metrics".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err, ParseResourceKindError("silver-metrics".to_owned()));
        let msg = format!("{}", err);
        assert!(msg.contains("silver-metrics"));
    }

    #[test]
    fn test_kind_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_cache_key_display() {
        let key = CacheKey::new(DomainId::from("deposits"), ResourceKind::GoldMetrics);
        assert_eq!(key.to_string(), "deposits/gold-metrics");
    }

    #[test]
    fn test_cache_keys_compare_by_value() {
        let a = CacheKey::new(DomainId::from("customer"), ResourceKind::Metadata);
        let b = CacheKey::new(DomainId::new("customer".to_string()), ResourceKind::Metadata);
        assert_eq!(a, b);

        let mut slots: HashMap<CacheKey, u32> = HashMap::new();
        slots.insert(a, 1);
        slots.insert(b, 2);
        assert_eq!(slots.len(), 1, "Equal keys must share one slot");
    }

    #[test]
    fn test_cache_keys_differ_per_component() {
        let base = CacheKey::new(DomainId::from("customer"), ResourceKind::Metadata);
        let other_domain = CacheKey::new(DomainId::from("deposits"), ResourceKind::Metadata);
        let other_kind = CacheKey::new(DomainId::from("customer"), ResourceKind::Glossary);
        assert_ne!(base, other_domain);
        assert_ne!(base, other_kind);
    }
}
