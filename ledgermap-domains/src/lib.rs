//! LEDGERMAP Domains - Built-in Catalog
//!
//! The banking domains shipped with the catalog (`customer`, `deposits`,
//! `transactions`), the dispatch layer that routes a `(domain, resource
//! kind)` request to the right domain module, and the registry that the UI
//! talks to.
//!
//! Dispatch owns the static registration table and no other state; all
//! memoization lives in `ledgermap-cache`. The registry eagerly embeds
//! per-domain summaries for listing and proxies every detail lookup to
//! the cache.

pub mod customer;
pub mod deposits;
pub mod dispatch;
pub mod registry;
pub mod source;
pub mod transactions;

pub use customer::CustomerDomain;
pub use deposits::DepositsDomain;
pub use dispatch::DomainDispatcher;
pub use registry::DomainRegistry;
pub use source::DomainSource;
pub use transactions::TransactionsDomain;
