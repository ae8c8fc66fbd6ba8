//! ClickHouse-backed tenant datasets.
//!
//! The live and historical datasets are two tables in one database, each
//! exposed as a `TenantSource` that answers a whole key set per query.

pub mod client;
pub mod config;
pub mod health;
pub mod insert;
pub mod query;
pub mod schema;
pub mod source;

pub use client::*;
pub use config::*;
pub use query::{tenant_stats, TenantStats};
pub use source::{HistoricalTenantTable, LiveTenantTable};
