//! Tenant sources backed by ClickHouse tables.
//!
//! Each source answers a whole key set with one `SELECT`, so a batch lookup
//! costs one round trip per dataset no matter how many numbers it carries.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use async_trait::async_trait;
use calls_core::{
    Error, MatchedSource, NormalizedPhoneNumber, Result, TenantMetadata, TenantSource,
};
use clickhouse::Row;
use serde::Deserialize;
use telemetry::{health, metrics, ComponentHealth};
use tracing::{debug, error};

use crate::client::ClickHouseClient;

/// Row read from the live table.
#[derive(Debug, Clone, Row, Deserialize)]
pub struct LiveTenantRow {
    pub phone: String,
    pub stored_phone: String,
    pub tenant_name: Option<String>,
    pub property_name: Option<String>,
    pub booking_id: Option<String>,
}

/// Row read from the historical table.
#[derive(Debug, Clone, Row, Deserialize)]
pub struct HistoricalTenantRow {
    pub phone: String,
    pub mobile: String,
    pub stored_phone: String,
    pub tenant_name: Option<String>,
    pub property_name: Option<String>,
    pub booking_id: Option<String>,
}

fn metadata(
    stored_phone: String,
    name: Option<String>,
    property: Option<String>,
    booking_id: Option<String>,
) -> TenantMetadata {
    TenantMetadata {
        phone: Some(stored_phone),
        name,
        property,
        booking_id,
    }
}

fn tier_health(tier: MatchedSource) -> &'static ComponentHealth {
    match tier {
        MatchedSource::Historical => &health().historical_dataset,
        _ => &health().live_dataset,
    }
}

/// Key-set lookup on the live table. The key list is bound once as `keys`.
fn live_lookup_sql(table: &str) -> String {
    format!(
        "WITH ? AS keys \
         SELECT phone, stored_phone, tenant_name, property_name, booking_id \
         FROM {} WHERE has(keys, phone)",
        table
    )
}

/// Key-set lookup on the historical table, matching either number column.
fn historical_lookup_sql(table: &str) -> String {
    format!(
        "WITH ? AS keys \
         SELECT phone, mobile, stored_phone, tenant_name, property_name, booking_id \
         FROM {} WHERE has(keys, phone) OR has(keys, mobile)",
        table
    )
}

/// Runs one bulk query with the key list bound to its single placeholder.
///
/// Any transport failure or timeout becomes `LookupUnavailable` for `tier`.
async fn fetch_rows<T>(
    client: &ClickHouseClient,
    tier: MatchedSource,
    sql: &str,
    keys: &[&str],
) -> Result<Vec<T>>
where
    T: Row + for<'b> Deserialize<'b>,
{
    let query = client.inner().query(sql).bind(keys);

    let m = metrics();
    m.datastore_queries.inc();
    m.queries_in_flight.inc();
    let start = Instant::now();

    let outcome = tokio::time::timeout(client.query_timeout(), query.fetch_all::<T>()).await;

    m.queries_in_flight.dec();
    m.datastore_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    let rows = match outcome {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => {
            m.datastore_errors.inc();
            error!(tier = tier.as_str(), error = %e, "Tenant query failed");
            tier_health(tier).set_unhealthy(e.to_string());
            return Err(Error::lookup_unavailable(tier.as_str(), e.to_string()));
        }
        Err(_) => {
            m.datastore_errors.inc();
            let msg = format!("query exceeded {:?}", client.query_timeout());
            error!(tier = tier.as_str(), "Tenant query timed out");
            tier_health(tier).set_unhealthy(msg.clone());
            return Err(Error::lookup_unavailable(tier.as_str(), msg));
        }
    };

    tier_health(tier).set_healthy();
    debug!(
        tier = tier.as_str(),
        keys = keys.len(),
        rows = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Tenant query complete"
    );
    Ok(rows)
}

/// Current tenants.
#[derive(Clone)]
pub struct LiveTenantTable {
    client: ClickHouseClient,
}

impl LiveTenantTable {
    pub fn new(client: ClickHouseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TenantSource for LiveTenantTable {
    fn tier(&self) -> MatchedSource {
        MatchedSource::Live
    }

    async fn find_many(
        &self,
        keys: &[NormalizedPhoneNumber],
    ) -> Result<HashMap<NormalizedPhoneNumber, TenantMetadata>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let key_strs: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        let sql = live_lookup_sql(&self.client.config().live_table_ref());

        let rows: Vec<LiveTenantRow> =
            fetch_rows(&self.client, MatchedSource::Live, &sql, &key_strs).await?;

        let mut found = HashMap::with_capacity(rows.len());
        for row in rows {
            found
                .entry(NormalizedPhoneNumber::from_stored(row.phone))
                .or_insert_with(|| {
                    metadata(
                        row.stored_phone,
                        row.tenant_name,
                        row.property_name,
                        row.booking_id,
                    )
                });
        }
        Ok(found)
    }
}

/// Archived tenants, matched on either `phone` or `mobile`.
#[derive(Clone)]
pub struct HistoricalTenantTable {
    client: ClickHouseClient,
}

impl HistoricalTenantTable {
    pub fn new(client: ClickHouseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TenantSource for HistoricalTenantTable {
    fn tier(&self) -> MatchedSource {
        MatchedSource::Historical
    }

    async fn find_many(
        &self,
        keys: &[NormalizedPhoneNumber],
    ) -> Result<HashMap<NormalizedPhoneNumber, TenantMetadata>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let key_strs: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        let wanted: HashSet<&str> = key_strs.iter().copied().collect();
        let sql = historical_lookup_sql(&self.client.config().historical_table_ref());

        let rows: Vec<HistoricalTenantRow> =
            fetch_rows(&self.client, MatchedSource::Historical, &sql, &key_strs).await?;

        let mut found = HashMap::with_capacity(rows.len());
        for row in rows {
            let meta = metadata(
                row.stored_phone,
                row.tenant_name,
                row.property_name,
                row.booking_id,
            );
            for column in [&row.phone, &row.mobile] {
                if !column.is_empty() && wanted.contains(column.as_str()) {
                    found
                        .entry(NormalizedPhoneNumber::from_stored(column.clone()))
                        .or_insert_with(|| meta.clone());
                }
            }
        }
        Ok(found)
    }
}
