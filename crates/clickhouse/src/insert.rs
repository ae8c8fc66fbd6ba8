//! Batch insert helpers for loading tenant datasets.

use crate::client::ClickHouseClient;
use calls_core::{Result, TenantRecord};
use clickhouse::Row;
use serde::Serialize;
use telemetry::metrics;
use tracing::debug;

/// Row written to the live table.
#[derive(Debug, Clone, Row, Serialize)]
pub struct LiveTenantInsertRow {
    pub phone: String,
    pub stored_phone: String,
    pub tenant_name: Option<String>,
    pub property_name: Option<String>,
    pub booking_id: Option<String>,
}

impl From<&TenantRecord> for LiveTenantInsertRow {
    fn from(record: &TenantRecord) -> Self {
        Self {
            phone: record.phone.as_str().to_string(),
            stored_phone: record
                .metadata
                .phone
                .clone()
                .unwrap_or_else(|| record.phone.as_str().to_string()),
            tenant_name: record.metadata.name.clone(),
            property_name: record.metadata.property.clone(),
            booking_id: record.metadata.booking_id.clone(),
        }
    }
}

/// Row written to the historical table.
#[derive(Debug, Clone, Row, Serialize)]
pub struct HistoricalTenantInsertRow {
    pub phone: String,
    pub mobile: String,
    pub stored_phone: String,
    pub tenant_name: Option<String>,
    pub property_name: Option<String>,
    pub booking_id: Option<String>,
}

impl From<&TenantRecord> for HistoricalTenantInsertRow {
    fn from(record: &TenantRecord) -> Self {
        Self {
            phone: record.phone.as_str().to_string(),
            mobile: record
                .alternate_phone
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            stored_phone: record
                .metadata
                .phone
                .clone()
                .unwrap_or_else(|| record.phone.as_str().to_string()),
            tenant_name: record.metadata.name.clone(),
            property_name: record.metadata.property.clone(),
            booking_id: record.metadata.booking_id.clone(),
        }
    }
}

async fn insert_rows<T>(client: &ClickHouseClient, table: &str, rows: Vec<T>) -> Result<usize>
where
    T: Row + Serialize,
{
    if rows.is_empty() {
        return Ok(0);
    }
    let count = rows.len();
    let start = std::time::Instant::now();

    let mut insert = client
        .inner()
        .insert(table)
        .map_err(|e| calls_core::Error::internal(format!("Insert error: {}", e)))?;
    for row in &rows {
        insert
            .write(row)
            .await
            .map_err(|e| calls_core::Error::internal(format!("Write error: {}", e)))?;
    }
    insert
        .end()
        .await
        .map_err(|e| calls_core::Error::internal(format!("End error: {}", e)))?;

    metrics().tenant_rows_inserted.inc_by(count as u64);
    debug!(
        table,
        count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Inserted tenant rows"
    );
    Ok(count)
}

/// Insert records into the live dataset.
pub async fn insert_live_tenants(
    client: &ClickHouseClient,
    records: &[TenantRecord],
) -> Result<usize> {
    let rows: Vec<LiveTenantInsertRow> = records.iter().map(Into::into).collect();
    insert_rows(client, &client.config().live_table_ref(), rows).await
}

/// Insert records into the historical dataset.
pub async fn insert_historical_tenants(
    client: &ClickHouseClient,
    records: &[TenantRecord],
) -> Result<usize> {
    let rows: Vec<HistoricalTenantInsertRow> = records.iter().map(Into::into).collect();
    insert_rows(client, &client.config().historical_table_ref(), rows).await
}
