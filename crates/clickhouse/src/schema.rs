//! ClickHouse table schemas for the tenant datasets.
//!
//! Phone columns hold normalized keys (digits only, country-code prefix).
//! The number exactly as it was captured is kept in `stored_phone`.

use crate::client::ClickHouseClient;
use crate::config::ClickHouseConfig;
use calls_core::Result;

/// DDL for the database.
pub fn create_database(config: &ClickHouseConfig) -> String {
    format!("CREATE DATABASE IF NOT EXISTS {}", config.database)
}

/// DDL for the live dataset (current bookings).
pub fn create_live_table(config: &ClickHouseConfig) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    phone String,
    stored_phone String,
    tenant_name Nullable(String),
    property_name Nullable(String),
    booking_id Nullable(String),
    created_at DateTime DEFAULT now()
)
ENGINE = MergeTree()
ORDER BY phone
"#,
        config.live_table_ref()
    )
}

/// DDL for the historical dataset (archived tenants).
///
/// Rows carry a second number in `mobile`; either column may match.
pub fn create_historical_table(config: &ClickHouseConfig) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {} (
    phone String,
    mobile String DEFAULT '',
    stored_phone String,
    tenant_name Nullable(String),
    property_name Nullable(String),
    booking_id Nullable(String),
    created_at DateTime DEFAULT now()
)
ENGINE = MergeTree()
ORDER BY phone
"#,
        config.historical_table_ref()
    )
}

/// All DDL statements in execution order.
pub fn all_tables(config: &ClickHouseConfig) -> Vec<String> {
    vec![
        create_database(config),
        create_live_table(config),
        create_historical_table(config),
    ]
}

/// Initialize the database schema.
///
/// Creates the database and both tenant tables if they don't exist.
pub async fn init_schema(client: &ClickHouseClient) -> Result<()> {
    for sql in all_tables(client.config()) {
        client
            .inner()
            .query(&sql)
            .execute()
            .await
            .map_err(|e| calls_core::Error::internal(format!("Schema init error: {}", e)))?;
    }
    Ok(())
}
