//! Common test setup functions.

use std::sync::Arc;

use call_analytics::TenantLookup;
use calls_core::{PhoneNormalizer, Result, TenantRecord};
use clickhouse_client::{
    insert::{insert_historical_tenants, insert_live_tenants},
    query::truncate_tenants,
    schema::init_schema,
    ClickHouseClient, ClickHouseConfig, HistoricalTenantTable, LiveTenantTable,
};

use crate::containers::TestContainers;
use crate::mocks::MockTenantSource;

/// Lookup wired to in-memory datasets.
pub struct MockContext {
    pub live: MockTenantSource,
    pub historical: MockTenantSource,
    pub lookup: TenantLookup,
}

impl MockContext {
    pub fn new(live: MockTenantSource, historical: MockTenantSource) -> Self {
        let lookup = TenantLookup::new(
            PhoneNormalizer::default(),
            Arc::new(live.clone()),
            Arc::new(historical.clone()),
        )
        .expect("mock sources match their slots");
        Self {
            live,
            historical,
            lookup,
        }
    }

    /// Total `find_many` calls across both datasets.
    pub fn query_count(&self) -> usize {
        self.live.query_count() + self.historical.query_count()
    }

    pub fn clear_queries(&self) {
        self.live.clear();
        self.historical.clear();
    }
}

/// Test context with a real ClickHouse holding both tenant tables.
pub struct TestContext {
    pub containers: TestContainers,
    pub clickhouse: ClickHouseClient,
    pub lookup: TenantLookup,
}

impl TestContext {
    /// Start ClickHouse, create the schema, and build the lookup service.
    pub async fn new() -> Self {
        let containers = TestContainers::start().await;

        let ch_config = ClickHouseConfig {
            url: containers.clickhouse_url.clone(),
            database: containers.clickhouse_database.clone(),
            username: containers.clickhouse_username.clone(),
            password: containers.clickhouse_password.clone(),
            timeout_secs: 30,
            ..Default::default()
        };
        let clickhouse =
            ClickHouseClient::new(ch_config).expect("Failed to create ClickHouse client");

        init_schema(&clickhouse)
            .await
            .expect("Failed to initialize schema");

        let lookup = TenantLookup::new(
            PhoneNormalizer::default(),
            Arc::new(LiveTenantTable::new(clickhouse.clone())),
            Arc::new(HistoricalTenantTable::new(clickhouse.clone())),
        )
        .expect("Failed to build lookup");

        Self {
            containers,
            clickhouse,
            lookup,
        }
    }

    /// Replace both datasets with the given records.
    pub async fn seed(&self, live: &[TenantRecord], historical: &[TenantRecord]) -> Result<()> {
        truncate_tenants(&self.clickhouse).await?;
        if !live.is_empty() {
            insert_live_tenants(&self.clickhouse, live).await?;
        }
        if !historical.is_empty() {
            insert_historical_tenants(&self.clickhouse, historical).await?;
        }
        Ok(())
    }

    /// Get the ClickHouse URL.
    pub fn clickhouse_url(&self) -> &str {
        &self.containers.clickhouse_url
    }
}
