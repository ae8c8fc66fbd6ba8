//! Dataset statistics and maintenance queries.

use crate::client::ClickHouseClient;
use calls_core::{Error, Result};
use serde::Serialize;

/// Row counts of both tenant datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TenantStats {
    pub live_count: u64,
    pub historical_count: u64,
    pub total_count: u64,
}

async fn count_rows(client: &ClickHouseClient, tier: &'static str, table: &str) -> Result<u64> {
    client
        .inner()
        .query(&format!("SELECT count() FROM {}", table))
        .fetch_one::<u64>()
        .await
        .map_err(|e| Error::lookup_unavailable(tier, format!("count failed: {}", e)))
}

/// Count rows in the live and historical datasets.
pub async fn tenant_stats(client: &ClickHouseClient) -> Result<TenantStats> {
    let live = client.config().live_table_ref();
    let historical = client.config().historical_table_ref();
    let (live_count, historical_count) = tokio::try_join!(
        count_rows(client, "live", &live),
        count_rows(client, "historical", &historical),
    )?;

    Ok(TenantStats {
        live_count,
        historical_count,
        total_count: live_count + historical_count,
    })
}

/// Empty both tenant tables (dataset reload and test cleanup).
pub async fn truncate_tenants(client: &ClickHouseClient) -> Result<()> {
    let config = client.config();
    for table in [config.live_table_ref(), config.historical_table_ref()] {
        client
            .inner()
            .query(&format!("TRUNCATE TABLE IF EXISTS {}", table))
            .execute()
            .await
            .map_err(|e| Error::internal(format!("Truncate error: {}", e)))?;
    }
    Ok(())
}
