//! ClickHouse client wrapper.

use std::time::Duration;

use crate::config::ClickHouseConfig;
use calls_core::Result;
use clickhouse::Client;
use tracing::info;

/// Server-side `max_query_size`, raised so bulk lookups with tens of
/// thousands of bound keys still parse.
pub const MAX_QUERY_SIZE: usize = 16 * 1024 * 1024;

/// Shared handle to the tenant datastore.
///
/// Built once at startup and handed to every tenant source; cloning shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct ClickHouseClient {
    inner: Client,
    config: ClickHouseConfig,
}

impl ClickHouseClient {
    /// Creates a new ClickHouse client.
    pub fn new(config: ClickHouseConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(calls_core::Error::config("clickhouse url is empty"));
        }

        let mut client = Client::default()
            .with_url(&config.url)
            .with_database(&config.database)
            .with_option("max_execution_time", config.timeout_secs.to_string())
            .with_option("max_query_size", MAX_QUERY_SIZE.to_string());

        if let Some(ref user) = config.username {
            client = client.with_user(user);
        }

        if let Some(ref pass) = config.password {
            client = client.with_password(pass);
        }

        info!(
            url = %config.url,
            database = %config.database,
            live_table = %config.live_table,
            historical_table = %config.historical_table,
            "Created ClickHouse client"
        );

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the inner clickhouse client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClickHouseConfig {
        &self.config
    }

    /// Upper bound for a single round trip.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }
}
