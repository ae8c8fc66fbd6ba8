//! ClickHouse configuration.

use serde::{Deserialize, Serialize};

/// ClickHouse client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickHouseConfig {
    /// ClickHouse HTTP URL
    pub url: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Username (optional)
    pub username: Option<String>,
    /// Password (optional)
    pub password: Option<String>,
    /// Query timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Table holding current tenants
    #[serde(default = "default_live_table")]
    pub live_table: String,
    /// Table holding archived tenants
    #[serde(default = "default_historical_table")]
    pub historical_table: String,
}

fn default_database() -> String {
    "calls".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_live_table() -> String {
    "tenants_live".to_string()
}

fn default_historical_table() -> String {
    "tenants_historical".to_string()
}

impl ClickHouseConfig {
    /// Fully qualified live table name.
    pub fn live_table_ref(&self) -> String {
        format!("{}.{}", self.database, self.live_table)
    }

    /// Fully qualified historical table name.
    pub fn historical_table_ref(&self) -> String {
        format!("{}.{}", self.database, self.historical_table)
    }
}

impl Default for ClickHouseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8123".to_string(),
            database: default_database(),
            username: None,
            password: None,
            timeout_secs: default_timeout_secs(),
            live_table: default_live_table(),
            historical_table: default_historical_table(),
        }
    }
}
