//! Call Analytics CLI
//!
//! Classifies incoming calls as service (known tenant) or enquiry and
//! compares adjacent reporting periods:
//! - Tenant lookup against the live and historical ClickHouse datasets
//! - Week-over-week and month-over-month comparison reports
//! - Dataset statistics and schema management

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error, info};

use call_analytics::{build_comparison_report, TenantLookup};
use calls_core::{CallRecord, ComparisonType, NormalizerConfig, PeriodWindow, PhoneNormalizer};
use clickhouse_client::{
    schema::init_schema, tenant_stats, ClickHouseClient, ClickHouseConfig, HistoricalTenantTable,
    LiveTenantTable,
};
use telemetry::{health, init_tracing_from_env, metrics};

#[derive(Parser, Debug)]
#[command(name = "call-analytics", version, about = "Service vs enquiry call analytics")]
struct Cli {
    /// Configuration file (TOML); defaults to config/default if present
    #[arg(short, long, env = "CALLS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single caller number
    Lookup {
        phone: String,
        /// Reject numbers without digits instead of treating them as enquiries
        #[arg(long)]
        strict: bool,
    },
    /// Row counts of the tenant datasets
    Stats,
    /// Create the database and tenant tables
    InitSchema,
    /// Compare two periods of call records
    Report {
        /// JSON array of call records for the current window
        #[arg(long)]
        current: PathBuf,
        /// JSON array of call records for the previous window
        #[arg(long)]
        previous: PathBuf,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// week or month
        #[arg(long, default_value = "week")]
        comparison: ComparisonType,
        /// Only count calls placed to this number
        #[arg(long)]
        exophone: Option<String>,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, serde::Deserialize)]
struct Config {
    #[serde(default)]
    clickhouse: ClickHouseConfig,

    #[serde(default)]
    normalizer: NormalizerConfig,

    /// Default exophone filter for reports
    #[serde(default)]
    exophone: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    debug!(
        url = %config.clickhouse.url,
        database = %config.clickhouse.database,
        country_code = %config.normalizer.country_code,
        "Loaded configuration"
    );

    let result = run(cli.command, config).await;

    debug!(metrics = ?metrics().snapshot(), "Run complete");
    result
}

async fn run(command: Command, config: Config) -> Result<()> {
    let clickhouse =
        ClickHouseClient::new(config.clickhouse.clone()).context("Failed to create ClickHouse client")?;

    match command {
        Command::InitSchema => {
            init_schema(&clickhouse)
                .await
                .context("Failed to initialize ClickHouse schema")?;
            info!(database = %config.clickhouse.database, "Schema initialized");
        }
        Command::Stats => {
            check_health(&clickhouse).await;
            let stats = tenant_stats(&clickhouse)
                .await
                .context("Failed to count tenant rows")?;
            print_json(&stats)?;
        }
        Command::Lookup { phone, strict } => {
            let lookup = build_lookup(&config, &clickhouse)?;
            let result = if strict {
                lookup.lookup_strict(&phone).await
            } else {
                lookup.lookup(&phone).await
            }
            .with_context(|| format!("Lookup failed for {:?}", phone))?;
            print_json(&result)?;
        }
        Command::Report {
            current,
            previous,
            start,
            end,
            comparison,
            exophone,
        } => {
            let window = PeriodWindow::new(start, end).context("Invalid reporting window")?;
            let (current_calls, previous_calls) =
                tokio::try_join!(read_calls(&current), read_calls(&previous))?;

            let lookup = build_lookup(&config, &clickhouse)?;
            let exophone = exophone.or(config.exophone);

            info!(
                window = %window,
                comparison = %comparison,
                current = current_calls.len(),
                previous = previous_calls.len(),
                "Building comparison report"
            );

            let report = build_comparison_report(
                &lookup,
                current_calls,
                previous_calls,
                window,
                comparison,
                exophone.as_deref(),
            )
            .await
            .context("Failed to build comparison report")?;

            print_json(&report.rounded())?;
        }
    }

    Ok(())
}

/// Load configuration from files and environment.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config/default").required(false),
    };

    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(file.format(config::FileFormat::Toml))
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("CALLS")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Nested keys with underscores don't survive the "__" separator reliably
    if let Ok(url) = std::env::var("CALLS_CLICKHOUSE_URL") {
        config.clickhouse.url = url;
    }
    if let Ok(database) = std::env::var("CALLS_CLICKHOUSE_DATABASE") {
        config.clickhouse.database = database;
    }
    if let Ok(username) = std::env::var("CALLS_CLICKHOUSE_USERNAME") {
        config.clickhouse.username = Some(username);
    }
    if let Ok(password) = std::env::var("CALLS_CLICKHOUSE_PASSWORD") {
        config.clickhouse.password = Some(password);
    }
    if let Ok(table) = std::env::var("CALLS_CLICKHOUSE_LIVE_TABLE") {
        config.clickhouse.live_table = table;
    }
    if let Ok(table) = std::env::var("CALLS_CLICKHOUSE_HISTORICAL_TABLE") {
        config.clickhouse.historical_table = table;
    }
    if let Ok(code) = std::env::var("CALLS_COUNTRY_CODE") {
        config.normalizer.country_code = code;
    }

    Ok(config)
}

fn build_lookup(config: &Config, clickhouse: &ClickHouseClient) -> Result<TenantLookup> {
    let normalizer =
        PhoneNormalizer::new(config.normalizer.clone()).context("Invalid normalizer settings")?;
    let lookup = TenantLookup::new(
        normalizer,
        Arc::new(LiveTenantTable::new(clickhouse.clone())),
        Arc::new(HistoricalTenantTable::new(clickhouse.clone())),
    )?;
    Ok(lookup)
}

async fn read_calls(path: &Path) -> Result<Vec<CallRecord>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid call records in {}", path.display()))
}

/// Check ClickHouse connectivity and log the dataset health.
async fn check_health(clickhouse: &ClickHouseClient) {
    if clickhouse_client::health::check_connection(clickhouse).await {
        info!("ClickHouse connection: healthy");
    } else {
        error!(report = ?health().report(), "ClickHouse connection: unhealthy");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}
