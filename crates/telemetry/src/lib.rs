//! Telemetry for call analytics.
//!
//! Structured logging via tracing, plus process-local counters and
//! component health that the CLI reports on demand.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
