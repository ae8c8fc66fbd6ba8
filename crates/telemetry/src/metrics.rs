//! In-process metrics for tenant lookups and classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len() - 1);
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns bucket counts.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for call analytics.
#[derive(Debug, Default)]
pub struct Metrics {
    // Lookup service
    pub single_lookups: Counter,
    pub batch_lookups: Counter,
    pub numbers_looked_up: Counter,
    pub live_hits: Counter,
    pub historical_hits: Counter,
    pub enquiry_misses: Counter,
    pub invalid_numbers: Counter,

    // Datastore
    pub datastore_queries: Counter,
    pub datastore_errors: Counter,
    pub tenant_rows_inserted: Counter,
    pub datastore_latency_ms: Histogram,
    pub queries_in_flight: Gauge,

    // Classification
    pub calls_classified: Counter,
    pub classify_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub single_lookups: u64,
    pub batch_lookups: u64,
    pub numbers_looked_up: u64,
    pub live_hits: u64,
    pub historical_hits: u64,
    pub enquiry_misses: u64,
    pub invalid_numbers: u64,
    pub datastore_queries: u64,
    pub datastore_errors: u64,
    pub tenant_rows_inserted: u64,
    pub datastore_latency_mean_ms: f64,
    pub queries_in_flight: u64,
    pub calls_classified: u64,
    pub classify_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            single_lookups: self.single_lookups.get(),
            batch_lookups: self.batch_lookups.get(),
            numbers_looked_up: self.numbers_looked_up.get(),
            live_hits: self.live_hits.get(),
            historical_hits: self.historical_hits.get(),
            enquiry_misses: self.enquiry_misses.get(),
            invalid_numbers: self.invalid_numbers.get(),
            datastore_queries: self.datastore_queries.get(),
            datastore_errors: self.datastore_errors.get(),
            tenant_rows_inserted: self.tenant_rows_inserted.get(),
            datastore_latency_mean_ms: self.datastore_latency_ms.mean(),
            queries_in_flight: self.queries_in_flight.get(),
            calls_classified: self.calls_classified.get(),
            classify_latency_mean_ms: self.classify_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
