//! Period-over-period comparison.

use calls_core::percent::change;
use calls_core::{ComparisonResult, ComparisonType, Metric, MetricChange, PeriodSummary};

/// Computes absolute and percentage deltas for every comparable metric.
///
/// Deltas use full-precision summary values. A zero baseline reports +100%
/// when the metric grew from nothing and 0% when it stayed at zero.
pub fn compare(
    current: PeriodSummary,
    previous: PeriodSummary,
    comparison_type: ComparisonType,
) -> ComparisonResult {
    let changes = Metric::ALL
        .iter()
        .map(|&metric| {
            let now = current.metric(metric);
            let before = previous.metric(metric);
            (
                metric,
                MetricChange {
                    absolute_change: now - before,
                    percentage_change: change(now, before),
                },
            )
        })
        .collect();

    ComparisonResult {
        comparison_type,
        current,
        previous,
        changes,
    }
}
