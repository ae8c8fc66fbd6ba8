//! Period aggregation.

use std::collections::HashMap;

use calls_core::percent::{mean, share};
use calls_core::{CallCategory, ClassifiedCall, Direction, PeriodSummary};
use chrono::Timelike;

const UNCLASSIFIED: &str = "unclassified";

/// Reduces one window of classified calls to a summary.
///
/// An empty slice yields an all-zero summary. Service and enquiry counts
/// only consider incoming calls, so they always add up to `incoming_calls`;
/// an incoming call without a category counts as an enquiry.
pub fn aggregate(calls: &[ClassifiedCall]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    let mut duration_sum = 0f64;
    let mut durations = 0u64;
    let mut callers: HashMap<&str, u64> = HashMap::new();

    for call in calls {
        let record = &call.record;
        summary.total_calls += 1;

        *summary
            .direction_breakdown
            .entry(record.direction.as_str().to_string())
            .or_default() += 1;
        *summary
            .status_breakdown
            .entry(record.status.as_str().to_string())
            .or_default() += 1;
        *summary
            .daily_calls
            .entry(record.started_at.date_naive())
            .or_default() += 1;
        *summary
            .hourly_calls
            .entry(record.started_at.hour())
            .or_default() += 1;

        match record.direction {
            Direction::Incoming => {
                summary.incoming_calls += 1;
                *callers.entry(record.from.as_str()).or_default() += 1;

                match call.category.unwrap_or(CallCategory::Enquiry) {
                    CallCategory::Service => summary.service_calls += 1,
                    CallCategory::Enquiry => summary.enquiry_calls += 1,
                }
            }
            Direction::Outgoing => summary.outgoing_calls += 1,
            Direction::Internal => {}
        }

        let category = call.category.map(|c| c.as_str()).unwrap_or(UNCLASSIFIED);
        *summary
            .category_breakdown
            .entry(category.to_string())
            .or_default() += 1;

        if record.status.is_answered() {
            summary.answered_calls += 1;
        } else if record.status.is_missed() {
            summary.missed_calls += 1;
        }

        if record.duration_secs > 0 {
            duration_sum += f64::from(record.duration_secs);
            durations += 1;
        }
    }

    let incoming = summary.incoming_calls as f64;
    summary.service_percentage = share(summary.service_calls as f64, incoming);
    summary.enquiry_percentage = share(summary.enquiry_calls as f64, incoming);
    summary.average_duration = mean(duration_sum, durations);
    summary.unique_callers = callers.len() as u64;
    summary.repeat_callers = callers.values().filter(|&&n| n > 1).count() as u64;

    summary
}
