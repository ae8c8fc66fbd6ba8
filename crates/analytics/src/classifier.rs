//! Call classification.

use std::collections::BTreeSet;
use std::time::Instant;

use calls_core::{CallRecord, ClassifiedCall, MatchedSource, Result};
use telemetry::metrics;
use tracing::debug;

use crate::lookup::TenantLookup;

/// Classifies incoming calls as service or enquiry.
///
/// Caller numbers are deduplicated before the batch lookup, so the cost is
/// bounded by distinct callers rather than calls. Non-incoming calls pass
/// through without a category. Output order matches input order.
pub async fn classify(lookup: &TenantLookup, calls: Vec<CallRecord>) -> Result<Vec<ClassifiedCall>> {
    let start = Instant::now();

    let callers: BTreeSet<&str> = calls
        .iter()
        .filter(|c| c.is_incoming())
        .map(|c| c.from.as_str())
        .collect();
    let distinct_callers = callers.len();

    let results = lookup.lookup_many(callers).await?;

    let classified: Vec<ClassifiedCall> = calls
        .into_iter()
        .map(|call| {
            if !call.is_incoming() {
                return ClassifiedCall::unclassified(call);
            }
            let source = results
                .get(&call.from)
                .map(|r| r.matched_source)
                .unwrap_or(MatchedSource::None);
            ClassifiedCall::classified(call, source)
        })
        .collect();

    let m = metrics();
    m.calls_classified.inc_by(classified.len() as u64);
    m.classify_latency_ms
        .observe(start.elapsed().as_millis() as u64);

    debug!(
        calls = classified.len(),
        distinct_callers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Classified calls"
    );

    Ok(classified)
}
