//! Per-caller activity rankings.

use std::collections::HashMap;

use calls_core::{CallCategory, ClassifiedCall};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Call activity of one caller number within a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallerActivity {
    pub number: String,
    pub category: CallCategory,
    pub calls: u64,
    pub first_call: DateTime<Utc>,
    pub last_call: DateTime<Utc>,
}

/// Ranks incoming callers of one category by call count.
///
/// Ties are broken by earliest first call, then by number.
pub fn top_callers(
    calls: &[ClassifiedCall],
    category: CallCategory,
    limit: usize,
) -> Vec<CallerActivity> {
    let mut by_number: HashMap<&str, CallerActivity> = HashMap::new();

    for call in calls
        .iter()
        .filter(|c| c.record.is_incoming() && c.category == Some(category))
    {
        let at = call.record.started_at;
        by_number
            .entry(call.record.from.as_str())
            .and_modify(|a| {
                a.calls += 1;
                a.first_call = a.first_call.min(at);
                a.last_call = a.last_call.max(at);
            })
            .or_insert_with(|| CallerActivity {
                number: call.record.from.clone(),
                category,
                calls: 1,
                first_call: at,
                last_call: at,
            });
    }

    let mut ranked: Vec<CallerActivity> = by_number.into_values().collect();
    ranked.sort_by(|a, b| {
        b.calls
            .cmp(&a.calls)
            .then(a.first_call.cmp(&b.first_call))
            .then_with(|| a.number.cmp(&b.number))
    });
    ranked.truncate(limit);
    ranked
}
