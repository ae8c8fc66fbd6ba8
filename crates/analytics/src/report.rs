//! Comparison report pipeline: filter, classify, aggregate, compare.

use calls_core::phone::trailing_digits;
use calls_core::{
    CallRecord, ClassifiedCall, ComparisonResult, ComparisonType, PeriodSummary, PeriodWindow,
    Result,
};
use tracing::info;

use crate::aggregator::aggregate;
use crate::classifier::classify;
use crate::comparator::compare;
use crate::lookup::TenantLookup;

/// Digits of the exophone matched against a call's destination.
const EXOPHONE_MATCH_DIGITS: usize = 10;

/// Keeps calls placed to the given exophone.
///
/// A destination matches when it contains the last ten digits of the
/// exophone. No filter, or one without digits, keeps every call.
pub fn filter_by_exophone(calls: Vec<CallRecord>, exophone: Option<&str>) -> Vec<CallRecord> {
    let suffix = match exophone.map(|e| trailing_digits(e, EXOPHONE_MATCH_DIGITS)) {
        Some(suffix) if !suffix.is_empty() => suffix,
        _ => return calls,
    };

    calls
        .into_iter()
        .filter(|c| {
            let to: String = c.to.chars().filter(|ch| ch.is_ascii_digit()).collect();
            to.contains(&suffix)
        })
        .collect()
}

/// Calls of one reporting window.
#[derive(Debug, Clone)]
pub struct PeriodCalls {
    pub window: PeriodWindow,
    pub calls: Vec<CallRecord>,
}

impl PeriodCalls {
    pub fn new(window: PeriodWindow, calls: Vec<CallRecord>) -> Self {
        Self { window, calls }
    }

    pub fn filtered(self, exophone: Option<&str>) -> Self {
        Self {
            window: self.window,
            calls: filter_by_exophone(self.calls, exophone),
        }
    }

    /// Classifies the calls and reduces them to a windowed summary.
    pub async fn summarize(self, lookup: &TenantLookup) -> Result<(Vec<ClassifiedCall>, PeriodSummary)> {
        let window = self.window;
        let classified = classify(lookup, self.calls).await?;
        let summary = aggregate(&classified).with_window(window);
        Ok((classified, summary))
    }
}

/// Builds a comparison of `window` against the preceding window.
///
/// The previous window is derived from `comparison_type`. Both periods are
/// classified concurrently; a lookup failure in either aborts the report.
pub async fn build_comparison_report(
    lookup: &TenantLookup,
    current_calls: Vec<CallRecord>,
    previous_calls: Vec<CallRecord>,
    window: PeriodWindow,
    comparison_type: ComparisonType,
    exophone: Option<&str>,
) -> Result<ComparisonResult> {
    let current = PeriodCalls::new(window, current_calls).filtered(exophone);
    let previous =
        PeriodCalls::new(window.previous(comparison_type), previous_calls).filtered(exophone);

    let ((_, current), (_, previous)) =
        tokio::try_join!(current.summarize(lookup), previous.summarize(lookup))?;

    info!(
        comparison = comparison_type.as_str(),
        window = %window,
        current_calls = current.total_calls,
        previous_calls = previous.total_calls,
        "Built comparison report"
    );

    Ok(compare(current, previous, comparison_type))
}
