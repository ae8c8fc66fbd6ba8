//! Call classification and comparison analytics.
//!
//! Data flows leaf-first:
//! - Lookup (normalized number → live, then historical tenant dataset)
//! - Classifier (incoming calls → service / enquiry)
//! - Aggregator (classified calls → period summary)
//! - Comparator (two summaries → absolute and percentage deltas)

pub mod aggregator;
pub mod callers;
pub mod classifier;
pub mod comparator;
pub mod lookup;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::aggregate;
pub use callers::{top_callers, CallerActivity};
pub use classifier::classify;
pub use comparator::compare;
pub use lookup::TenantLookup;
pub use report::{build_comparison_report, filter_by_exophone, PeriodCalls};
