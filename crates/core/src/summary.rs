//! Period summaries and comparison results.
//!
//! Summaries are recomputed per request and never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::percent::round1;
use crate::period::{ComparisonType, PeriodWindow};

/// Aggregated metrics for one window of calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub window: Option<PeriodWindow>,
    pub total_calls: u64,
    pub incoming_calls: u64,
    pub outgoing_calls: u64,
    pub answered_calls: u64,
    pub missed_calls: u64,
    pub service_calls: u64,
    pub enquiry_calls: u64,
    pub service_percentage: f64,
    pub enquiry_percentage: f64,
    /// Mean duration in seconds over calls that lasted at all
    pub average_duration: f64,
    /// Distinct caller numbers among incoming calls
    pub unique_callers: u64,
    /// Incoming caller numbers seen more than once
    pub repeat_callers: u64,
    pub status_breakdown: BTreeMap<String, u64>,
    pub direction_breakdown: BTreeMap<String, u64>,
    pub category_breakdown: BTreeMap<String, u64>,
    pub daily_calls: BTreeMap<NaiveDate, u64>,
    pub hourly_calls: BTreeMap<u32, u64>,
}

impl PeriodSummary {
    /// Attaches the window this summary covers.
    pub fn with_window(mut self, window: PeriodWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.total_calls == 0
    }

    /// Presentation copy with percentages and average duration at one decimal.
    pub fn rounded(&self) -> Self {
        Self {
            service_percentage: round1(self.service_percentage),
            enquiry_percentage: round1(self.enquiry_percentage),
            average_duration: round1(self.average_duration),
            ..self.clone()
        }
    }

    /// Full-precision value of a comparable metric.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TotalCalls => self.total_calls as f64,
            Metric::IncomingCalls => self.incoming_calls as f64,
            Metric::OutgoingCalls => self.outgoing_calls as f64,
            Metric::AnsweredCalls => self.answered_calls as f64,
            Metric::MissedCalls => self.missed_calls as f64,
            Metric::ServiceCalls => self.service_calls as f64,
            Metric::EnquiryCalls => self.enquiry_calls as f64,
            Metric::ServicePercentage => self.service_percentage,
            Metric::EnquiryPercentage => self.enquiry_percentage,
            Metric::AverageDuration => self.average_duration,
            Metric::UniqueCallers => self.unique_callers as f64,
        }
    }
}

/// Numeric metrics compared across periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalCalls,
    IncomingCalls,
    OutgoingCalls,
    AnsweredCalls,
    MissedCalls,
    ServiceCalls,
    EnquiryCalls,
    ServicePercentage,
    EnquiryPercentage,
    AverageDuration,
    UniqueCallers,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::TotalCalls,
        Metric::IncomingCalls,
        Metric::OutgoingCalls,
        Metric::AnsweredCalls,
        Metric::MissedCalls,
        Metric::ServiceCalls,
        Metric::EnquiryCalls,
        Metric::ServicePercentage,
        Metric::EnquiryPercentage,
        Metric::AverageDuration,
        Metric::UniqueCallers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalCalls => "total_calls",
            Self::IncomingCalls => "incoming_calls",
            Self::OutgoingCalls => "outgoing_calls",
            Self::AnsweredCalls => "answered_calls",
            Self::MissedCalls => "missed_calls",
            Self::ServiceCalls => "service_calls",
            Self::EnquiryCalls => "enquiry_calls",
            Self::ServicePercentage => "service_percentage",
            Self::EnquiryPercentage => "enquiry_percentage",
            Self::AverageDuration => "average_duration",
            Self::UniqueCallers => "unique_callers",
        }
    }
}

/// Delta of one metric between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub absolute_change: f64,
    pub percentage_change: f64,
}

impl MetricChange {
    pub fn rounded(&self) -> Self {
        Self {
            absolute_change: round1(self.absolute_change),
            percentage_change: round1(self.percentage_change),
        }
    }
}

/// Current vs previous period comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub comparison_type: ComparisonType,
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub changes: BTreeMap<Metric, MetricChange>,
}

impl ComparisonResult {
    pub fn change(&self, metric: Metric) -> Option<&MetricChange> {
        self.changes.get(&metric)
    }

    pub fn label(&self) -> &'static str {
        self.comparison_type.label()
    }

    /// Presentation copy with every figure at one decimal.
    pub fn rounded(&self) -> Self {
        Self {
            comparison_type: self.comparison_type,
            current: self.current.rounded(),
            previous: self.previous.rounded(),
            changes: self
                .changes
                .iter()
                .map(|(metric, change)| (*metric, change.rounded()))
                .collect(),
        }
    }
}
