//! Reporting windows and comparison types.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of the previous window in a week-over-week comparison.
pub const WEEK_DAYS: i64 = 7;

/// Comparison label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonType {
    Week,
    Month,
}

impl ComparisonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "Week-over-Week",
            Self::Month => "Month-over-Month",
        }
    }
}

impl FromStr for ComparisonType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "wow" => Ok(Self::Week),
            "month" | "mom" => Ok(Self::Month),
            other => Err(Error::config(format!(
                "unknown comparison type {:?} (expected week or month)",
                other
            ))),
        }
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive `[start, end]` date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::config(format!(
                "window start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of days in the window, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window ending the day before this one starts.
    ///
    /// Week comparisons use the seven preceding days; month comparisons use
    /// the preceding window of the same length.
    pub fn previous(&self, comparison: ComparisonType) -> Self {
        let len = match comparison {
            ComparisonType::Week => WEEK_DAYS,
            ComparisonType::Month => self.days(),
        };
        Self {
            start: self.start - Duration::days(len),
            end: self.start - Duration::days(1),
        }
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
