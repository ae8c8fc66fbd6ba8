//! Call record and classification types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call direction.
///
/// Provider values `inbound` and `outbound-*` are accepted alongside the
/// canonical names. Anything else is treated as an internal leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Direction {
    Incoming,
    Outgoing,
    Internal,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
            Self::Internal => "internal",
        }
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "incoming" | "inbound" => Self::Incoming,
            "outgoing" => Self::Outgoing,
            v if v.starts_with("outbound") => Self::Outgoing,
            _ => Self::Internal,
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Final call status as reported by the telephony provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum CallStatus {
    Answered,
    NoAnswer,
    Busy,
    Failed,
    Canceled,
    Other,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Answered => "answered",
            Self::NoAnswer => "no-answer",
            Self::Busy => "busy",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Other => "other",
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Answered)
    }

    /// Missed means the caller never reached anyone.
    pub fn is_missed(&self) -> bool {
        matches!(self, Self::NoAnswer | Self::Busy | Self::Failed)
    }
}

impl From<&str> for CallStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "answered" | "completed" => Self::Answered,
            "no-answer" | "no_answer" | "missed" => Self::NoAnswer,
            "busy" => Self::Busy,
            "failed" => Self::Failed,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Other,
        }
    }
}

impl From<String> for CallStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// A single call event from the call-log source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Provider call identifier
    pub sid: String,
    /// Caller number, as received
    pub from: String,
    /// Exophone / destination number
    pub to: String,
    pub direction: Direction,
    pub status: CallStatus,
    /// Duration in seconds
    #[serde(default)]
    pub duration_secs: u32,
    pub started_at: DateTime<Utc>,
}

impl CallRecord {
    pub fn is_incoming(&self) -> bool {
        self.direction == Direction::Incoming
    }
}

/// Classification of an incoming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallCategory {
    /// Caller is a known tenant
    Service,
    /// Caller matched no tenant
    Enquiry,
}

impl CallCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Enquiry => "enquiry",
        }
    }
}

/// Which tenant dataset produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedSource {
    Live,
    Historical,
    None,
}

impl MatchedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Historical => "historical",
            Self::None => "none",
        }
    }

    /// Enquiry exactly when nothing matched.
    pub fn category(&self) -> CallCategory {
        match self {
            Self::None => CallCategory::Enquiry,
            Self::Live | Self::Historical => CallCategory::Service,
        }
    }
}

/// A call record annotated with its classification.
///
/// `category` and `matched_source` are only present for incoming calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedCall {
    #[serde(flatten)]
    pub record: CallRecord,
    pub category: Option<CallCategory>,
    pub matched_source: Option<MatchedSource>,
}

impl ClassifiedCall {
    /// Annotates an incoming call with the source it matched.
    pub fn classified(record: CallRecord, source: MatchedSource) -> Self {
        Self {
            record,
            category: Some(source.category()),
            matched_source: Some(source),
        }
    }

    /// Passes a non-incoming call through without a category.
    pub fn unclassified(record: CallRecord) -> Self {
        Self {
            record,
            category: None,
            matched_source: None,
        }
    }

    pub fn is_service(&self) -> bool {
        self.category == Some(CallCategory::Service)
    }

    pub fn is_enquiry(&self) -> bool {
        self.category == Some(CallCategory::Enquiry)
    }
}
