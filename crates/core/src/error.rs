//! Unified error types for call analytics.
//!
//! Error codes:
//! - PHONE_001: Invalid phone input
//! - LOOKUP_001: Tenant datastore unavailable
//! - CONFIG_001: Invalid configuration

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Phone input error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneErrorCode {
    /// PHONE_001: Empty input or no digits at all
    InvalidInput,
}

impl PhoneErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "PHONE_001",
        }
    }
}

/// Lookup error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorCode {
    /// LOOKUP_001: Datastore unreachable or query failed
    Unavailable,
}

impl LookupErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable => "LOOKUP_001",
        }
    }
}

/// Unified error type for call analytics.
#[derive(Debug, Error)]
pub enum Error {
    /// Phone string is empty or carries no digits.
    #[error("[{code}] invalid phone input: {message}")]
    InvalidInput { code: &'static str, message: String },

    /// A tenant dataset could not be queried.
    ///
    /// Never downgraded to an enquiry classification.
    #[error("[{code}] {tier} tenant dataset unavailable: {message}")]
    LookupUnavailable {
        code: &'static str,
        tier: &'static str,
        message: String,
    },

    #[error("[CONFIG_001] invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid phone input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            code: PhoneErrorCode::InvalidInput.code(),
            message: msg.into(),
        }
    }

    /// Create a datastore unavailable error for the given dataset tier.
    pub fn lookup_unavailable(tier: &'static str, msg: impl Into<String>) -> Self {
        Self::LookupUnavailable {
            code: LookupErrorCode::Unavailable.code(),
            tier,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means the tenant datastore could not answer.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::LookupUnavailable { .. })
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { code, .. } => Some(*code),
            Self::LookupUnavailable { code, .. } => Some(*code),
            Self::Config(_) => Some("CONFIG_001"),
            _ => None,
        }
    }
}
