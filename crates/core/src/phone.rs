//! Phone number normalization.
//!
//! Every caller number is reduced to a digits-only key carrying the country-code
//! prefix before it is compared against the tenant datasets. Unrecognized shapes
//! are passed through as digits; they simply fail to match downstream.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};

/// Default country-code prefix (India).
pub const DEFAULT_COUNTRY_CODE: &str = "91";

/// Default national number length (without country code).
pub const DEFAULT_NATIONAL_NUMBER_LEN: usize = 10;

/// Canonical, digits-only phone key with country-code prefix.
///
/// Built by `PhoneNormalizer::normalize`. Deserialization only accepts
/// non-empty digit strings, so formatted input such as `+91 98765 43210`
/// is rejected rather than stored as a key that can never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedPhoneNumber(String);

impl NormalizedPhoneNumber {
    /// Wraps a key read back from a tenant table.
    ///
    /// The value is trusted as-is: the tables only ever hold keys produced by
    /// `normalize`. Anything else must go through `PhoneNormalizer`.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NormalizedPhoneNumber {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_input(format!(
                "{:?} is not a normalized phone key",
                value
            )));
        }
        Ok(Self(value))
    }
}

impl From<NormalizedPhoneNumber> for String {
    fn from(value: NormalizedPhoneNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for NormalizedPhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn validate_country_code(code: &str) -> std::result::Result<(), ValidationError> {
    if !code.chars().all(|c| c.is_ascii_digit()) || code.starts_with('0') {
        let mut err = ValidationError::new("country_code");
        err.message = Some("country code must be digits without a leading zero".into());
        return Err(err);
    }
    Ok(())
}

/// Normalizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NormalizerConfig {
    /// Country-code prefix prepended to national numbers
    #[validate(length(min = 1, max = 3), custom(function = "validate_country_code"))]
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Length of a national number without the prefix
    #[validate(range(min = 4, max = 14))]
    #[serde(default = "default_national_number_len")]
    pub national_number_len: usize,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_national_number_len() -> usize {
    DEFAULT_NATIONAL_NUMBER_LEN
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            national_number_len: default_national_number_len(),
        }
    }
}

/// Pure phone normalizer.
#[derive(Debug, Clone)]
pub struct PhoneNormalizer {
    config: NormalizerConfig,
}

impl PhoneNormalizer {
    /// Creates a normalizer, rejecting an invalid configuration.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Error::config(format!("normalizer: {}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn full_len(&self) -> usize {
        self.config.country_code.len() + self.config.national_number_len
    }

    /// Normalizes a raw phone string.
    ///
    /// Fails only when the input carries no digits at all.
    pub fn normalize(&self, raw: &str) -> Result<NormalizedPhoneNumber> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(Error::invalid_input(if raw.trim().is_empty() {
                "phone number is empty".to_string()
            } else {
                format!("no digits in {:?}", raw)
            }));
        }

        let country_code = &self.config.country_code;
        let national_len = self.config.national_number_len;

        if digits.len() == self.full_len() && digits.starts_with(country_code.as_str()) {
            return Ok(NormalizedPhoneNumber(digits));
        }

        // Trunk prefix: 0 followed by a national number
        let national = if digits.len() == national_len + 1 && digits.starts_with('0') {
            &digits[1..]
        } else {
            digits.as_str()
        };

        if national.len() == national_len {
            return Ok(NormalizedPhoneNumber(format!("{}{}", country_code, national)));
        }

        Ok(NormalizedPhoneNumber(digits))
    }
}

impl Default for PhoneNormalizer {
    fn default() -> Self {
        Self {
            config: NormalizerConfig::default(),
        }
    }
}

/// Normalizes with the default (India, 10-digit) configuration.
pub fn normalize(raw: &str) -> Result<NormalizedPhoneNumber> {
    PhoneNormalizer::default().normalize(raw)
}

/// Last `n` digits of a number, used for loose exophone matching.
pub fn trailing_digits(raw: &str, n: usize) -> String {
    let digits: Vec<char> = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(n);
    digits[start..].iter().collect()
}
