//! Core types, phone normalization, and percentage math for call analytics.

pub mod call;
pub mod error;
pub mod percent;
pub mod period;
pub mod phone;
pub mod summary;
pub mod tenant;

pub use call::*;
pub use error::{Error, Result};
pub use period::*;
pub use phone::{normalize, NormalizedPhoneNumber, NormalizerConfig, PhoneNormalizer};
pub use summary::*;
pub use tenant::*;
