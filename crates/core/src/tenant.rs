//! Tenant dataset types and the tenant source abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::call::{CallCategory, MatchedSource};
use crate::error::Result;
use crate::phone::NormalizedPhoneNumber;

/// Opaque tenant details returned on a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantMetadata {
    /// Phone number as stored in the dataset
    pub phone: Option<String>,
    pub name: Option<String>,
    pub property: Option<String>,
    pub booking_id: Option<String>,
}

/// One row of a tenant dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantRecord {
    pub phone: NormalizedPhoneNumber,
    /// Secondary number, only carried by historical rows
    pub alternate_phone: Option<NormalizedPhoneNumber>,
    pub metadata: TenantMetadata,
}

impl TenantRecord {
    pub fn new(phone: NormalizedPhoneNumber) -> Self {
        Self {
            phone,
            alternate_phone: None,
            metadata: TenantMetadata::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.metadata.property = Some(property.into());
        self
    }

    pub fn with_booking_id(mut self, booking_id: impl Into<String>) -> Self {
        self.metadata.booking_id = Some(booking_id.into());
        self
    }

    pub fn with_alternate_phone(mut self, phone: NormalizedPhoneNumber) -> Self {
        self.alternate_phone = Some(phone);
        self
    }
}

/// Outcome of a tenant lookup for one number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub is_tenant: bool,
    pub category: CallCategory,
    pub matched_source: MatchedSource,
    pub metadata: Option<TenantMetadata>,
}

impl LookupResult {
    /// A match in the given dataset.
    pub fn matched(source: MatchedSource, metadata: TenantMetadata) -> Self {
        Self {
            is_tenant: source != MatchedSource::None,
            category: source.category(),
            matched_source: source,
            metadata: Some(metadata),
        }
    }

    /// No dataset knows this number.
    pub fn enquiry() -> Self {
        Self {
            is_tenant: false,
            category: CallCategory::Enquiry,
            matched_source: MatchedSource::None,
            metadata: None,
        }
    }
}

/// A read-only tenant dataset keyed by normalized phone number.
///
/// Implementations answer a whole key set in a single round trip and fail
/// with `Error::LookupUnavailable` when the backing store cannot be queried.
#[async_trait]
pub trait TenantSource: Send + Sync {
    /// The dataset tier this source represents.
    fn tier(&self) -> MatchedSource;

    /// Returns metadata for every key present in the dataset.
    async fn find_many(
        &self,
        keys: &[NormalizedPhoneNumber],
    ) -> Result<HashMap<NormalizedPhoneNumber, TenantMetadata>>;

    /// Single-key convenience over `find_many`.
    async fn find(&self, key: &NormalizedPhoneNumber) -> Result<Option<TenantMetadata>> {
        let mut found = self.find_many(std::slice::from_ref(key)).await?;
        Ok(found.remove(key))
    }
}
