//! Mock implementations for testing.

use async_trait::async_trait;
use calls_core::{
    normalize, Error, MatchedSource, NormalizedPhoneNumber, Result, TenantMetadata, TenantSource,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory tenant dataset.
///
/// Implements the same `TenantSource` trait as the ClickHouse tables, so
/// lookups and classification run their production code paths while the
/// test controls the dataset contents and counts the queries issued.
#[derive(Clone)]
pub struct MockTenantSource {
    tier: MatchedSource,
    rows: Arc<Mutex<HashMap<NormalizedPhoneNumber, TenantMetadata>>>,
    /// Key sets received by `find_many`, one entry per query.
    queries: Arc<Mutex<Vec<Vec<NormalizedPhoneNumber>>>>,
    /// Simulate datastore failures if set.
    should_fail: Arc<Mutex<bool>>,
}

impl MockTenantSource {
    pub fn new(tier: MatchedSource) -> Self {
        Self {
            tier,
            rows: Arc::new(Mutex::new(HashMap::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn live() -> Self {
        Self::new(MatchedSource::Live)
    }

    pub fn historical() -> Self {
        Self::new(MatchedSource::Historical)
    }

    /// Add a tenant by raw phone number.
    pub fn with_tenant(self, phone: &str, name: &str) -> Self {
        self.add_tenant(phone, name);
        self
    }

    pub fn add_tenant(&self, phone: &str, name: &str) {
        let key = normalize(phone).expect("fixture phone must contain digits");
        self.rows.lock().insert(
            key,
            TenantMetadata {
                phone: Some(phone.to_string()),
                name: Some(name.to_string()),
                ..Default::default()
            },
        );
    }

    /// Number of `find_many` calls received.
    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    /// Key sets received, in order.
    pub fn captured_queries(&self) -> Vec<Vec<NormalizedPhoneNumber>> {
        self.queries.lock().clone()
    }

    pub fn clear(&self) {
        self.queries.lock().clear();
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl TenantSource for MockTenantSource {
    fn tier(&self) -> MatchedSource {
        self.tier
    }

    async fn find_many(
        &self,
        keys: &[NormalizedPhoneNumber],
    ) -> Result<HashMap<NormalizedPhoneNumber, TenantMetadata>> {
        self.queries.lock().push(keys.to_vec());

        if *self.should_fail.lock() {
            return Err(Error::lookup_unavailable(
                self.tier.as_str(),
                "mock datastore failure",
            ));
        }

        let rows = self.rows.lock();
        Ok(keys
            .iter()
            .filter_map(|k| rows.get(k).map(|m| (k.clone(), m.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source_matches_normalized_keys() {
        let mock = MockTenantSource::live().with_tenant("+91 98765 43210", "Asha");

        let key = normalize("09876543210").unwrap();
        let found = mock.find(&key).await.unwrap();
        assert_eq!(found.unwrap().name.as_deref(), Some("Asha"));
        assert_eq!(mock.query_count(), 1);
        assert_eq!(mock.captured_queries()[0], vec![key]);
    }

    #[tokio::test]
    async fn test_mock_source_failure_mode() {
        let mock = MockTenantSource::historical();
        mock.set_should_fail(true);

        let err = mock.find_many(&[]).await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(err.error_code(), Some("LOOKUP_001"));
    }
}
