//! In-memory tenant sources and call builders for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use calls_core::{
    normalize, CallRecord, CallStatus, Direction, Error, MatchedSource, NormalizedPhoneNumber,
    Result, TenantMetadata, TenantSource,
};
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

pub(crate) struct StaticSource {
    tier: MatchedSource,
    rows: HashMap<NormalizedPhoneNumber, TenantMetadata>,
    queries: Mutex<usize>,
    fail: Mutex<bool>,
}

impl StaticSource {
    pub(crate) fn new(tier: MatchedSource, numbers: &[&str]) -> Arc<Self> {
        let rows = numbers
            .iter()
            .map(|n| {
                let key = normalize(n).unwrap();
                let meta = TenantMetadata {
                    phone: Some(n.to_string()),
                    name: Some(format!("{} tenant", tier.as_str())),
                    ..Default::default()
                };
                (key, meta)
            })
            .collect();
        Arc::new(Self {
            tier,
            rows,
            queries: Mutex::new(0),
            fail: Mutex::new(false),
        })
    }

    pub(crate) fn queries(&self) -> usize {
        *self.queries.lock()
    }

    pub(crate) fn set_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }
}

#[async_trait]
impl TenantSource for StaticSource {
    fn tier(&self) -> MatchedSource {
        self.tier
    }

    async fn find_many(
        &self,
        keys: &[NormalizedPhoneNumber],
    ) -> Result<HashMap<NormalizedPhoneNumber, TenantMetadata>> {
        *self.queries.lock() += 1;
        if *self.fail.lock() {
            return Err(Error::lookup_unavailable(self.tier.as_str(), "store down"));
        }
        Ok(keys
            .iter()
            .filter_map(|k| self.rows.get(k).map(|m| (k.clone(), m.clone())))
            .collect())
    }
}

pub(crate) fn call(
    sid: &str,
    from: &str,
    direction: Direction,
    status: CallStatus,
    duration_secs: u32,
) -> CallRecord {
    CallRecord {
        sid: sid.to_string(),
        from: from.to_string(),
        to: "08047361499".to_string(),
        direction,
        status,
        duration_secs,
        started_at: Utc.with_ymd_and_hms(2025, 10, 20, 9, 30, 0).unwrap(),
    }
}

pub(crate) fn incoming(sid: &str, from: &str) -> CallRecord {
    call(sid, from, Direction::Incoming, CallStatus::Answered, 60)
}
