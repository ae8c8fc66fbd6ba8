//! Tenant lookup across the live and historical datasets.
//!
//! The live dataset always wins: a number present in both is reported as a
//! live match. Datastore failures propagate as `LookupUnavailable` and are
//! never turned into enquiry results.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use calls_core::{
    Error, LookupResult, MatchedSource, NormalizedPhoneNumber, PhoneNormalizer, Result,
    TenantSource,
};
use telemetry::metrics;
use tracing::debug;

/// Lookup service over two ordered tenant sources.
#[derive(Clone)]
pub struct TenantLookup {
    normalizer: PhoneNormalizer,
    live: Arc<dyn TenantSource>,
    historical: Arc<dyn TenantSource>,
}

impl TenantLookup {
    /// Builds the service; the sources must report the tier they are used for.
    pub fn new(
        normalizer: PhoneNormalizer,
        live: Arc<dyn TenantSource>,
        historical: Arc<dyn TenantSource>,
    ) -> Result<Self> {
        if live.tier() != MatchedSource::Live {
            return Err(Error::config(format!(
                "live slot given a {} source",
                live.tier().as_str()
            )));
        }
        if historical.tier() != MatchedSource::Historical {
            return Err(Error::config(format!(
                "historical slot given a {} source",
                historical.tier().as_str()
            )));
        }
        Ok(Self {
            normalizer,
            live,
            historical,
        })
    }

    pub fn normalizer(&self) -> &PhoneNormalizer {
        &self.normalizer
    }

    /// Sources in precedence order.
    fn tiers(&self) -> [&dyn TenantSource; 2] {
        [self.live.as_ref(), self.historical.as_ref()]
    }

    /// Looks up one number. Unparseable input is an enquiry.
    pub async fn lookup(&self, raw: &str) -> Result<LookupResult> {
        match self.normalizer.normalize(raw) {
            Ok(key) => self.lookup_key(&key).await,
            Err(Error::InvalidInput { message, .. }) => {
                metrics().invalid_numbers.inc();
                debug!(reason = %message, "Unparseable caller number treated as enquiry");
                Ok(LookupResult::enquiry())
            }
            Err(e) => Err(e),
        }
    }

    /// Like `lookup`, but rejects input with no digits.
    pub async fn lookup_strict(&self, raw: &str) -> Result<LookupResult> {
        let key = self.normalizer.normalize(raw)?;
        self.lookup_key(&key).await
    }

    async fn lookup_key(&self, key: &NormalizedPhoneNumber) -> Result<LookupResult> {
        metrics().single_lookups.inc();

        for source in self.tiers() {
            if let Some(meta) = source.find(key).await? {
                record_hit(source.tier());
                return Ok(LookupResult::matched(source.tier(), meta));
            }
        }

        metrics().enquiry_misses.inc();
        Ok(LookupResult::enquiry())
    }

    /// Looks up many numbers with one query per dataset.
    ///
    /// Every input string gets an entry in the result, keyed by the string
    /// exactly as given.
    pub async fn lookup_many<I, S>(&self, raws: I) -> Result<HashMap<String, LookupResult>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keyed: Vec<(String, Option<NormalizedPhoneNumber>)> = Vec::new();
        let mut distinct: BTreeSet<NormalizedPhoneNumber> = BTreeSet::new();

        for raw in raws {
            let raw = raw.as_ref();
            let key = match self.normalizer.normalize(raw) {
                Ok(key) => {
                    distinct.insert(key.clone());
                    Some(key)
                }
                Err(Error::InvalidInput { .. }) => {
                    metrics().invalid_numbers.inc();
                    None
                }
                Err(e) => return Err(e),
            };
            keyed.push((raw.to_string(), key));
        }

        let keys: Vec<NormalizedPhoneNumber> = distinct.into_iter().collect();
        metrics().batch_lookups.inc();
        metrics().numbers_looked_up.inc_by(keys.len() as u64);

        let (live_hits, historical_hits) = if keys.is_empty() {
            (HashMap::new(), HashMap::new())
        } else {
            tokio::try_join!(
                self.live.find_many(&keys),
                self.historical.find_many(&keys)
            )?
        };

        let mut tier_counts = [0u64; 3];
        let mut results = HashMap::with_capacity(keyed.len());
        for (raw, key) in keyed {
            let result = match key {
                Some(key) => {
                    if let Some(meta) = live_hits.get(&key) {
                        LookupResult::matched(MatchedSource::Live, meta.clone())
                    } else if let Some(meta) = historical_hits.get(&key) {
                        LookupResult::matched(MatchedSource::Historical, meta.clone())
                    } else {
                        LookupResult::enquiry()
                    }
                }
                None => LookupResult::enquiry(),
            };
            if !results.contains_key(&raw) {
                tier_counts[result.matched_source as usize] += 1;
            }
            results.insert(raw, result);
        }

        let m = metrics();
        m.live_hits.inc_by(tier_counts[MatchedSource::Live as usize]);
        m.historical_hits
            .inc_by(tier_counts[MatchedSource::Historical as usize]);
        m.enquiry_misses
            .inc_by(tier_counts[MatchedSource::None as usize]);

        debug!(
            numbers = results.len(),
            distinct_keys = keys.len(),
            live = tier_counts[MatchedSource::Live as usize],
            historical = tier_counts[MatchedSource::Historical as usize],
            enquiry = tier_counts[MatchedSource::None as usize],
            "Batch tenant lookup complete"
        );

        Ok(results)
    }
}

fn record_hit(tier: MatchedSource) {
    match tier {
        MatchedSource::Live => metrics().live_hits.inc(),
        MatchedSource::Historical => metrics().historical_hits.inc(),
        MatchedSource::None => metrics().enquiry_misses.inc(),
    }
}
