//! End-to-end tests for classification.
//!
//! These tests validate the full data flow against in-memory datasets:
//! raw caller numbers → normalization → batch lookup → classified calls →
//! period summary.
//!
//! The MockTenantSource implements the same TenantSource trait as the
//! ClickHouse tables, so every production code path runs except the
//! datastore transport.

use call_analytics::{aggregate, classify, top_callers};
use calls_core::{CallCategory, MatchedSource};
use integration_tests::{
    fixtures::{self, current_week, period_calls, tenant_number},
    mocks::MockTenantSource,
    setup::MockContext,
};

fn seeded_context() -> MockContext {
    let live = MockTenantSource::live();
    let historical = MockTenantSource::historical();
    for i in 0..80 {
        live.add_tenant(&tenant_number(i), "live tenant");
    }
    for i in 80..120 {
        historical.add_tenant(&format!("+91{}", tenant_number(i)), "past tenant");
    }
    MockContext::new(live, historical)
}

/// 120 tenant calls and 50 unknown callers split 70.6% / 29.4%.
#[tokio::test]
async fn test_classify_and_aggregate_period() {
    let ctx = seeded_context();
    let calls = period_calls("cur", &current_week(), 120, 50);

    let classified = classify(&ctx.lookup, calls).await.expect("classification failed");
    assert_eq!(classified.len(), 170);
    assert!(
        classified.iter().all(|c| c.category.is_some()),
        "Every incoming call should be classified"
    );

    let live_hits = classified
        .iter()
        .filter(|c| c.matched_source == Some(MatchedSource::Live))
        .count();
    let historical_hits = classified
        .iter()
        .filter(|c| c.matched_source == Some(MatchedSource::Historical))
        .count();
    assert_eq!(live_hits, 80);
    assert_eq!(historical_hits, 40);

    let summary = aggregate(&classified).with_window(current_week());
    assert_eq!(summary.incoming_calls, 170);
    assert_eq!(summary.service_calls, 120);
    assert_eq!(summary.enquiry_calls, 50);

    let view = summary.rounded();
    assert_eq!(view.service_percentage, 70.6);
    assert_eq!(view.enquiry_percentage, 29.4);
}

/// A batch of any size costs one query per dataset.
#[tokio::test]
async fn test_batch_cost_is_bounded() {
    let ctx = seeded_context();
    let mut calls = period_calls("cur", &current_week(), 120, 50);
    // Repeat callers must not add lookups
    calls.extend(period_calls("again", &current_week(), 120, 50));

    classify(&ctx.lookup, calls).await.expect("classification failed");

    assert!(ctx.query_count() <= 2, "got {} queries", ctx.query_count());
    let queried = &ctx.live.captured_queries()[0];
    assert_eq!(queried.len(), 170, "Keys should be deduplicated after normalization");
}

/// A number in both datasets is a live match.
#[tokio::test]
async fn test_live_takes_precedence() {
    let live = MockTenantSource::live().with_tenant("9876543210", "current");
    let historical = MockTenantSource::historical().with_tenant("09876543210", "former");
    let ctx = MockContext::new(live, historical);

    let result = ctx.lookup.lookup("+91-98765-43210").await.unwrap();
    assert_eq!(result.matched_source, MatchedSource::Live);
    assert_eq!(
        result.metadata.and_then(|m| m.name).as_deref(),
        Some("current")
    );

    let calls = vec![fixtures::incoming_call("c1", "9876543210")];
    let classified = classify(&ctx.lookup, calls).await.unwrap();
    assert_eq!(classified[0].matched_source, Some(MatchedSource::Live));
}

/// Datastore failure aborts classification instead of producing enquiries.
#[tokio::test]
async fn test_unavailable_dataset_propagates() {
    let ctx = seeded_context();
    ctx.historical.set_should_fail(true);

    let calls = period_calls("cur", &current_week(), 3, 3);
    let err = classify(&ctx.lookup, calls)
        .await
        .expect_err("failure must not be masked");
    assert!(err.is_unavailable());
    assert_eq!(err.error_code(), Some("LOOKUP_001"));
}

/// Outgoing calls pass through and top callers only see incoming ones.
#[tokio::test]
async fn test_outgoing_calls_and_top_callers() {
    let ctx = seeded_context();
    let mut calls = vec![
        fixtures::incoming_call("a", &tenant_number(1)),
        fixtures::incoming_call("b", &tenant_number(1)),
        fixtures::incoming_call("c", &tenant_number(2)),
        fixtures::outgoing_call("d", &tenant_number(1)),
    ];
    calls.push(fixtures::incoming_call("e", "7000000009"));

    let classified = classify(&ctx.lookup, calls).await.unwrap();
    assert!(classified[3].category.is_none());

    let summary = aggregate(&classified);
    assert_eq!(summary.outgoing_calls, 1);
    assert_eq!(summary.service_calls, 3);
    assert_eq!(summary.enquiry_calls, 1);
    assert_eq!(summary.unique_callers, 3);
    assert_eq!(summary.repeat_callers, 1);

    let top = top_callers(&classified, CallCategory::Service, 5);
    assert_eq!(top[0].number, tenant_number(1));
    assert_eq!(top[0].calls, 2);
    assert_eq!(top.len(), 2);
}
