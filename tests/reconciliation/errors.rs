//! Tests for lookup failures during a reconciliation pass.
//!
//! This module verifies that transport failures, API errors and rate limits never count
//! as not-found strikes, and that a missing alliance aborts the pass.

use std::time::{Duration, Instant};

use whiteout_control::{
    error::{ControlError, Error},
    service::reconciliation::ReconciliationConfig,
    worker::RateLimiterConfig,
};

use crate::util::mock::ScriptedPlayerSource;

use super::*;

/// Tests transport-level lookup failures.
///
/// Expected: Listed as connection issues, no strikes and no check failures
#[tokio::test]
async fn connection_errors_never_strike() -> Result<(), TestError> {
    let test = build_alliance(2).await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_default(
        1001,
        FetchResult::Error("Connection reset by peer".to_string()),
    );
    harness
        .source
        .set_default(1002, FetchResult::Error("request TIMEOUT".to_string()));

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    assert_eq!(summary.connection_issues, vec![1001, 1002]);
    assert!(summary.check_failures.is_empty());
    assert_eq!(summary.checked_members, 2);

    let tracker = InvalidIdTracker::new(&test.db);
    assert_eq!(tracker.get_count(1001).await?, 0);
    assert_eq!(tracker.get_count(1002).await?, 0);

    Ok(())
}

/// Tests API errors that are not transport failures.
///
/// Expected: Reported as a check failure carrying the message, member left untouched
#[tokio::test]
async fn api_errors_become_check_failures() -> Result<(), TestError> {
    let test = build_alliance(1).await?;

    let harness = ControlHarness::new(&test.db);
    harness
        .source
        .set_default(1001, FetchResult::Error("invalid sign".to_string()));

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    assert!(summary.connection_issues.is_empty());
    assert_eq!(summary.check_failures.len(), 1);
    assert_eq!(summary.check_failures[0].fid, 1001);
    assert_eq!(summary.check_failures[0].message, "invalid sign");
    assert_eq!(InvalidIdTracker::new(&test.db).get_count(1001).await?, 0);
    assert!(MemberRepository::new(&test.db)
        .find_by_fid(1001)
        .await?
        .is_some());

    Ok(())
}

/// Tests a single rate-limited lookup.
///
/// Verifies that the engine backs off and retries exactly once, and that the retried
/// result is applied like any other.
///
/// Expected: Two upstream calls, one furnace change, back-off recorded
#[tokio::test]
async fn retries_once_after_rate_limit() -> Result<(), TestError> {
    let test = build_alliance(1).await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.push_response(1001, FetchResult::RateLimited);
    harness.source.set_player(PlayerData {
        furnace_level: 31,
        ..live_player(1001)
    });

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    assert_eq!(harness.source.call_count(1001), 2);
    assert_eq!(summary.furnace_changes.len(), 1);
    assert!(summary.check_failures.is_empty());
    assert!(summary.rate_limit_backoff > Duration::ZERO);
    assert!(!summary.rate_limit_exhausted);

    let stats = harness.gateway.stats().await;
    assert_eq!(stats.total_requests, 2);
    assert_eq!(stats.rate_limit_hits, 1);

    Ok(())
}

/// Tests a lookup that is still rate limited after the retry.
///
/// Expected: Reported as a check failure without a strike, no third attempt
#[tokio::test]
async fn persistent_rate_limit_is_a_check_failure() -> Result<(), TestError> {
    let test = build_alliance(1).await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_default(1001, FetchResult::RateLimited);

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    assert_eq!(harness.source.call_count(1001), 2);
    assert_eq!(summary.check_failures.len(), 1);
    assert_eq!(InvalidIdTracker::new(&test.db).get_count(1001).await?, 0);

    Ok(())
}

/// Tests a pass whose rate-limit back-off budget is exhausted.
///
/// Verifies that once the budget is spent the pass stops sleeping on the gateway cooldown,
/// skipping the lookups that would have to wait instead.
///
/// Expected: No retry, no lookups during the cooldown, the pass returns long before the
/// cooldown ends and every member is reported as a check failure
#[tokio::test]
async fn exhausted_backoff_budget_skips_retry() -> Result<(), TestError> {
    let test = build_alliance(3).await?;

    let harness = ControlHarness::with_limits(
        &test.db,
        ScriptedPlayerSource::new(),
        ReconciliationConfig::new(Some(ADMIN_ID), Some(Duration::ZERO)),
        RateLimiterConfig::new(Duration::ZERO, Duration::from_secs(2)),
    );
    harness.source.set_default(1001, FetchResult::RateLimited);
    harness.source.set_default(1002, FetchResult::RateLimited);
    harness.source.set_unchanged([1003]);

    let started = Instant::now();
    let summary = harness.reconciliation.run(&request(), None).await.unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(1), "pass slept for {:?}", elapsed);
    assert!(summary.rate_limit_exhausted);
    assert_eq!(summary.rate_limit_backoff, Duration::ZERO);
    assert_eq!(harness.source.calls(), vec![1001]);
    assert_eq!(summary.check_failures.len(), 3);
    assert_eq!(summary.checked_members, 3);

    Ok(())
}

/// Tests a budget that covers exactly one cooldown.
///
/// Expected: The first member is retried after the cooldown, the recorded back-off stays
/// within the budget and later members are skipped instead of waiting again
#[tokio::test]
async fn backoff_budget_bounds_recorded_wait() -> Result<(), TestError> {
    let test = build_alliance(3).await?;

    let budget = Duration::from_millis(250);
    let harness = ControlHarness::with_limits(
        &test.db,
        ScriptedPlayerSource::new(),
        ReconciliationConfig::new(Some(ADMIN_ID), Some(budget)),
        RateLimiterConfig::new(Duration::ZERO, Duration::from_millis(200)),
    );
    harness.source.set_default(1001, FetchResult::RateLimited);
    harness.source.set_default(1002, FetchResult::RateLimited);
    harness.source.set_unchanged([1003]);

    let started = Instant::now();
    let summary = harness.reconciliation.run(&request(), None).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(harness.source.calls(), vec![1001, 1001]);
    assert!(summary.rate_limit_exhausted);
    assert!(summary.rate_limit_backoff > Duration::ZERO);
    assert!(summary.rate_limit_backoff <= budget);
    assert!(elapsed < Duration::from_secs(1), "pass slept for {:?}", elapsed);
    assert_eq!(summary.check_failures.len(), 3);

    Ok(())
}

/// Tests a pass for an alliance that doesn't exist.
///
/// Expected: Err(AllianceNotFound) without any upstream lookup
#[tokio::test]
async fn fails_for_unknown_alliance() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let harness = ControlHarness::new(&test.db);
    let result = harness
        .reconciliation
        .run(&CheckRequest::new(42, None), None)
        .await;

    assert!(matches!(
        result,
        Err(Error::ControlError(ControlError::AllianceNotFound(42)))
    ));
    assert!(harness.source.calls().is_empty());

    Ok(())
}

/// Tests an alliance without a settings row.
///
/// Expected: The pass runs with transfer handling disabled
#[tokio::test]
async fn runs_without_control_settings() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_alliance(ALLIANCE_ID)
        .with_member(1001, ALLIANCE_ID)
        .build()
        .await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_player(PlayerData {
        kid: 202,
        ..live_player(1001)
    });

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    assert_eq!(summary.transfer_notices.len(), 1);
    assert!(!summary.transfer_notices[0].removed);

    Ok(())
}
