//! Tests for the rate-aware player gateway.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinSet, time::Instant};
use whiteout_control::{
    collaborator::PlayerSource,
    model::player::FetchResult,
    worker::{GatedFetch, PlayerGateway, RateLimiterConfig},
};

use crate::util::{
    mock::{live_player, ScriptedPlayerSource},
    setup::fast_limits,
};

fn gateway(source: &Arc<ScriptedPlayerSource>, config: RateLimiterConfig) -> Arc<PlayerGateway> {
    Arc::new(PlayerGateway::new(
        source.clone() as Arc<dyn PlayerSource>,
        config,
    ))
}

/// Tests concurrent lookups through one gateway.
///
/// Expected: The upstream source never sees more than one request in flight
#[tokio::test]
async fn serializes_concurrent_lookups() {
    let source = Arc::new(ScriptedPlayerSource::with_delay(Duration::from_millis(20)));
    source.set_unchanged(1001..=1005);
    let gateway = gateway(&source, fast_limits());

    let mut lookups = JoinSet::new();
    for fid in 1001..=1005 {
        let gateway = gateway.clone();
        lookups.spawn(async move { gateway.fetch_player(fid).await });
    }

    while let Some(result) = lookups.join_next().await {
        assert!(matches!(result.unwrap(), FetchResult::Success(_)));
    }

    assert_eq!(source.max_in_flight(), 1);
    assert_eq!(source.calls().len(), 5);
    assert_eq!(gateway.stats().await.total_requests, 5);
}

/// Tests the minimum spacing between two lookups.
///
/// Expected: The second lookup starts no earlier than the configured spacing
#[tokio::test(start_paused = true)]
async fn spaces_consecutive_lookups() {
    let source = Arc::new(ScriptedPlayerSource::new());
    source.set_unchanged([1001, 1002]);
    let gateway = gateway(
        &source,
        RateLimiterConfig::new(Duration::from_secs(2), Duration::from_secs(60)),
    );

    let started = Instant::now();
    gateway.fetch_player(1001).await;
    assert!(started.elapsed() < Duration::from_secs(2));

    gateway.fetch_player(1002).await;
    assert!(started.elapsed() >= Duration::from_secs(2));
}

/// Tests the cooldown after a rate-limited answer.
///
/// Expected: Wait time equals the configured back-off and the hit is counted
#[tokio::test(start_paused = true)]
async fn reports_cooldown_after_rate_limit() {
    let source = Arc::new(ScriptedPlayerSource::new());
    source.push_response(1001, FetchResult::RateLimited);
    source.set_player(live_player(1001));
    let gateway = gateway(
        &source,
        RateLimiterConfig::new(Duration::ZERO, Duration::from_secs(60)),
    );

    assert_eq!(gateway.fetch_player(1001).await, FetchResult::RateLimited);
    assert_eq!(gateway.get_wait_time().await, Duration::from_secs(60));

    let stats = gateway.stats().await;
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.rate_limit_hits, 1);

    let started = Instant::now();
    assert!(matches!(
        gateway.fetch_player(1001).await,
        FetchResult::Success(_)
    ));
    assert!(started.elapsed() >= Duration::from_secs(60));
    assert_eq!(gateway.get_wait_time().await, Duration::ZERO);
}

/// Tests a bounded lookup while a cooldown is in effect.
///
/// Expected: Deferred without sleeping or calling upstream while the cooldown exceeds the
/// allowance, then fetched with the waited cooldown reported once the allowance covers it
#[tokio::test(start_paused = true)]
async fn defers_lookup_when_cooldown_exceeds_allowance() {
    let source = Arc::new(ScriptedPlayerSource::new());
    source.push_response(1001, FetchResult::RateLimited);
    source.set_player(live_player(1002));
    let gateway = gateway(
        &source,
        RateLimiterConfig::new(Duration::ZERO, Duration::from_secs(60)),
    );

    assert_eq!(gateway.fetch_player(1001).await, FetchResult::RateLimited);

    let started = Instant::now();
    assert_eq!(
        gateway
            .fetch_player_within(1002, Some(Duration::from_secs(30)))
            .await,
        GatedFetch::Deferred {
            cooldown: Duration::from_secs(60)
        }
    );
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(source.calls(), vec![1001]);

    let fetched = gateway
        .fetch_player_within(1002, Some(Duration::from_secs(60)))
        .await;
    assert!(matches!(
        fetched,
        GatedFetch::Fetched {
            result: FetchResult::Success(_),
            cooldown,
        } if cooldown == Duration::from_secs(60)
    ));
    assert!(started.elapsed() >= Duration::from_secs(60));
    assert_eq!(source.calls(), vec![1001, 1002]);
}
