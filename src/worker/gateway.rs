use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::Instant};

use crate::{
    collaborator::PlayerSource,
    model::player::FetchResult,
    worker::rate_limit::{GatewayStats, RateLimiter, RateLimiterConfig},
};

/// Outcome of a lookup bounded by a cooldown allowance.
#[derive(Debug, Clone, PartialEq)]
pub enum GatedFetch {
    /// The lookup ran after sitting out `cooldown` of rate-limit cooldown.
    Fetched { result: FetchResult, cooldown: Duration },
    /// The remaining cooldown exceeded the allowance; nothing was sent upstream.
    Deferred { cooldown: Duration },
}

/// Single-flight, rate-aware gateway to the upstream player API.
///
/// The limiter lock is held for the whole duration of an upstream call, which serializes
/// every lookup system-wide. Before each call the gateway waits out the request spacing
/// and any rate-limit cooldown still in effect.
pub struct PlayerGateway {
    source: Arc<dyn PlayerSource>,
    limiter: Mutex<RateLimiter>,
}

impl PlayerGateway {
    pub fn new(source: Arc<dyn PlayerSource>, config: RateLimiterConfig) -> Self {
        Self {
            source,
            limiter: Mutex::new(RateLimiter::new(config)),
        }
    }

    /// Fetch the live state of a single player.
    ///
    /// A `RateLimited` answer starts the cooldown reported by `get_wait_time`; callers are
    /// expected to sleep for that long and retry once.
    pub async fn fetch_player(&self, fid: i64) -> FetchResult {
        match self.fetch_player_within(fid, None).await {
            GatedFetch::Fetched { result, .. } => result,
            GatedFetch::Deferred { .. } => FetchResult::RateLimited,
        }
    }

    /// Fetch a player unless the remaining rate-limit cooldown exceeds `allowance`.
    ///
    /// The cooldown check and the wait happen under the limiter lock, so no other lookup can
    /// extend the cooldown in between. `None` waits out any cooldown.
    pub async fn fetch_player_within(&self, fid: i64, allowance: Option<Duration>) -> GatedFetch {
        let mut limiter = self.limiter.lock().await;

        let now = Instant::now();
        let cooldown = limiter.cooldown_time(now);
        if allowance.is_some_and(|allowance| cooldown > allowance) {
            return GatedFetch::Deferred { cooldown };
        }

        let wait = limiter.wait_time(now);
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }

        limiter.record_request(Instant::now());
        let result = self.source.fetch_player(fid).await;

        if result == FetchResult::RateLimited {
            tracing::warn!(
                "Upstream rate limit hit while fetching player {}, cooling down for {}s",
                fid,
                limiter.config().rate_limit_backoff.as_secs()
            );
            limiter.record_rate_limited(Instant::now());
        }

        GatedFetch::Fetched { result, cooldown }
    }

    /// Time a caller should back off before retrying after a rate-limited answer.
    pub async fn get_wait_time(&self) -> Duration {
        self.limiter.lock().await.wait_time(Instant::now())
    }

    pub async fn stats(&self) -> GatewayStats {
        self.limiter.lock().await.stats()
    }
}
