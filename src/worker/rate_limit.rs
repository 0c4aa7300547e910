use std::time::Duration;

use tokio::time::Instant;

/// Configuration for upstream request pacing.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiterConfig {
    /// Minimum gap between the start of two consecutive requests.
    pub request_spacing: Duration,
    /// Cooldown applied after the upstream API answers with a rate limit.
    pub rate_limit_backoff: Duration,
}

impl RateLimiterConfig {
    pub fn new(request_spacing: Duration, rate_limit_backoff: Duration) -> Self {
        Self {
            request_spacing,
            rate_limit_backoff,
        }
    }
}

/// Counters describing upstream traffic since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatewayStats {
    pub total_requests: u64,
    pub rate_limit_hits: u64,
}

/// Request pacing state.
///
/// Tracks when the last request was issued and until when the upstream rate limit
/// cooldown lasts. All methods take the current instant explicitly.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    last_request: Option<Instant>,
    limited_until: Option<Instant>,
    stats: GatewayStats,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            last_request: None,
            limited_until: None,
            stats: GatewayStats::default(),
        }
    }

    /// Time to wait before the next request may be issued.
    ///
    /// The longer of the remaining rate-limit cooldown and the remaining request spacing.
    pub fn wait_time(&self, now: Instant) -> Duration {
        let spacing = self
            .last_request
            .map(|last| (last + self.config.request_spacing).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO);

        spacing.max(self.cooldown_time(now))
    }

    /// Remaining rate-limit cooldown, ignoring request spacing.
    pub fn cooldown_time(&self, now: Instant) -> Duration {
        self.limited_until
            .map(|until| until.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }

    pub fn record_request(&mut self, now: Instant) {
        self.last_request = Some(now);
        self.stats.total_requests += 1;
    }

    /// Start a cooldown after a rate-limited response.
    pub fn record_rate_limited(&mut self, now: Instant) {
        self.limited_until = Some(now + self.config.rate_limit_backoff);
        self.stats.rate_limit_hits += 1;
    }

    pub fn stats(&self) -> GatewayStats {
        self.stats
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }
}
