use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_REQUEST_SPACING_MS: u64 = 2000;
const DEFAULT_RATE_LIMIT_BACKOFF_SECS: u64 = 60;

pub struct Config {
    pub database_url: String,
    /// User notified when a transfer triggers an automatic removal.
    pub global_admin_id: Option<i64>,
    pub request_spacing: Duration,
    pub rate_limit_backoff: Duration,
    /// Cap on rate-limit back-off accumulated by a single reconciliation pass.
    pub max_backoff_per_pass: Option<Duration>,
}

impl Config {
    /// Load a `.env` file if present, then read configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let global_admin_id = parse_optional::<i64>(&lookup, "CONTROL_GLOBAL_ADMIN_ID")?;
        let request_spacing_ms = parse_optional::<u64>(&lookup, "CONTROL_REQUEST_SPACING_MS")?
            .unwrap_or(DEFAULT_REQUEST_SPACING_MS);
        let rate_limit_backoff_secs =
            parse_optional::<u64>(&lookup, "CONTROL_RATE_LIMIT_BACKOFF_SECS")?
                .unwrap_or(DEFAULT_RATE_LIMIT_BACKOFF_SECS);
        let max_backoff_per_pass =
            parse_optional::<u64>(&lookup, "CONTROL_MAX_BACKOFF_PER_PASS_SECS")?
                .map(Duration::from_secs);

        Ok(Self {
            database_url,
            global_admin_id,
            request_spacing: Duration::from_millis(request_spacing_ms),
            rate_limit_backoff: Duration::from_secs(rate_limit_backoff_secs),
            max_backoff_per_pass,
        })
    }
}

fn parse_optional<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
    }
}
