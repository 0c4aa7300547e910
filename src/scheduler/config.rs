use std::time::Duration;

/// Cron expression for the settings monitor.
/// Runs at second 0 of every minute.
pub const MONITOR_CRON_EXPRESSION: &str = "0 * * * * *";

/// Delay between two task launches within one monitor pass.
pub const LAUNCH_STAGGER: Duration = Duration::from_millis(500);

/// Retry delay when the report channel of an alliance can't be resolved.
pub const CHANNEL_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Retry delay after a failed scheduled check.
pub const ITERATION_ERROR_DELAY: Duration = Duration::from_secs(60);
