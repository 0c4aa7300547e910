use std::time::Duration;

/// Maximum time to wait for the worker to finish its current job on shutdown.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the request queue.
#[derive(Debug, Clone)]
pub struct RequestQueueConfig {
    /// How long `stop` waits for the worker before giving up on it.
    ///
    /// The worker is never preempted mid-pass; a pass still running after the timeout keeps
    /// running in the background.
    pub shutdown_timeout: Duration,
}

impl RequestQueueConfig {
    pub fn new() -> Self {
        Self {
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl Default for RequestQueueConfig {
    fn default() -> Self {
        Self::new()
    }
}
