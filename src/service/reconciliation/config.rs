use std::time::Duration;

/// Members checked between two progress reports.
pub const BATCH_SIZE: usize = 20;

/// Consecutive not-found results after which a member becomes a removal candidate.
pub const STRIKE_THRESHOLD: i32 = 3;

/// Alliances smaller than this are never protected by the bulk removal guard.
pub const GUARD_MIN_MEMBERS: usize = 5;

/// Share of the roster, in percent, that may be removed in a single pass.
pub const GUARD_MAX_REMOVAL_PERCENT: usize = 20;

/// Runtime configuration of the reconciliation engine.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationConfig {
    /// User notified when a transfer triggers an automatic removal.
    pub global_admin_id: Option<i64>,
    /// Cap on rate-limit back-off accumulated by a single pass, unbounded when `None`.
    pub max_backoff_per_pass: Option<Duration>,
}

impl ReconciliationConfig {
    pub fn new(global_admin_id: Option<i64>, max_backoff_per_pass: Option<Duration>) -> Self {
        Self {
            global_admin_id,
            max_backoff_per_pass,
        }
    }
}
