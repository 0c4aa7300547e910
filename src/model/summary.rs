//! Structured results of a reconciliation pass.
//!
//! These types are handed to the presentation layer through `ControlReporter`. They carry
//! raw values plus pre-rendered furnace labels; no formatting for any particular chat
//! platform happens here.

use std::time::Duration;

use serde::Serialize;

use crate::model::job::BatchInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FurnaceChange {
    pub fid: i64,
    pub nickname: String,
    pub old_level: i32,
    pub new_level: i32,
    /// Display label for `old_level`, e.g. `FC 1`.
    pub old_label: String,
    pub new_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NicknameChange {
    pub fid: i64,
    pub old_nickname: String,
    pub new_nickname: String,
}

/// A member whose home state changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferNotice {
    pub fid: i64,
    pub nickname: String,
    pub old_kid: i32,
    pub new_kid: i32,
    /// Whether the member was deleted from the roster because of the transfer.
    pub removed: bool,
}

/// Final outcome for a member that reached the not-found strike threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RemovalDisposition {
    Removed,
    /// The bulk removal guard vetoed every removal of the pass.
    BlockedBySafetyTrigger,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidMemberNotice {
    pub fid: i64,
    pub nickname: String,
    pub fail_count: i32,
    pub disposition: RemovalDisposition,
}

/// A member that could not be checked during the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    pub fid: i64,
    pub nickname: String,
    pub message: String,
}

/// Outcome of the bulk removal guard for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuardDecision {
    pub total_members: usize,
    pub removals: usize,
    /// `removals / total_members`, 0.0 for an empty alliance.
    pub removal_percentage: f64,
    pub vetoed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationSummary {
    pub alliance_id: i32,
    pub alliance_name: String,
    pub batch: Option<BatchInfo>,
    pub total_members: usize,
    /// Members whose lookup completed, successfully or not.
    pub checked_members: usize,
    pub furnace_changes: Vec<FurnaceChange>,
    pub nickname_changes: Vec<NicknameChange>,
    pub transfer_notices: Vec<TransferNotice>,
    pub invalid_member_notices: Vec<InvalidMemberNotice>,
    /// Members whose lookup failed with a transport-level error.
    pub connection_issues: Vec<i64>,
    pub check_failures: Vec<CheckFailure>,
    /// Present when at least one member reached the removal threshold.
    pub guard: Option<GuardDecision>,
    /// Total time spent sleeping on rate-limit back-offs.
    pub rate_limit_backoff: Duration,
    /// The back-off budget ran out and later rate-limited members were not retried.
    pub rate_limit_exhausted: bool,
    pub duration: Duration,
}

impl ReconciliationSummary {
    pub fn new(alliance_id: i32, alliance_name: String, total_members: usize) -> Self {
        Self {
            alliance_id,
            alliance_name,
            batch: None,
            total_members,
            checked_members: 0,
            furnace_changes: Vec::new(),
            nickname_changes: Vec::new(),
            transfer_notices: Vec::new(),
            invalid_member_notices: Vec::new(),
            connection_issues: Vec::new(),
            check_failures: Vec::new(),
            guard: None,
            rate_limit_backoff: Duration::ZERO,
            rate_limit_exhausted: false,
            duration: Duration::ZERO,
        }
    }

    /// Number of detected roster changes.
    pub fn change_count(&self) -> usize {
        self.furnace_changes.len() + self.nickname_changes.len() + self.transfer_notices.len()
    }

    /// Whether the pass produced anything worth reporting.
    pub fn has_notices(&self) -> bool {
        self.change_count() > 0
            || !self.invalid_member_notices.is_empty()
            || !self.connection_issues.is_empty()
            || !self.check_failures.is_empty()
    }

    pub fn removed_count(&self) -> usize {
        self.invalid_member_notices
            .iter()
            .filter(|notice| notice.disposition == RemovalDisposition::Removed)
            .count()
            + self
                .transfer_notices
                .iter()
                .filter(|notice| notice.removed)
                .count()
    }
}

/// Progress update emitted after every member batch of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckProgress {
    pub alliance_id: i32,
    /// Members checked so far.
    pub checked: usize,
    pub total: usize,
    /// 1-based index of the member batch that just finished.
    pub batch: usize,
    pub batch_count: usize,
}
