//! Control job definitions for the request queue.
//!
//! A `CheckRequest` describes one reconciliation pass over one alliance. Requests are
//! created by the control facade (check now / check all) and by the scheduler, and are
//! processed in FIFO order by the request queue's single worker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a job within a "check all alliances" run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInfo {
    /// 1-based index of this alliance within the run.
    pub current: usize,
    pub total: usize,
}

/// Request to reconcile the roster of one alliance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub alliance_id: i32,
    /// Channel progress updates are reported to, if any.
    pub channel_id: Option<i64>,
    /// Set when the request is part of a check-all run.
    pub batch: Option<BatchInfo>,
}

impl CheckRequest {
    pub fn new(alliance_id: i32, channel_id: Option<i64>) -> Self {
        Self {
            alliance_id,
            channel_id,
            batch: None,
        }
    }

    pub fn with_batch(mut self, batch: BatchInfo) -> Self {
        self.batch = Some(batch);
        self
    }
}

impl fmt::Display for CheckRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CheckAlliance(alliance_id: {}", self.alliance_id)?;

        if let Some(batch) = self.batch {
            write!(f, ", batch: {}/{}", batch.current, batch.total)?;
        }

        write!(f, ")")
    }
}
