//! Reconciliation engine.
//!
//! A pass loads the roster of one alliance, fetches every member from the upstream API in
//! batches of `BATCH_SIZE`, applies detected changes to the roster and classifies
//! anomalies. Members that reached the not-found strike threshold are only removed after the
//! whole roster was checked and the `BulkRemovalGuard` allowed it.
//!
//! Every read-modify-write on the roster or the strike tracker runs inside a transaction
//! while holding the process-wide roster lock. Failures are caught per member and end up
//! in the summary; only failing to load the alliance itself aborts a pass.

pub mod config;
mod member;
mod removal;

pub use config::ReconciliationConfig;

use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use tokio::{sync::Mutex, time::Instant};

use crate::{
    collaborator::{ControlReporter, NotificationSink},
    data::{alliance::AllianceRepository, member::MemberRepository},
    error::{ControlError, Error},
    model::{
        job::CheckRequest,
        summary::{CheckProgress, ReconciliationSummary},
    },
    worker::gateway::PlayerGateway,
};

use self::{config::BATCH_SIZE, removal::RemovalCandidate};

/// Mutable state of a single pass.
struct PassState {
    summary: ReconciliationSummary,
    removal_candidates: Vec<RemovalCandidate>,
}

pub struct ReconciliationService {
    db: DatabaseConnection,
    gateway: Arc<PlayerGateway>,
    notifier: Option<Arc<dyn NotificationSink>>,
    config: ReconciliationConfig,
    roster_lock: Arc<Mutex<()>>,
}

impl ReconciliationService {
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<PlayerGateway>,
        notifier: Option<Arc<dyn NotificationSink>>,
        config: ReconciliationConfig,
    ) -> Self {
        Self {
            db,
            gateway,
            notifier,
            config,
            roster_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run a reconciliation pass for one alliance.
    ///
    /// Progress is reported after every member batch when both a reporter and a channel are
    /// available.
    ///
    /// # Returns
    /// - `Ok(ReconciliationSummary)` - Pass completed, possibly with per-member failures
    /// - `Err(Error::ControlError(AllianceNotFound))` - Alliance doesn't exist
    /// - `Err(Error::DbErr)` - Loading the alliance or its roster failed
    pub async fn run(
        &self,
        request: &CheckRequest,
        reporter: Option<&dyn ControlReporter>,
    ) -> Result<ReconciliationSummary, Error> {
        let started = Instant::now();
        let alliance_id = request.alliance_id;

        let settings = AllianceRepository::new(&self.db)
            .get_control_settings(alliance_id)
            .await?
            .ok_or(ControlError::AllianceNotFound(alliance_id))?;
        let members = MemberRepository::new(&self.db)
            .get_by_alliance(alliance_id)
            .await?;

        tracing::info!(
            "Starting control pass for alliance {} ({}) with {} member(s)",
            alliance_id,
            settings.alliance_name,
            members.len()
        );

        let mut summary = ReconciliationSummary::new(
            alliance_id,
            settings.alliance_name.clone(),
            members.len(),
        );
        summary.batch = request.batch;

        let mut pass = PassState {
            summary,
            removal_candidates: Vec::new(),
        };

        let batch_count = members.len().div_ceil(BATCH_SIZE);

        for (index, batch) in members.chunks(BATCH_SIZE).enumerate() {
            for member in batch {
                self.check_member(&settings, member, &mut pass).await;
            }

            tracing::debug!(
                "Alliance {}: batch {}/{} done, {}/{} member(s) checked",
                alliance_id,
                index + 1,
                batch_count,
                pass.summary.checked_members,
                pass.summary.total_members
            );

            if let (Some(reporter), Some(channel_id)) = (reporter, request.channel_id) {
                let progress = CheckProgress {
                    alliance_id,
                    checked: pass.summary.checked_members,
                    total: pass.summary.total_members,
                    batch: index + 1,
                    batch_count,
                };

                reporter.progress(channel_id, &progress).await;
            }
        }

        self.apply_removals(&mut pass).await;

        let mut summary = pass.summary;
        summary.duration = started.elapsed();

        tracing::info!(
            "Finished control pass for alliance {} in {:.1}s: {} change(s), {} removal(s), {} connection issue(s), {} check failure(s)",
            alliance_id,
            summary.duration.as_secs_f64(),
            summary.change_count(),
            summary.removed_count(),
            summary.connection_issues.len(),
            summary.check_failures.len()
        );

        Ok(summary)
    }

    /// Back-off still available to this pass, `None` when unbounded.
    fn remaining_backoff(&self, spent: Duration) -> Option<Duration> {
        self.config
            .max_backoff_per_pass
            .map(|max| max.saturating_sub(spent))
    }
}
