use sea_orm::DatabaseConnection;

use crate::{
    data::alliance::AllianceRepository,
    error::{ControlError, Error},
    model::{
        job::{BatchInfo, CheckRequest},
        summary::ReconciliationSummary,
    },
    worker::queue::{JobTicket, QueueInfo, RequestQueue},
};

/// Entry points for on-demand alliance control.
///
/// All checks go through the request queue, so interactive checks wait behind scheduled
/// ones and never bypass the upstream rate limit.
pub struct ControlService<'a> {
    db: &'a DatabaseConnection,
    queue: &'a RequestQueue,
}

impl<'a> ControlService<'a> {
    /// Creates a new instance of [`ControlService`]
    pub fn new(db: &'a DatabaseConnection, queue: &'a RequestQueue) -> Self {
        Self { db, queue }
    }

    /// Queue a control pass for one alliance.
    ///
    /// # Arguments
    /// - `alliance_id` - Alliance to check
    /// - `channel_id` - Channel progress is reported to, if any
    ///
    /// # Returns
    /// - `Ok(JobTicket)` - Job queued, ticket carries the queue position
    /// - `Err(Error::ControlError(AllianceNotFound))` - Alliance doesn't exist
    pub async fn check_alliance(
        &self,
        alliance_id: i32,
        channel_id: Option<i64>,
    ) -> Result<JobTicket, Error> {
        AllianceRepository::new(self.db)
            .find_by_id(alliance_id)
            .await?
            .ok_or(ControlError::AllianceNotFound(alliance_id))?;

        let ticket = self
            .queue
            .enqueue(CheckRequest::new(alliance_id, channel_id))
            .await;

        tracing::info!(
            "Queued control check for alliance {} at position {}",
            alliance_id,
            ticket.position
        );

        Ok(ticket)
    }

    /// Queue a control pass for every alliance, in alliance ID order.
    ///
    /// Each job carries its position within the run as `BatchInfo`.
    pub async fn check_all(&self, channel_id: Option<i64>) -> Result<Vec<JobTicket>, Error> {
        let alliance_ids = AllianceRepository::new(self.db).get_all_ids().await?;
        let total = alliance_ids.len();

        let mut tickets = Vec::with_capacity(total);

        for (index, alliance_id) in alliance_ids.into_iter().enumerate() {
            let request = CheckRequest::new(alliance_id, channel_id).with_batch(BatchInfo {
                current: index + 1,
                total,
            });

            tickets.push(self.queue.enqueue(request).await);
        }

        tracing::info!("Queued control checks for {} alliance(s)", total);

        Ok(tickets)
    }

    /// Queue a control pass and wait for its summary.
    pub async fn run_reconciliation(
        &self,
        request: CheckRequest,
    ) -> Result<ReconciliationSummary, Error> {
        self.queue.enqueue(request).await.wait().await
    }

    pub async fn get_queue_info(&self) -> QueueInfo {
        self.queue.get_queue_info().await
    }
}
