use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    collaborator::ControlReporter,
    error::{ControlError, Error},
    model::job::CheckRequest,
    worker::queue::RequestQueue,
};

/// Performs one scheduled control check for an alliance.
#[async_trait]
pub trait AllianceCheckRunner: Send + Sync {
    async fn run_check(&self, alliance_id: i32, channel_id: i64) -> Result<(), Error>;
}

/// Runs scheduled checks through the request queue and delivers the summary to the
/// alliance's report channel.
pub struct QueuedCheckRunner {
    queue: RequestQueue,
    reporter: Arc<dyn ControlReporter>,
}

impl QueuedCheckRunner {
    pub fn new(queue: RequestQueue, reporter: Arc<dyn ControlReporter>) -> Self {
        Self { queue, reporter }
    }
}

#[async_trait]
impl AllianceCheckRunner for QueuedCheckRunner {
    async fn run_check(&self, alliance_id: i32, channel_id: i64) -> Result<(), Error> {
        if !self.reporter.channel_exists(channel_id).await {
            return Err(ControlError::ChannelUnavailable(channel_id).into());
        }

        let ticket = self
            .queue
            .enqueue(CheckRequest::new(alliance_id, Some(channel_id)))
            .await;
        let summary = ticket.wait().await?;

        self.reporter.report(channel_id, &summary).await
    }
}
