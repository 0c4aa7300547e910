use std::sync::Arc;

use crate::{
    collaborator::ControlReporter,
    error::Error,
    model::{job::CheckRequest, summary::ReconciliationSummary},
    service::reconciliation::ReconciliationService,
};

/// Handler for processing control jobs from the request queue
///
/// Runs a reconciliation pass for the requested alliance, forwarding per-batch progress to
/// the reporter when the request names a channel.
pub struct ControlJobHandler {
    reconciliation: Arc<ReconciliationService>,
    reporter: Option<Arc<dyn ControlReporter>>,
}

impl ControlJobHandler {
    pub fn new(
        reconciliation: Arc<ReconciliationService>,
        reporter: Option<Arc<dyn ControlReporter>>,
    ) -> Self {
        Self {
            reconciliation,
            reporter,
        }
    }

    pub async fn handle(&self, request: &CheckRequest) -> Result<ReconciliationSummary, Error> {
        tracing::debug!("Processing control job: {}", request);

        let summary = self
            .reconciliation
            .run(request, self.reporter.as_deref())
            .await
            .map_err(|e| {
                tracing::error!("Control job failed: {}, error: {:?}", request, e);
                e
            })?;

        tracing::debug!(
            "Control job completed: {} ({} change(s) in {:.1}s)",
            request,
            summary.change_count(),
            summary.duration.as_secs_f64()
        );

        Ok(summary)
    }
}
