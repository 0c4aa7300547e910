//! FIFO request queue for alliance control jobs.
//!
//! This module provides the `RequestQueue`, a single background worker processing
//! `CheckRequest`s in submission order. Each enqueued job is answered through a oneshot
//! channel wrapped in a `JobTicket`. The queue also fronts the `PlayerGateway` so that
//! interactive callers can perform single lookups through the same rate-limited path.

mod config;

pub use config::RequestQueueConfig;

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    sync::{oneshot, Mutex, Notify, RwLock},
    task::JoinHandle,
    time::Instant,
};

use crate::{
    error::{ControlError, Error},
    model::{job::CheckRequest, player::FetchResult, summary::ReconciliationSummary},
    worker::{gateway::PlayerGateway, handler::ControlJobHandler},
};

type JobResult = Result<ReconciliationSummary, Error>;

/// A control job waiting in the queue.
struct QueuedJob {
    request: CheckRequest,
    responder: oneshot::Sender<JobResult>,
    enqueued_at: Instant,
}

/// Handle to an enqueued control job.
#[derive(Debug)]
pub struct JobTicket {
    /// 1-based position in the queue at submission time.
    pub position: usize,
    receiver: oneshot::Receiver<JobResult>,
}

impl JobTicket {
    /// Wait for the job to complete and return its summary.
    ///
    /// # Returns
    /// - `Ok(ReconciliationSummary)` - The pass completed
    /// - `Err(Error::ControlError(QueueStopped))` - The queue was stopped before the job ran
    /// - `Err(Error::ControlError(JobDropped))` - The job vanished without an answer
    /// - `Err(Error)` - The pass itself failed
    pub async fn wait(self) -> Result<ReconciliationSummary, Error> {
        self.receiver
            .await
            .map_err(|_| Error::from(ControlError::JobDropped))?
    }
}

/// Snapshot of the queue state for display to interactive callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueInfo {
    /// Jobs waiting to be processed, excluding the one in progress.
    pub queue_size: usize,
    pub is_processing: bool,
    pub total_requests: u64,
    pub rate_limit_hits: u64,
}

/// Request queue processing control jobs one at a time.
#[derive(Clone)]
pub struct RequestQueue {
    inner: Arc<RequestQueueRef>,
}

/// Internal request queue reference with configuration and runtime state.
struct RequestQueueRef {
    config: RequestQueueConfig,
    gateway: Arc<PlayerGateway>,
    handler: Arc<ControlJobHandler>,
    pending: Mutex<VecDeque<QueuedJob>>,
    job_available: Notify,
    shutdown: Notify,
    processing: AtomicBool,
    stopped: AtomicBool,
    worker_handle: RwLock<Option<JoinHandle<()>>>,
}

impl RequestQueue {
    /// Creates a new request queue.
    ///
    /// The queue is created in a stopped state; jobs enqueued before `start()` wait until the
    /// worker is started.
    ///
    /// # Arguments
    /// - `config` - Shutdown behavior
    /// - `gateway` - Rate-limited gateway shared with the reconciliation engine
    /// - `handler` - Handler executing control jobs
    pub fn new(
        config: RequestQueueConfig,
        gateway: Arc<PlayerGateway>,
        handler: ControlJobHandler,
    ) -> Self {
        Self {
            inner: Arc::new(RequestQueueRef {
                config,
                gateway,
                handler: Arc::new(handler),
                pending: Mutex::new(VecDeque::new()),
                job_available: Notify::new(),
                shutdown: Notify::new(),
                processing: AtomicBool::new(false),
                stopped: AtomicBool::new(false),
                worker_handle: RwLock::new(None),
            }),
        }
    }

    /// Starts the background worker.
    ///
    /// This method is idempotent - calling it when already running logs a warning and returns.
    pub async fn start(&self) {
        let mut handle = self.inner.worker_handle.write().await;

        if handle.is_some() {
            tracing::warn!("Request queue is already running");
            return;
        }

        self.inner.stopped.store(false, Ordering::SeqCst);
        *handle = Some(self.spawn_worker());

        tracing::info!("Request queue started");
    }

    fn spawn_worker(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tracing::debug!("Request queue worker started");

            loop {
                let job = tokio::select! {
                    // Shutdown is checked first so a stop request wins over pending work.
                    biased;

                    _ = inner.shutdown.notified() => {
                        tracing::debug!("Request queue worker received shutdown signal");
                        break;
                    }

                    job = Self::next_job(&inner) => job,
                };

                Self::execute_job(&inner, job).await;
            }

            tracing::debug!("Request queue worker stopped");
        })
    }

    async fn next_job(inner: &RequestQueueRef) -> QueuedJob {
        loop {
            if let Some(job) = inner.pending.lock().await.pop_front() {
                return job;
            }

            inner.job_available.notified().await;
        }
    }

    async fn execute_job(inner: &RequestQueueRef, job: QueuedJob) {
        tracing::debug!(
            "Starting {} after {:.1}s in queue",
            job.request,
            job.enqueued_at.elapsed().as_secs_f64()
        );

        inner.processing.store(true, Ordering::SeqCst);
        let result = inner.handler.handle(&job.request).await;
        inner.processing.store(false, Ordering::SeqCst);

        if job.responder.send(result).is_err() {
            tracing::debug!("Caller stopped waiting for {}", job.request);
        }
    }

    /// Enqueue a control job.
    ///
    /// Returns immediately; the job runs later in FIFO order. Jobs enqueued after `stop()` are
    /// answered with `ControlError::QueueStopped` right away.
    ///
    /// # Returns
    /// - `JobTicket` - Position at submission and a handle to await the summary
    pub async fn enqueue(&self, request: CheckRequest) -> JobTicket {
        let (responder, receiver) = oneshot::channel();

        if self.inner.stopped.load(Ordering::SeqCst) {
            let _ = responder.send(Err(ControlError::QueueStopped.into()));
            return JobTicket {
                position: 0,
                receiver,
            };
        }

        let position = {
            let mut pending = self.inner.pending.lock().await;
            tracing::debug!("Enqueued {} at position {}", request, pending.len() + 1);

            pending.push_back(QueuedJob {
                request,
                responder,
                enqueued_at: Instant::now(),
            });
            pending.len()
        };

        self.inner.job_available.notify_one();

        JobTicket { position, receiver }
    }

    /// Fetch a single player through the shared rate-limited gateway.
    pub async fn fetch_player(&self, fid: i64) -> FetchResult {
        self.inner.gateway.fetch_player(fid).await
    }

    /// Back-off a caller should apply after a rate-limited answer.
    pub async fn get_wait_time(&self) -> Duration {
        self.inner.gateway.get_wait_time().await
    }

    pub async fn get_queue_info(&self) -> QueueInfo {
        let queue_size = self.inner.pending.lock().await.len();
        let stats = self.inner.gateway.stats().await;

        QueueInfo {
            queue_size,
            is_processing: self.inner.processing.load(Ordering::SeqCst),
            total_requests: stats.total_requests,
            rate_limit_hits: stats.rate_limit_hits,
        }
    }

    /// Stops the background worker.
    ///
    /// The job in progress is allowed to finish; every job still waiting is answered with
    /// `ControlError::QueueStopped`. Waits up to the configured shutdown timeout for the worker
    /// to exit.
    ///
    /// This method is idempotent - calling it when already stopped returns immediately.
    pub async fn stop(&self) {
        let Some(handle) = self.inner.worker_handle.write().await.take() else {
            tracing::debug!("Request queue is already stopped");
            return;
        };

        tracing::info!("Shutting down request queue...");

        self.inner.stopped.store(true, Ordering::SeqCst);
        self.inner.shutdown.notify_one();

        match tokio::time::timeout(self.inner.config.shutdown_timeout, handle).await {
            Ok(Ok(())) => tracing::debug!("Request queue worker stopped cleanly"),
            Ok(Err(e)) => tracing::error!("Request queue worker panicked: {:?}", e),
            Err(_) => tracing::warn!("Request queue worker did not stop within timeout"),
        }

        let drained: Vec<QueuedJob> = self.inner.pending.lock().await.drain(..).collect();
        let drained_count = drained.len();

        for job in drained {
            let _ = job.responder.send(Err(ControlError::QueueStopped.into()));
        }

        tracing::info!(
            "Request queue shut down ({} pending job(s) cancelled)",
            drained_count
        );
    }

    pub async fn is_running(&self) -> bool {
        self.inner.worker_handle.read().await.is_some()
    }
}
