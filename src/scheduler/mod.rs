//! Scheduler for periodic alliance control.
//!
//! Keeps exactly one live control task per alliance with a positive interval and a report
//! channel. A cron job re-reads the persisted settings once per minute and starts, restarts
//! or retires tasks so that running tasks always match the current settings. A task is
//! restarted rather than updated in place so that its initial delay is recomputed.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    data::alliance::AllianceRepository,
    error::Error,
    model::settings::{ControlSettings, ScheduleKey},
};

pub mod config;
pub mod runner;
pub mod schedule;
mod task;

pub use runner::{AllianceCheckRunner, QueuedCheckRunner};

use self::{
    config::{LAUNCH_STAGGER, MONITOR_CRON_EXPRESSION},
    task::ScheduledTask,
};

/// Task changes made by one settings synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub started: Vec<i32>,
    /// Alliances whose task was replaced because its settings changed.
    pub restarted: Vec<i32>,
    /// Alliances whose task was stopped because control was disabled or the alliance removed.
    pub retired: Vec<i32>,
    pub unchanged: Vec<i32>,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !self.started.is_empty() || !self.restarted.is_empty() || !self.retired.is_empty()
    }
}

/// Supervisor of the per-alliance control tasks.
#[derive(Clone)]
pub struct ControlScheduler {
    inner: Arc<ControlSchedulerRef>,
}

struct ControlSchedulerRef {
    db: DatabaseConnection,
    runner: Arc<dyn AllianceCheckRunner>,
    tasks: Mutex<HashMap<i32, ScheduledTask>>,
    /// Serializes synchronizations; `tasks` is only locked briefly while one runs.
    sync: Mutex<()>,
    sched: Mutex<Option<JobScheduler>>,
}

impl ControlScheduler {
    /// Creates a new instance of [`ControlScheduler`].
    ///
    /// # Arguments
    /// - `db` - Database connection the settings are read from
    /// - `runner` - Performs the scheduled checks
    pub fn new(db: DatabaseConnection, runner: Arc<dyn AllianceCheckRunner>) -> Self {
        Self {
            inner: Arc::new(ControlSchedulerRef {
                db,
                runner,
                tasks: Mutex::new(HashMap::new()),
                sync: Mutex::new(()),
                sched: Mutex::new(None),
            }),
        }
    }

    /// Synchronizes tasks with the current settings and starts the monitor job.
    ///
    /// This method is idempotent - calling it when already running logs a warning and returns Ok.
    ///
    /// # Returns
    /// - `Ok(())` - Initial synchronization done and monitor job running
    /// - `Err(Error)` - Failed to read settings or to start the cron scheduler
    pub async fn start(&self) -> Result<(), Error> {
        let mut sched_slot = self.inner.sched.lock().await;

        if sched_slot.is_some() {
            tracing::warn!("Control scheduler is already running");
            return Ok(());
        }

        let report = self.monitor_alliance_changes().await?;
        tracing::info!(
            "Control scheduler started with {} active alliance task(s)",
            report.started.len() + report.restarted.len() + report.unchanged.len()
        );

        let sched = JobScheduler::new().await?;
        let scheduler = self.clone();

        sched
            .add(Job::new_async(MONITOR_CRON_EXPRESSION, move |_, _| {
                let scheduler = scheduler.clone();

                Box::pin(async move {
                    match scheduler.monitor_alliance_changes().await {
                        Ok(report) if report.has_changes() => tracing::info!(
                            "Control settings changed: {} started, {} restarted, {} retired",
                            report.started.len(),
                            report.restarted.len(),
                            report.retired.len()
                        ),
                        Ok(_) => {}
                        Err(e) => tracing::error!("Error monitoring control settings: {:?}", e),
                    }
                })
            })?)
            .await?;

        sched.start().await?;
        *sched_slot = Some(sched);

        Ok(())
    }

    /// Re-read the persisted settings and reconcile running tasks with them.
    pub async fn monitor_alliance_changes(&self) -> Result<SyncReport, Error> {
        let settings = AllianceRepository::new(&self.inner.db)
            .get_all_control_settings()
            .await?;

        Ok(self.apply_settings(settings).await)
    }

    /// Reconcile running tasks with the given settings.
    ///
    /// Tasks of alliances that are missing, disabled or without a channel are retired. Tasks
    /// whose channel, interval or start time changed are cancelled and replaced. Launches are
    /// staggered by `LAUNCH_STAGGER` without holding the task map, so readers such as
    /// `active_alliances` are not blocked while a sync is in progress.
    pub async fn apply_settings(&self, settings: Vec<ControlSettings>) -> SyncReport {
        let desired: BTreeMap<i32, ScheduleKey> = settings
            .iter()
            .filter_map(|s| s.schedule_key().map(|key| (s.alliance_id, key)))
            .collect();

        let _sync = self.inner.sync.lock().await;
        let mut report = SyncReport::default();
        let mut launches = Vec::new();

        {
            let mut tasks = self.inner.tasks.lock().await;

            let mut retired: Vec<i32> = tasks
                .keys()
                .filter(|alliance_id| !desired.contains_key(alliance_id))
                .copied()
                .collect();
            retired.sort_unstable();

            for alliance_id in retired {
                if let Some(task) = tasks.remove(&alliance_id) {
                    task.cancel();
                    tracing::info!("Stopping control task for alliance {}", alliance_id);
                    report.retired.push(alliance_id);
                }
            }

            for (alliance_id, key) in desired {
                let current = tasks
                    .get(&alliance_id)
                    .map(|task| task.key == key && !task.is_finished());

                match current {
                    Some(true) => {
                        report.unchanged.push(alliance_id);
                        continue;
                    }
                    Some(false) => {
                        if let Some(task) = tasks.remove(&alliance_id) {
                            task.cancel();
                        }
                        tracing::info!(
                            "Control settings of alliance {} changed, restarting its task",
                            alliance_id
                        );
                        report.restarted.push(alliance_id);
                    }
                    None => report.started.push(alliance_id),
                }

                launches.push((alliance_id, key));
            }
        }

        for (index, (alliance_id, key)) in launches.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(LAUNCH_STAGGER).await;
            }

            let task = ScheduledTask::spawn(alliance_id, key, Arc::clone(&self.inner.runner));
            self.inner.tasks.lock().await.insert(alliance_id, task);
        }

        report
    }

    /// IDs of alliances with a live control task, ascending.
    pub async fn active_alliances(&self) -> Vec<i32> {
        let mut alliance_ids: Vec<i32> = self.inner.tasks.lock().await.keys().copied().collect();
        alliance_ids.sort_unstable();
        alliance_ids
    }

    /// Parameters the alliance's live task runs with.
    pub async fn scheduled_key(&self, alliance_id: i32) -> Option<ScheduleKey> {
        self.inner
            .tasks
            .lock()
            .await
            .get(&alliance_id)
            .map(|task| task.key)
    }

    /// Stops the monitor job and cancels every control task.
    pub async fn shutdown(&self) -> Result<(), Error> {
        if let Some(mut sched) = self.inner.sched.lock().await.take() {
            sched.shutdown().await?;
        }

        let _sync = self.inner.sync.lock().await;
        let mut tasks = self.inner.tasks.lock().await;
        let task_count = tasks.len();

        for (_, task) in tasks.drain() {
            task.cancel();
        }

        tracing::info!(
            "Control scheduler shut down ({} task(s) cancelled)",
            task_count
        );

        Ok(())
    }
}
