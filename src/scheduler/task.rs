use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use chrono::Utc;
use tokio::{sync::Notify, task::JoinHandle};

use crate::{
    error::{ControlError, Error},
    model::settings::ScheduleKey,
    scheduler::{
        config::{CHANNEL_RETRY_DELAY, ITERATION_ERROR_DELAY},
        runner::AllianceCheckRunner,
        schedule::initial_delay,
    },
};

/// Live periodic control task of one alliance.
///
/// Cancellation is cooperative: `cancel` clears the running flag and wakes the task, which
/// exits at its next sleep. A check already in progress is never interrupted.
pub(super) struct ScheduledTask {
    pub key: ScheduleKey,
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn spawn(alliance_id: i32, key: ScheduleKey, runner: Arc<dyn AllianceCheckRunner>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let wake = Arc::new(Notify::new());

        let handle = tokio::spawn(run_loop(
            alliance_id,
            key,
            runner,
            Arc::clone(&running),
            Arc::clone(&wake),
        ));

        Self {
            key,
            running,
            wake,
            handle,
        }
    }

    pub fn cancel(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.wake.notify_one();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run_loop(
    alliance_id: i32,
    key: ScheduleKey,
    runner: Arc<dyn AllianceCheckRunner>,
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
) {
    let delay = initial_delay(Utc::now(), key.start_time, key.interval());

    tracing::info!(
        "Scheduled control for alliance {} every {} minute(s), first check in {}s",
        alliance_id,
        key.interval_minutes,
        delay.as_secs()
    );

    if !sleep_while_running(delay, &running, &wake).await {
        tracing::info!("Control task for alliance {} stopped", alliance_id);
        return;
    }

    loop {
        let delay = match runner.run_check(alliance_id, key.channel_id).await {
            Ok(()) => key.interval(),
            Err(Error::ControlError(ControlError::ChannelUnavailable(channel_id))) => {
                tracing::warn!(
                    "Report channel {} of alliance {} is unavailable, retrying in {}s",
                    channel_id,
                    alliance_id,
                    CHANNEL_RETRY_DELAY.as_secs()
                );
                CHANNEL_RETRY_DELAY
            }
            Err(e) => {
                tracing::error!(
                    "Scheduled control check for alliance {} failed: {:?}",
                    alliance_id,
                    e
                );
                ITERATION_ERROR_DELAY
            }
        };

        if !sleep_while_running(delay, &running, &wake).await {
            break;
        }
    }

    tracing::info!("Control task for alliance {} stopped", alliance_id);
}

/// Sleep for `delay` unless cancelled first.
///
/// Returns whether the task should keep running.
async fn sleep_while_running(delay: Duration, running: &AtomicBool, wake: &Notify) -> bool {
    if !running.load(Ordering::SeqCst) {
        return false;
    }

    tokio::select! {
        _ = tokio::time::sleep(delay) => running.load(Ordering::SeqCst),
        _ = wake.notified() => running.load(Ordering::SeqCst),
    }
}
