use std::time::Duration;

use chrono::NaiveTime;

/// Control settings of one alliance as read from the settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSettings {
    pub alliance_id: i32,
    pub alliance_name: String,
    pub channel_id: Option<i64>,
    /// Minutes between scheduled checks, 0 disables scheduling.
    pub interval_minutes: u32,
    /// UTC wall-clock time anchoring the schedule.
    pub start_time: Option<NaiveTime>,
    pub auto_remove_on_transfer: bool,
    pub notify_on_transfer: bool,
}

/// Parameters a scheduling task was started with.
///
/// A change of any field requires the task to be restarted so the initial delay is
/// recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleKey {
    pub channel_id: i64,
    pub interval_minutes: u32,
    pub start_time: Option<NaiveTime>,
}

impl ControlSettings {
    /// Whether the alliance should have a live scheduling task.
    pub fn is_enabled(&self) -> bool {
        self.interval_minutes > 0 && self.channel_id.is_some()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_minutes) * 60)
    }

    /// Scheduling parameters, `None` when scheduling is disabled.
    pub fn schedule_key(&self) -> Option<ScheduleKey> {
        if !self.is_enabled() {
            return None;
        }

        self.channel_id.map(|channel_id| ScheduleKey {
            channel_id,
            interval_minutes: self.interval_minutes,
            start_time: self.start_time,
        })
    }
}

impl ScheduleKey {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_minutes) * 60)
    }
}
