//! Schedule calculations for per-alliance control tasks.
//!
//! A task without a start time waits one full interval before its first check. A task with
//! a start time waits for that wall-clock time today, or for the first interval-aligned slot
//! after it when the start time has already passed.

use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

use crate::error::Error;

/// Parse a `HH:MM` start time.
///
/// # Returns
/// - `Ok(NaiveTime)` - Parsed wall-clock time
/// - `Err(Error::ParseError)` - Value is not a valid `HH:MM` time
pub fn parse_start_time(value: &str) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| Error::ParseError(format!("invalid start time {:?}: {}", value, e)))
}

/// Calculates the delay before the first scheduled check.
///
/// # Arguments
/// - `now` - Current UTC time
/// - `start_time` - Optional UTC wall-clock time anchoring the schedule
/// - `interval` - Time between two checks
///
/// # Returns
/// - `interval` when no start time is set
/// - Time until today's start time if it is still ahead
/// - Otherwise time until the first `start_time + k * interval` strictly after `now`
/// - `Duration::ZERO` for a zero interval
///
/// # Example
/// With `start_time` 12:00 and a 30 minute interval:
/// - At 11:00 the delay is 1 hour (first check at 12:00)
/// - At 12:30 the delay is 30 minutes (first check at 13:00)
pub fn initial_delay(
    now: DateTime<Utc>,
    start_time: Option<NaiveTime>,
    interval: Duration,
) -> Duration {
    if interval.is_zero() {
        return Duration::ZERO;
    }

    let Some(start_time) = start_time else {
        return interval;
    };

    let now = now.naive_utc();
    let start = now.date().and_time(start_time);

    if start > now {
        return (start - now).to_std().unwrap_or(Duration::ZERO);
    }

    let Ok(interval_delta) = TimeDelta::from_std(interval) else {
        return interval;
    };

    let elapsed_ms = (now - start).num_milliseconds();
    let interval_ms = interval_delta.num_milliseconds().max(1);
    let slots = elapsed_ms / interval_ms + 1;

    let next = start + TimeDelta::milliseconds(slots * interval_ms);

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
