//! Tests for synchronizing control tasks with the persisted settings.

use std::sync::Arc;

use sea_orm::{ActiveValue, EntityTrait};
use whiteout_control::scheduler::{ControlScheduler, SyncReport};
use whiteout_test_utils::prelude::*;

use crate::util::{mock::CountingRunner, setup::CHANNEL_ID};

fn scheduler(test: &TestContext) -> ControlScheduler {
    ControlScheduler::new(test.db.clone(), Arc::new(CountingRunner::new()))
}

/// Tests the first synchronization.
///
/// Verifies that only alliances with a positive interval and a channel get a task.
///
/// Expected: Task for alliance 1 only
#[tokio::test]
async fn starts_tasks_for_enabled_alliances() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .with_control_setting(2, None, 30)
        .with_control_setting(3, Some(CHANNEL_ID), 0)
        .with_alliance(4)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.started, vec![1]);
    assert!(report.restarted.is_empty());
    assert!(report.retired.is_empty());
    assert_eq!(scheduler.active_alliances().await, vec![1]);

    let key = scheduler.scheduled_key(1).await.expect("task should exist");
    assert_eq!(key.channel_id, CHANNEL_ID);
    assert_eq!(key.interval_minutes, 30);

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests a synchronization without settings changes.
///
/// Expected: Every task reported unchanged and no changes flagged
#[tokio::test]
async fn leaves_unchanged_tasks_alone() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();
    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(
        report,
        SyncReport {
            unchanged: vec![1],
            ..SyncReport::default()
        }
    );
    assert!(!report.has_changes());

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests an interval change.
///
/// Expected: The task is restarted with the new interval, still one task per alliance
#[tokio::test]
async fn restarts_task_on_interval_change() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();

    test.roster()
        .update_control_setting(1, |setting| {
            setting.interval = ActiveValue::Set(60);
        })
        .await?;

    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.restarted, vec![1]);
    assert_eq!(scheduler.active_alliances().await, vec![1]);
    assert_eq!(
        scheduler.scheduled_key(1).await.map(|key| key.interval_minutes),
        Some(60)
    );

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests a start time change.
///
/// Expected: The task is restarted with the new start time
#[tokio::test]
async fn restarts_task_on_start_time_change() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();

    test.roster()
        .update_control_setting(1, |setting| {
            setting.start_time = ActiveValue::Set(Some("02:00".to_string()));
        })
        .await?;

    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.restarted, vec![1]);
    let key = scheduler.scheduled_key(1).await.expect("task should exist");
    assert_eq!(
        key.start_time,
        chrono::NaiveTime::from_hms_opt(2, 0, 0)
    );

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests moving the reports to another channel.
///
/// Expected: The task is restarted and posts to the new channel
#[tokio::test]
async fn restarts_task_on_channel_change() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();

    let new_channel = CHANNEL_ID + 1;
    test.roster()
        .update_control_setting(1, |setting| {
            setting.channel_id = ActiveValue::Set(Some(new_channel));
        })
        .await?;

    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.restarted, vec![1]);
    assert!(report.started.is_empty());
    assert_eq!(scheduler.active_alliances().await, vec![1]);
    assert_eq!(
        scheduler.scheduled_key(1).await.map(|key| key.channel_id),
        Some(new_channel)
    );

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests disabling control by clearing the report channel.
///
/// Expected: The task is retired
#[tokio::test]
async fn retires_task_when_disabled() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .with_control_setting(2, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();
    assert_eq!(scheduler.active_alliances().await, vec![1, 2]);

    test.roster()
        .update_control_setting(1, |setting| {
            setting.channel_id = ActiveValue::Set(None);
        })
        .await?;

    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.retired, vec![1]);
    assert_eq!(report.unchanged, vec![2]);
    assert_eq!(scheduler.active_alliances().await, vec![2]);

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests removing an alliance.
///
/// Expected: The task of the removed alliance is retired
#[tokio::test]
async fn retires_task_of_removed_alliance() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.monitor_alliance_changes().await.unwrap();

    entity::prelude::Alliance::delete_by_id(1)
        .exec(&test.db)
        .await?;

    let report = scheduler.monitor_alliance_changes().await.unwrap();

    assert_eq!(report.retired, vec![1]);
    assert!(scheduler.active_alliances().await.is_empty());

    scheduler.shutdown().await.unwrap();

    Ok(())
}

/// Tests the scheduler lifecycle.
///
/// Verifies that `start` performs an initial synchronization, that a second call is a
/// no-op and that `shutdown` cancels every task.
///
/// Expected: One task after start, none after shutdown
#[tokio::test(flavor = "multi_thread")]
async fn start_is_idempotent_and_shutdown_cancels() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_control_setting(1, Some(CHANNEL_ID), 30)
        .build()
        .await?;

    let scheduler = scheduler(&test);
    scheduler.start().await.unwrap();
    scheduler.start().await.unwrap();

    assert_eq!(scheduler.active_alliances().await, vec![1]);

    scheduler.shutdown().await.unwrap();
    assert!(scheduler.active_alliances().await.is_empty());

    Ok(())
}
