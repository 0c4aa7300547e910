//! Tests for ControlService::check_all.

use super::*;

/// Tests queueing checks for every alliance.
///
/// Verifies that jobs are queued in alliance ID order and each carries its position
/// within the run.
///
/// Expected: Three tickets at positions 1 to 3 with batch info 1/3 to 3/3
#[tokio::test]
async fn queues_every_alliance_in_order() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_control_tables()
        .with_member(3001, 3)
        .with_member(1001, 1)
        .with_member(2001, 2)
        .build()
        .await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_unchanged([1001, 2001, 3001]);
    let control = ControlService::new(&test.db, &harness.queue);

    let tickets = control.check_all(Some(CHANNEL_ID)).await.unwrap();
    let positions: Vec<usize> = tickets.iter().map(|ticket| ticket.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    harness.queue.start().await;

    let mut batches = Vec::new();
    for ticket in tickets {
        let summary = ticket.wait().await.expect("job should complete");
        let batch = summary.batch.expect("batch info should be set");
        batches.push((summary.alliance_id, batch.current, batch.total));
    }

    assert_eq!(batches, vec![(1, 1, 3), (2, 2, 3), (3, 3, 3)]);
    assert_eq!(harness.source.calls(), vec![1001, 2001, 3001]);

    harness.queue.stop().await;

    Ok(())
}

/// Tests queueing checks without any alliance.
///
/// Expected: No tickets
#[tokio::test]
async fn returns_no_tickets_without_alliances() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let harness = ControlHarness::new(&test.db);
    let tickets = ControlService::new(&test.db, &harness.queue)
        .check_all(None)
        .await
        .unwrap();

    assert!(tickets.is_empty());

    Ok(())
}
