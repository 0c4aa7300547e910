//! Tests for InvalidIdTracker::increment method.
//!
//! This module verifies the upsert behavior of the strike counter.

use super::*;

/// Tests the first strike for a player.
///
/// Expected: Ok(1) and a record holding the nickname and alliance
#[tokio::test]
async fn creates_record_on_first_strike() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let tracker = InvalidIdTracker::new(&test.db);
    let result = tracker.increment(1001, 1, "Player 1001").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 1);

    let record = tracker.find(1001).await?.expect("record should exist");
    assert_eq!(record.fail_count, 1);
    assert_eq!(record.alliance_id, 1);
    assert_eq!(record.nickname, "Player 1001");
    assert_eq!(record.first_failure, record.last_failure);

    Ok(())
}

/// Tests consecutive strikes for a player.
///
/// Verifies that the count grows by one per call and the cached nickname is refreshed
/// while the first failure timestamp is preserved.
///
/// Expected: Ok(3) after three calls
#[tokio::test]
async fn increments_existing_record() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let tracker = InvalidIdTracker::new(&test.db);
    assert_eq!(tracker.increment(1001, 1, "Player 1001").await?, 1);
    let first = tracker.find(1001).await?.expect("record should exist");
    assert_eq!(tracker.increment(1001, 1, "Player 1001").await?, 2);
    assert_eq!(tracker.increment(1001, 2, "Renamed").await?, 3);

    let record = tracker.find(1001).await?.expect("record should exist");
    assert_eq!(record.fail_count, 3);
    assert_eq!(record.nickname, "Renamed");
    assert_eq!(record.alliance_id, 2);
    assert_eq!(record.first_failure, first.first_failure);

    Ok(())
}
