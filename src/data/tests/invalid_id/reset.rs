//! Tests for InvalidIdTracker::reset method.

use super::*;

/// Tests resetting a player with strikes.
///
/// Verifies that the record is deleted rather than zeroed.
///
/// Expected: Ok(true), no record afterwards and a count of 0
#[tokio::test]
async fn deletes_existing_record() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_control_tables().build().await?;
    test.roster().insert_invalid_id(1001, 1, 2).await?;

    let tracker = InvalidIdTracker::new(&test.db);
    let result = tracker.reset(1001).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert!(result.unwrap());
    assert!(tracker.find(1001).await?.is_none());
    assert_eq!(tracker.get_count(1001).await?, 0);

    Ok(())
}

/// Tests resetting a player without strikes.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_record() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let tracker = InvalidIdTracker::new(&test.db);
    let reset = tracker.reset(1001).await?;

    assert!(!reset);

    Ok(())
}
