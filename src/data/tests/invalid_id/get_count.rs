//! Tests for InvalidIdTracker::get_count method.

use super::*;

/// Tests reading the count of a tracked player.
///
/// Expected: Ok(stored count)
#[tokio::test]
async fn returns_stored_count() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_control_tables().build().await?;
    test.roster().insert_invalid_id(1001, 1, 2).await?;

    let tracker = InvalidIdTracker::new(&test.db);
    let result = tracker.get_count(1001).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    assert_eq!(result.unwrap(), 2);

    Ok(())
}

/// Tests reading the count of an untracked player.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_without_record() -> Result<(), TestError> {
    let test = TestBuilder::new().with_control_tables().build().await?;

    let tracker = InvalidIdTracker::new(&test.db);
    let count = tracker.get_count(1001).await?;

    assert_eq!(count, 0);

    Ok(())
}
