//! Tests for the bulk removal guard inside a reconciliation pass.

use super::*;

/// Tests a pass flagging more than 20% of a 10 member roster.
///
/// Verifies that every removal of the pass is vetoed while the strikes are kept so the
/// members stay flagged for later passes.
///
/// Expected: 3 notices blocked by the safety trigger, roster unchanged
#[tokio::test]
async fn vetoes_bulk_removal() -> Result<(), TestError> {
    let mut test = build_alliance(10).await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_unchanged(roster(10));

    for fid in [1001, 1002, 1003] {
        test.roster().insert_invalid_id(fid, ALLIANCE_ID, 2).await?;
        harness.source.set_default(fid, FetchResult::NotFound);
    }

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    let guard = summary.guard.expect("guard should have been consulted");
    assert!(guard.vetoed);
    assert_eq!(guard.removals, 3);
    assert!((guard.removal_percentage - 0.3).abs() < f64::EPSILON);

    assert_eq!(summary.invalid_member_notices.len(), 3);
    assert!(summary
        .invalid_member_notices
        .iter()
        .all(|notice| notice.disposition == RemovalDisposition::BlockedBySafetyTrigger));
    assert_eq!(summary.removed_count(), 0);

    assert_eq!(
        MemberRepository::new(&test.db)
            .count_by_alliance(ALLIANCE_ID)
            .await?,
        10
    );
    assert_eq!(InvalidIdTracker::new(&test.db).get_count(1001).await?, 3);

    Ok(())
}

/// Tests a pass flagging exactly 20% of a 10 member roster.
///
/// Expected: Both members removed
#[tokio::test]
async fn allows_removal_at_threshold() -> Result<(), TestError> {
    let mut test = build_alliance(10).await?;

    let harness = ControlHarness::new(&test.db);
    harness.source.set_unchanged(roster(10));

    for fid in [1001, 1002] {
        test.roster().insert_invalid_id(fid, ALLIANCE_ID, 2).await?;
        harness.source.set_default(fid, FetchResult::NotFound);
    }

    let summary = harness.reconciliation.run(&request(), None).await.unwrap();

    let guard = summary.guard.expect("guard should have been consulted");
    assert!(!guard.vetoed);
    assert_eq!(summary.removed_count(), 2);
    assert_eq!(
        MemberRepository::new(&test.db)
            .count_by_alliance(ALLIANCE_ID)
            .await?,
        8
    );

    Ok(())
}
