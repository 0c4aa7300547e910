use sea_orm::TransactionTrait;

use crate::{
    data::{invalid_id::InvalidIdTracker, member::MemberRepository},
    error::Error,
    model::summary::{InvalidMemberNotice, RemovalDisposition},
    service::{
        guard::BulkRemovalGuard,
        reconciliation::{PassState, ReconciliationService},
    },
};

/// Member that reached the not-found strike threshold during a pass.
pub(super) struct RemovalCandidate {
    pub fid: i64,
    pub nickname: String,
    pub fail_count: i32,
}

impl ReconciliationService {
    /// Remove the pass's removal candidates unless the bulk removal guard vetoes them.
    pub(super) async fn apply_removals(&self, pass: &mut PassState) {
        if pass.removal_candidates.is_empty() {
            return;
        }

        let decision =
            BulkRemovalGuard::evaluate(pass.summary.total_members, pass.removal_candidates.len());
        pass.summary.guard = Some(decision);

        if decision.vetoed {
            tracing::error!(
                "Bulk removal guard triggered for alliance {}: {} of {} member(s) ({:.0}%) flagged for removal, no member will be removed",
                pass.summary.alliance_id,
                decision.removals,
                decision.total_members,
                decision.removal_percentage * 100.0
            );
        }

        for candidate in pass.removal_candidates.drain(..) {
            let disposition = if decision.vetoed {
                RemovalDisposition::BlockedBySafetyTrigger
            } else {
                match self.remove_member(candidate.fid).await {
                    Ok(true) => {
                        tracing::info!(
                            "Removed {} ({}) after {} consecutive not-found result(s)",
                            candidate.nickname,
                            candidate.fid,
                            candidate.fail_count
                        );
                        RemovalDisposition::Removed
                    }
                    Ok(false) => {
                        RemovalDisposition::Failed("Member is no longer on the roster".to_string())
                    }
                    Err(e) => {
                        tracing::error!("Failed to remove member {}: {:?}", candidate.fid, e);
                        RemovalDisposition::Failed(e.to_string())
                    }
                }
            };

            pass.summary.invalid_member_notices.push(InvalidMemberNotice {
                fid: candidate.fid,
                nickname: candidate.nickname,
                fail_count: candidate.fail_count,
                disposition,
            });
        }
    }

    /// Delete a member and its strike record in one transaction.
    async fn remove_member(&self, fid: i64) -> Result<bool, Error> {
        let _lock = self.roster_lock.lock().await;
        let txn = self.db.begin().await?;

        let removed = MemberRepository::new(&txn).delete(fid).await?;
        InvalidIdTracker::new(&txn).reset(fid).await?;

        txn.commit().await?;

        Ok(removed)
    }
}
