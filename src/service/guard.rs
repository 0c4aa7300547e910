use crate::{
    model::summary::GuardDecision,
    service::reconciliation::config::{GUARD_MAX_REMOVAL_PERCENT, GUARD_MIN_MEMBERS},
};

/// Circuit breaker for removals in a single reconciliation pass.
///
/// When an alliance has at least `GUARD_MIN_MEMBERS` members and more than
/// `GUARD_MAX_REMOVAL_PERCENT` of them are queued for removal, every removal of the pass is
/// vetoed. Smaller alliances are never vetoed.
pub struct BulkRemovalGuard;

impl BulkRemovalGuard {
    pub fn evaluate(total_members: usize, removals: usize) -> GuardDecision {
        let removal_percentage = if total_members == 0 {
            0.0
        } else {
            removals as f64 / total_members as f64
        };

        let vetoed = total_members >= GUARD_MIN_MEMBERS
            && removals * 100 > total_members * GUARD_MAX_REMOVAL_PERCENT;

        GuardDecision {
            total_members,
            removals,
            removal_percentage,
            vetoed,
        }
    }
}
