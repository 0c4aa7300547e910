use sea_orm::TransactionTrait;

use crate::{
    data::{
        change_log::ChangeLogRepository, invalid_id::InvalidIdTracker, member::MemberRepository,
    },
    error::{Error, FetchFailureKind},
    model::{
        player::{FetchResult, PlayerData},
        settings::ControlSettings,
        summary::{CheckFailure, FurnaceChange, NicknameChange, TransferNotice},
    },
    service::reconciliation::{
        config::STRIKE_THRESHOLD, removal::RemovalCandidate, PassState, ReconciliationService,
    },
    util::furnace::furnace_level_label,
    worker::GatedFetch,
};

/// Changes applied to one member after a successful lookup.
#[derive(Default)]
struct MemberChanges {
    transfer: Option<TransferNotice>,
    furnace: Option<FurnaceChange>,
    nickname: Option<NicknameChange>,
}

impl ReconciliationService {
    /// Check a single member and fold the outcome into the pass.
    pub(super) async fn check_member(
        &self,
        settings: &ControlSettings,
        member: &entity::member::Model,
        pass: &mut PassState,
    ) {
        let result = self.fetch_with_retry(member.fid, pass).await;

        match result {
            FetchResult::Success(data) => {
                match self.apply_player_data(settings, member, &data).await {
                    Ok(changes) => {
                        if let Some(transfer) = changes.transfer {
                            pass.summary.transfer_notices.push(transfer);
                        }
                        if let Some(furnace) = changes.furnace {
                            pass.summary.furnace_changes.push(furnace);
                        }
                        if let Some(nickname) = changes.nickname {
                            pass.summary.nickname_changes.push(nickname);
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to update member {}: {:?}", member.fid, e);
                        pass.summary.check_failures.push(CheckFailure {
                            fid: member.fid,
                            nickname: member.nickname.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
            FetchResult::NotFound => match self.record_strike(settings, member).await {
                Ok(fail_count) => {
                    tracing::debug!(
                        "Player {} not found ({}/{} strike(s))",
                        member.fid,
                        fail_count,
                        STRIKE_THRESHOLD
                    );

                    if fail_count >= STRIKE_THRESHOLD {
                        pass.removal_candidates.push(RemovalCandidate {
                            fid: member.fid,
                            nickname: member.nickname.clone(),
                            fail_count,
                        });
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to record strike for {}: {:?}", member.fid, e);
                    pass.summary.check_failures.push(CheckFailure {
                        fid: member.fid,
                        nickname: member.nickname.clone(),
                        message: e.to_string(),
                    });
                }
            },
            FetchResult::RateLimited => {
                tracing::warn!("Player {} rate limited, giving up for this pass", member.fid);
                pass.summary.check_failures.push(CheckFailure {
                    fid: member.fid,
                    nickname: member.nickname.clone(),
                    message: "Rate limited by the player API".to_string(),
                });
            }
            FetchResult::Error(message) => match FetchFailureKind::classify(&message) {
                FetchFailureKind::Connection => {
                    tracing::warn!("Connection issue while checking {}: {}", member.fid, message);
                    pass.summary.connection_issues.push(member.fid);
                }
                FetchFailureKind::Api => {
                    tracing::warn!("API error while checking {}: {}", member.fid, message);
                    pass.summary.check_failures.push(CheckFailure {
                        fid: member.fid,
                        nickname: member.nickname.clone(),
                        message,
                    });
                }
            },
        }

        pass.summary.checked_members += 1;
    }

    /// Fetch a player, retrying exactly once after the rate-limit back-off.
    async fn fetch_with_retry(&self, fid: i64, pass: &mut PassState) -> FetchResult {
        let result = self.budgeted_fetch(fid, pass).await;

        if result != FetchResult::RateLimited || pass.summary.rate_limit_exhausted {
            return result;
        }

        tracing::debug!("Rate limited fetching {}, retrying after cooldown", fid);

        self.budgeted_fetch(fid, pass).await
    }

    /// Single gateway lookup charged against the pass's back-off budget.
    ///
    /// Every cooldown the gateway sits out counts towards the budget. Once the remaining
    /// cooldown exceeds what is left of it, the lookup is skipped without sleeping and the
    /// pass is flagged as rate-limit exhausted.
    async fn budgeted_fetch(&self, fid: i64, pass: &mut PassState) -> FetchResult {
        let allowance = self.remaining_backoff(pass.summary.rate_limit_backoff);

        match self.gateway.fetch_player_within(fid, allowance).await {
            GatedFetch::Fetched { result, cooldown } => {
                pass.summary.rate_limit_backoff += cooldown;
                result
            }
            GatedFetch::Deferred { cooldown } => {
                if !pass.summary.rate_limit_exhausted {
                    tracing::warn!(
                        "Rate limit back-off budget exhausted for alliance {} ({:.1}s cooldown left)",
                        pass.summary.alliance_id,
                        cooldown.as_secs_f64()
                    );
                }
                pass.summary.rate_limit_exhausted = true;
                FetchResult::RateLimited
            }
        }
    }

    /// Apply live player data to the stored member.
    ///
    /// Clears the member's strikes and updates every differing attribute in one transaction.
    /// A transfer with auto-removal enabled deletes the member and skips the remaining
    /// comparisons.
    async fn apply_player_data(
        &self,
        settings: &ControlSettings,
        member: &entity::member::Model,
        data: &PlayerData,
    ) -> Result<MemberChanges, Error> {
        let mut changes = MemberChanges::default();
        let fid = member.fid;

        {
            let roster_guard = self.roster_lock.lock().await;
            let txn = self.db.begin().await?;

            let members = MemberRepository::new(&txn);
            let change_log = ChangeLogRepository::new(&txn);

            InvalidIdTracker::new(&txn).reset(fid).await?;

            if data.stove_level_content != member.stove_level_content {
                members
                    .update_stove_level_content(fid, data.stove_level_content.clone())
                    .await?;
            }

            if data.kid != member.kid {
                let removed = settings.auto_remove_on_transfer;

                if removed {
                    members.delete(fid).await?;
                } else {
                    members.update_kid(fid, data.kid).await?;
                }

                tracing::info!(
                    "Player {} transferred from state {} to {}{}",
                    fid,
                    member.kid,
                    data.kid,
                    if removed { ", removed from roster" } else { "" }
                );

                changes.transfer = Some(TransferNotice {
                    fid,
                    nickname: data.nickname.clone(),
                    old_kid: member.kid,
                    new_kid: data.kid,
                    removed,
                });

                if removed {
                    txn.commit().await?;
                    drop(roster_guard);

                    if settings.notify_on_transfer {
                        self.notify_transfer(settings, member, data).await;
                    }

                    return Ok(changes);
                }
            }

            if data.furnace_level != member.furnace_level {
                change_log
                    .record_furnace_change(fid, member.furnace_level, data.furnace_level)
                    .await?;
                members.update_furnace_level(fid, data.furnace_level).await?;

                changes.furnace = Some(FurnaceChange {
                    fid,
                    nickname: data.nickname.clone(),
                    old_level: member.furnace_level,
                    new_level: data.furnace_level,
                    old_label: furnace_level_label(member.furnace_level),
                    new_label: furnace_level_label(data.furnace_level),
                });
            }

            let stored_nickname = member.nickname.trim();
            let live_nickname = data.nickname.trim();

            if stored_nickname.to_lowercase() != live_nickname.to_lowercase() {
                change_log
                    .record_nickname_change(fid, stored_nickname, live_nickname)
                    .await?;
                members.update_nickname(fid, live_nickname).await?;

                changes.nickname = Some(NicknameChange {
                    fid,
                    old_nickname: stored_nickname.to_string(),
                    new_nickname: live_nickname.to_string(),
                });
            }

            txn.commit().await?;
        }

        Ok(changes)
    }

    /// Record a not-found strike and return the new strike count.
    async fn record_strike(
        &self,
        settings: &ControlSettings,
        member: &entity::member::Model,
    ) -> Result<i32, Error> {
        let _lock = self.roster_lock.lock().await;
        let txn = self.db.begin().await?;

        let fail_count = InvalidIdTracker::new(&txn)
            .increment(member.fid, settings.alliance_id, &member.nickname)
            .await?;

        txn.commit().await?;

        Ok(fail_count)
    }

    async fn notify_transfer(
        &self,
        settings: &ControlSettings,
        member: &entity::member::Model,
        data: &PlayerData,
    ) {
        let (Some(notifier), Some(admin_id)) = (&self.notifier, self.config.global_admin_id) else {
            return;
        };

        let message = format!(
            "{} ({}) transferred from state {} to state {} and was removed from alliance {}.",
            data.nickname, member.fid, member.kid, data.kid, settings.alliance_name
        );

        if let Err(e) = notifier.notify(admin_id, &message).await {
            tracing::warn!(
                "Failed to notify admin {} about transfer of {}: {}",
                admin_id,
                member.fid,
                e
            );
        }
    }
}
