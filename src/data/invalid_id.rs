use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

/// Durable per-player counter of consecutive "player not found" results.
///
/// Absence of a row means zero strikes. Only confirmed not-found answers from the upstream
/// API may increment the counter; transport failures never do.
pub struct InvalidIdTracker<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvalidIdTracker<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Record a not-found strike for a player.
    ///
    /// Creates the record with a count of 1 if absent, otherwise increments the count and
    /// refreshes the last failure timestamp along with the cached nickname and alliance.
    ///
    /// # Returns
    /// - `Ok(i32)` - Strike count after the increment
    /// - `Err(DbErr)` - Database operation failed
    pub async fn increment(&self, fid: i64, alliance_id: i32, nickname: &str) -> Result<i32, DbErr> {
        let now = Utc::now().naive_utc();

        let record = match entity::prelude::InvalidId::find_by_id(fid).one(self.db).await? {
            Some(existing) => {
                let fail_count = existing.fail_count + 1;

                let mut record: entity::invalid_id::ActiveModel = existing.into();
                record.fail_count = ActiveValue::Set(fail_count);
                record.alliance_id = ActiveValue::Set(alliance_id);
                record.nickname = ActiveValue::Set(nickname.to_string());
                record.last_failure = ActiveValue::Set(now);

                record.update(self.db).await?
            }
            None => {
                entity::invalid_id::ActiveModel {
                    fid: ActiveValue::Set(fid),
                    alliance_id: ActiveValue::Set(alliance_id),
                    nickname: ActiveValue::Set(nickname.to_string()),
                    fail_count: ActiveValue::Set(1),
                    first_failure: ActiveValue::Set(now),
                    last_failure: ActiveValue::Set(now),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(record.fail_count)
    }

    /// Clear all strikes of a player by deleting its record.
    ///
    /// # Returns
    /// - `Ok(true)` - A record existed and was deleted
    /// - `Ok(false)` - The player had no strikes
    pub async fn reset(&self, fid: i64) -> Result<bool, DbErr> {
        let result = entity::prelude::InvalidId::delete_by_id(fid)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Get the current strike count of a player, 0 if no record exists
    pub async fn get_count(&self, fid: i64) -> Result<i32, DbErr> {
        Ok(self
            .find(fid)
            .await?
            .map(|record| record.fail_count)
            .unwrap_or(0))
    }

    pub async fn find(&self, fid: i64) -> Result<Option<entity::invalid_id::Model>, DbErr> {
        entity::prelude::InvalidId::find_by_id(fid).one(self.db).await
    }
}
