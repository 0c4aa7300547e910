use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

/// Append-only audit log of furnace level and nickname changes.
pub struct ChangeLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChangeLogRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn record_furnace_change(
        &self,
        fid: i64,
        old_furnace_level: i32,
        new_furnace_level: i32,
    ) -> Result<entity::furnace_change::Model, DbErr> {
        let change = entity::furnace_change::ActiveModel {
            fid: ActiveValue::Set(fid),
            old_furnace_level: ActiveValue::Set(old_furnace_level),
            new_furnace_level: ActiveValue::Set(new_furnace_level),
            changed_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        change.insert(self.db).await
    }

    pub async fn record_nickname_change(
        &self,
        fid: i64,
        old_nickname: &str,
        new_nickname: &str,
    ) -> Result<entity::nickname_change::Model, DbErr> {
        let change = entity::nickname_change::ActiveModel {
            fid: ActiveValue::Set(fid),
            old_nickname: ActiveValue::Set(old_nickname.to_string()),
            new_nickname: ActiveValue::Set(new_nickname.to_string()),
            changed_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        change.insert(self.db).await
    }

    /// Get the furnace level history of a player, oldest first
    pub async fn get_furnace_changes(
        &self,
        fid: i64,
    ) -> Result<Vec<entity::furnace_change::Model>, DbErr> {
        entity::prelude::FurnaceChange::find()
            .filter(entity::furnace_change::Column::Fid.eq(fid))
            .order_by_asc(entity::furnace_change::Column::Id)
            .all(self.db)
            .await
    }

    /// Get the nickname history of a player, oldest first
    pub async fn get_nickname_changes(
        &self,
        fid: i64,
    ) -> Result<Vec<entity::nickname_change::Model>, DbErr> {
        entity::prelude::NicknameChange::find()
            .filter(entity::nickname_change::Column::Fid.eq(fid))
            .order_by_asc(entity::nickname_change::Column::Id)
            .all(self.db)
            .await
    }
}
