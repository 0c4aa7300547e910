//! Roster database insertion utilities.
//!
//! This module provides methods for inserting alliances, control settings, members and
//! strike records into the test database. Alliance rows are created on demand so that
//! foreign keys on dependent tables are always satisfied.

use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    error::TestError,
    fixtures::roster::{factory, RosterFixtures},
};

impl<'a> RosterFixtures<'a> {
    /// Insert an alliance into the database.
    ///
    /// If an alliance with the specified ID already exists, returns the existing record.
    ///
    /// # Arguments
    /// - `alliance_id` - The alliance ID to insert
    ///
    /// # Returns
    /// - `Ok(entity::alliance::Model)` - The created or existing alliance record
    /// - `Err(TestError::DbErr)` - Database query or insert operation failed
    pub async fn insert_alliance(
        &self,
        alliance_id: i32,
    ) -> Result<entity::alliance::Model, TestError> {
        if let Some(existing) = entity::prelude::Alliance::find_by_id(alliance_id)
            .one(&self.setup.db)
            .await?
        {
            return Ok(existing);
        }

        let alliance = factory::mock_alliance(alliance_id);

        Ok(
            entity::prelude::Alliance::insert(entity::alliance::ActiveModel {
                alliance_id: ActiveValue::Set(alliance.alliance_id),
                name: ActiveValue::Set(alliance.name),
                guild_id: ActiveValue::Set(alliance.guild_id),
                created_at: ActiveValue::Set(alliance.created_at),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert control settings for an alliance.
    ///
    /// Creates the alliance first when it does not exist. Transfer flags start disabled
    /// and no start time is configured.
    ///
    /// # Arguments
    /// - `alliance_id` - Alliance the settings belong to
    /// - `channel_id` - Report channel, `None` leaves control unconfigured
    /// - `interval` - Control interval in minutes
    ///
    /// # Returns
    /// - `Ok(entity::alliance_setting::Model)` - The created settings record
    /// - `Err(TestError::DbErr)` - Database insert operation failed
    pub async fn insert_control_setting(
        &self,
        alliance_id: i32,
        channel_id: Option<i64>,
        interval: i32,
    ) -> Result<entity::alliance_setting::Model, TestError> {
        self.insert_alliance(alliance_id).await?;

        Ok(
            entity::prelude::AllianceSetting::insert(entity::alliance_setting::ActiveModel {
                alliance_id: ActiveValue::Set(alliance_id),
                channel_id: ActiveValue::Set(channel_id),
                interval: ActiveValue::Set(interval),
                start_time: ActiveValue::Set(None),
                auto_remove_on_transfer: ActiveValue::Set(false),
                notify_on_transfer: ActiveValue::Set(false),
                updated_at: ActiveValue::Set(factory::now()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Update the control settings row of an alliance.
    ///
    /// # Arguments
    /// - `alliance_id` - Alliance whose settings are updated
    /// - `update` - Closure applying changes to the active model
    ///
    /// # Returns
    /// - `Ok(entity::alliance_setting::Model)` - The updated settings record
    /// - `Err(TestError::DbErr)` - Settings row missing or update failed
    pub async fn update_control_setting<F>(
        &self,
        alliance_id: i32,
        update: F,
    ) -> Result<entity::alliance_setting::Model, TestError>
    where
        F: FnOnce(&mut entity::alliance_setting::ActiveModel),
    {
        let setting = entity::prelude::AllianceSetting::find()
            .filter(entity::alliance_setting::Column::AllianceId.eq(alliance_id))
            .one(&self.setup.db)
            .await?
            .ok_or_else(|| {
                sea_orm::DbErr::RecordNotFound(format!(
                    "alliance_setting for alliance {}",
                    alliance_id
                ))
            })?;

        let mut active: entity::alliance_setting::ActiveModel = setting.into();
        update(&mut active);
        active.updated_at = ActiveValue::Set(factory::now());

        Ok(active.update(&self.setup.db).await?)
    }

    /// Configure transfer handling flags for an alliance.
    pub async fn set_transfer_policy(
        &self,
        alliance_id: i32,
        auto_remove_on_transfer: bool,
        notify_on_transfer: bool,
    ) -> Result<entity::alliance_setting::Model, TestError> {
        self.update_control_setting(alliance_id, |setting| {
            setting.auto_remove_on_transfer = ActiveValue::Set(auto_remove_on_transfer);
            setting.notify_on_transfer = ActiveValue::Set(notify_on_transfer);
        })
        .await
    }

    /// Insert a member with default player data.
    ///
    /// Creates the alliance first when it does not exist.
    ///
    /// # Arguments
    /// - `fid` - Player ID of the member
    /// - `alliance_id` - Alliance the member belongs to
    ///
    /// # Returns
    /// - `Ok(entity::member::Model)` - The created member record
    /// - `Err(TestError::DbErr)` - Database insert operation failed
    pub async fn insert_member(
        &self,
        fid: i64,
        alliance_id: i32,
    ) -> Result<entity::member::Model, TestError> {
        let member = factory::mock_member(fid, alliance_id);

        self.insert_member_with(
            fid,
            alliance_id,
            &member.nickname,
            member.furnace_level,
            member.kid,
        )
        .await
    }

    /// Insert a member with explicit nickname, furnace level and state.
    pub async fn insert_member_with(
        &self,
        fid: i64,
        alliance_id: i32,
        nickname: &str,
        furnace_level: i32,
        kid: i32,
    ) -> Result<entity::member::Model, TestError> {
        self.insert_alliance(alliance_id).await?;

        Ok(
            entity::prelude::Member::insert(entity::member::ActiveModel {
                fid: ActiveValue::Set(fid),
                nickname: ActiveValue::Set(nickname.to_string()),
                furnace_level: ActiveValue::Set(furnace_level),
                stove_level_content: ActiveValue::Set(None),
                kid: ActiveValue::Set(kid),
                alliance_id: ActiveValue::Set(alliance_id),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a strike record for a member.
    ///
    /// # Arguments
    /// - `fid` - Player ID the strikes belong to
    /// - `alliance_id` - Alliance the player was a member of
    /// - `fail_count` - Number of consecutive not-found results
    ///
    /// # Returns
    /// - `Ok(entity::invalid_id::Model)` - The created strike record
    /// - `Err(TestError::DbErr)` - Database insert operation failed
    pub async fn insert_invalid_id(
        &self,
        fid: i64,
        alliance_id: i32,
        fail_count: i32,
    ) -> Result<entity::invalid_id::Model, TestError> {
        let now = factory::now();

        Ok(
            entity::prelude::InvalidId::insert(entity::invalid_id::ActiveModel {
                fid: ActiveValue::Set(fid),
                alliance_id: ActiveValue::Set(alliance_id),
                nickname: ActiveValue::Set(format!("Player {}", fid)),
                fail_count: ActiveValue::Set(fail_count),
                first_failure: ActiveValue::Set(now),
                last_failure: ActiveValue::Set(now),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
