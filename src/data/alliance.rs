use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect};

use crate::{model::settings::ControlSettings, scheduler::schedule::parse_start_time};

pub struct AllianceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllianceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get an alliance by its ID
    pub async fn find_by_id(
        &self,
        alliance_id: i32,
    ) -> Result<Option<entity::alliance::Model>, DbErr> {
        entity::prelude::Alliance::find_by_id(alliance_id)
            .one(self.db)
            .await
    }

    /// Get the IDs of every alliance ordered by ID
    pub async fn get_all_ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Alliance::find()
            .select_only()
            .column(entity::alliance::Column::AllianceId)
            .order_by_asc(entity::alliance::Column::AllianceId)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Get the control settings of a single alliance.
    ///
    /// An alliance without a settings row is returned with control disabled.
    ///
    /// # Returns
    /// - `Ok(Some(ControlSettings))` - Alliance exists
    /// - `Ok(None)` - No alliance with the given ID
    /// - `Err(DbErr)` - Database query failed
    pub async fn get_control_settings(
        &self,
        alliance_id: i32,
    ) -> Result<Option<ControlSettings>, DbErr> {
        let alliance = entity::prelude::Alliance::find_by_id(alliance_id)
            .find_also_related(entity::prelude::AllianceSetting)
            .one(self.db)
            .await?;

        Ok(alliance.map(|(alliance, setting)| to_control_settings(alliance, setting)))
    }

    /// Get the control settings of every alliance ordered by alliance ID
    pub async fn get_all_control_settings(&self) -> Result<Vec<ControlSettings>, DbErr> {
        let alliances = entity::prelude::Alliance::find()
            .find_also_related(entity::prelude::AllianceSetting)
            .order_by_asc(entity::alliance::Column::AllianceId)
            .all(self.db)
            .await?;

        Ok(alliances
            .into_iter()
            .map(|(alliance, setting)| to_control_settings(alliance, setting))
            .collect())
    }
}

fn to_control_settings(
    alliance: entity::alliance::Model,
    setting: Option<entity::alliance_setting::Model>,
) -> ControlSettings {
    let Some(setting) = setting else {
        return ControlSettings {
            alliance_id: alliance.alliance_id,
            alliance_name: alliance.name,
            channel_id: None,
            interval_minutes: 0,
            start_time: None,
            auto_remove_on_transfer: false,
            notify_on_transfer: false,
        };
    };

    let start_time = match setting.start_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => match parse_start_time(value) {
            Ok(time) => Some(time),
            Err(e) => {
                tracing::warn!(
                    "Ignoring start time of alliance {}: {}",
                    alliance.alliance_id,
                    e
                );
                None
            }
        },
    };

    ControlSettings {
        alliance_id: alliance.alliance_id,
        alliance_name: alliance.name,
        channel_id: setting.channel_id,
        interval_minutes: u32::try_from(setting.interval).unwrap_or(0),
        start_time,
        auto_remove_on_transfer: setting.auto_remove_on_transfer,
        notify_on_transfer: setting.notify_on_transfer,
    }
}
