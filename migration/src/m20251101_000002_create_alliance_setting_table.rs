use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_create_alliance_table::Alliance;

static FK_ALLIANCE_SETTING_ALLIANCE_ID: &str = "fk_alliance_setting_alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AllianceSetting::Table)
                    .if_not_exists()
                    .col(pk_auto(AllianceSetting::Id))
                    .col(integer_uniq(AllianceSetting::AllianceId))
                    .col(big_integer_null(AllianceSetting::ChannelId))
                    .col(integer(AllianceSetting::Interval).default(0))
                    .col(string_null(AllianceSetting::StartTime))
                    .col(boolean(AllianceSetting::AutoRemoveOnTransfer).default(false))
                    .col(boolean(AllianceSetting::NotifyOnTransfer).default(false))
                    .col(timestamp(AllianceSetting::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ALLIANCE_SETTING_ALLIANCE_ID)
                            .from(AllianceSetting::Table, AllianceSetting::AllianceId)
                            .to(Alliance::Table, Alliance::AllianceId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AllianceSetting::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AllianceSetting {
    Table,
    Id,
    AllianceId,
    ChannelId,
    Interval,
    StartTime,
    AutoRemoveOnTransfer,
    NotifyOnTransfer,
    UpdatedAt,
}
