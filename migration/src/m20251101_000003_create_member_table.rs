use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_create_alliance_table::Alliance;

static IDX_MEMBER_ALLIANCE_ID: &str = "idx_member_alliance_id";
static FK_MEMBER_ALLIANCE_ID: &str = "fk_member_alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Member::Fid)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Member::Nickname))
                    .col(integer(Member::FurnaceLevel))
                    .col(string_null(Member::StoveLevelContent))
                    .col(integer(Member::Kid))
                    .col(integer(Member::AllianceId))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MEMBER_ALLIANCE_ID)
                            .from(Member::Table, Member::AllianceId)
                            .to(Alliance::Table, Alliance::AllianceId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBER_ALLIANCE_ID)
                    .table(Member::Table)
                    .col(Member::AllianceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBER_ALLIANCE_ID)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Member {
    Table,
    Fid,
    Nickname,
    FurnaceLevel,
    StoveLevelContent,
    Kid,
    AllianceId,
}
