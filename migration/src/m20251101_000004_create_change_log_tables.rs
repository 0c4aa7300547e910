use sea_orm_migration::{prelude::*, schema::*};

static IDX_FURNACE_CHANGE_FID: &str = "idx_furnace_change_fid";
static IDX_NICKNAME_CHANGE_FID: &str = "idx_nickname_change_fid";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FurnaceChange::Table)
                    .if_not_exists()
                    .col(pk_auto(FurnaceChange::Id))
                    .col(big_integer(FurnaceChange::Fid))
                    .col(integer(FurnaceChange::OldFurnaceLevel))
                    .col(integer(FurnaceChange::NewFurnaceLevel))
                    .col(timestamp(FurnaceChange::ChangedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_FURNACE_CHANGE_FID)
                    .table(FurnaceChange::Table)
                    .col(FurnaceChange::Fid)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NicknameChange::Table)
                    .if_not_exists()
                    .col(pk_auto(NicknameChange::Id))
                    .col(big_integer(NicknameChange::Fid))
                    .col(string(NicknameChange::OldNickname))
                    .col(string(NicknameChange::NewNickname))
                    .col(timestamp(NicknameChange::ChangedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NICKNAME_CHANGE_FID)
                    .table(NicknameChange::Table)
                    .col(NicknameChange::Fid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NICKNAME_CHANGE_FID)
                    .table(NicknameChange::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(NicknameChange::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_FURNACE_CHANGE_FID)
                    .table(FurnaceChange::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(FurnaceChange::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum FurnaceChange {
    Table,
    Id,
    Fid,
    OldFurnaceLevel,
    NewFurnaceLevel,
    ChangedAt,
}

#[derive(DeriveIden)]
pub enum NicknameChange {
    Table,
    Id,
    Fid,
    OldNickname,
    NewNickname,
    ChangedAt,
}
