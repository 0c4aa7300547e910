use sea_orm_migration::{prelude::*, schema::*};

static IDX_INVALID_ID_ALLIANCE_ID: &str = "idx_invalid_id_alliance_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InvalidId::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvalidId::Fid)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(integer(InvalidId::AllianceId))
                    .col(string(InvalidId::Nickname))
                    .col(integer(InvalidId::FailCount).default(1))
                    .col(timestamp(InvalidId::FirstFailure))
                    .col(timestamp(InvalidId::LastFailure))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_INVALID_ID_ALLIANCE_ID)
                    .table(InvalidId::Table)
                    .col(InvalidId::AllianceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_INVALID_ID_ALLIANCE_ID)
                    .table(InvalidId::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InvalidId::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum InvalidId {
    Table,
    Fid,
    AllianceId,
    Nickname,
    FailCount,
    FirstFailure,
    LastFailure,
}
