use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alliance::Table)
                    .if_not_exists()
                    .col(pk_auto(Alliance::AllianceId))
                    .col(string(Alliance::Name))
                    .col(big_integer(Alliance::GuildId))
                    .col(timestamp(Alliance::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alliance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Alliance {
    Table,
    AllianceId,
    Name,
    GuildId,
    CreatedAt,
}
