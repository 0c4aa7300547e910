pub use sea_orm_migration::prelude::*;

mod m20251101_000001_create_alliance_table;
mod m20251101_000002_create_alliance_setting_table;
mod m20251101_000003_create_member_table;
mod m20251101_000004_create_change_log_tables;
mod m20251101_000005_create_invalid_id_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_create_alliance_table::Migration),
            Box::new(m20251101_000002_create_alliance_setting_table::Migration),
            Box::new(m20251101_000003_create_member_table::Migration),
            Box::new(m20251101_000004_create_change_log_tables::Migration),
            Box::new(m20251101_000005_create_invalid_id_table::Migration),
        ]
    }
}
