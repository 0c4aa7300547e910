use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "alliance_setting")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub alliance_id: i32,
    pub channel_id: Option<i64>,
    /// Control interval in minutes, 0 disables scheduled checks
    pub interval: i32,
    /// Wall-clock anchor in `HH:MM` (UTC)
    pub start_time: Option<String>,
    pub auto_remove_on_transfer: bool,
    pub notify_on_transfer: bool,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::alliance::Entity",
        from = "Column::AllianceId",
        to = "super::alliance::Column::AllianceId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Alliance,
}

impl Related<super::alliance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alliance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
