use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "alliance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub alliance_id: i32,
    pub name: String,
    pub guild_id: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::alliance_setting::Entity")]
    AllianceSetting,
    #[sea_orm(has_many = "super::member::Entity")]
    Member,
}

impl Related<super::alliance_setting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AllianceSetting.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
