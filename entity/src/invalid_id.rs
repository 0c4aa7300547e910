use sea_orm::entity::prelude::*;

/// Consecutive "player not found" strikes for a roster member.
///
/// A row exists only while at least one not-found result is unresolved by a later
/// successful lookup.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "invalid_id")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fid: i64,
    pub alliance_id: i32,
    pub nickname: String,
    pub fail_count: i32,
    pub first_failure: DateTime,
    pub last_failure: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
