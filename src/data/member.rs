use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

pub struct MemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the roster of an alliance ordered by FID
    pub async fn get_by_alliance(
        &self,
        alliance_id: i32,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::AllianceId.eq(alliance_id))
            .order_by_asc(entity::member::Column::Fid)
            .all(self.db)
            .await
    }

    pub async fn find_by_fid(&self, fid: i64) -> Result<Option<entity::member::Model>, DbErr> {
        entity::prelude::Member::find_by_id(fid).one(self.db).await
    }

    pub async fn count_by_alliance(&self, alliance_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Member::find()
            .filter(entity::member::Column::AllianceId.eq(alliance_id))
            .count(self.db)
            .await
    }

    pub async fn update_stove_level_content(
        &self,
        fid: i64,
        stove_level_content: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::Member::update_many()
            .col_expr(
                entity::member::Column::StoveLevelContent,
                Expr::value(stove_level_content),
            )
            .filter(entity::member::Column::Fid.eq(fid))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn update_kid(&self, fid: i64, kid: i32) -> Result<(), DbErr> {
        entity::prelude::Member::update_many()
            .col_expr(entity::member::Column::Kid, Expr::value(kid))
            .filter(entity::member::Column::Fid.eq(fid))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn update_furnace_level(&self, fid: i64, furnace_level: i32) -> Result<(), DbErr> {
        entity::prelude::Member::update_many()
            .col_expr(
                entity::member::Column::FurnaceLevel,
                Expr::value(furnace_level),
            )
            .filter(entity::member::Column::Fid.eq(fid))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn update_nickname(&self, fid: i64, nickname: &str) -> Result<(), DbErr> {
        entity::prelude::Member::update_many()
            .col_expr(
                entity::member::Column::Nickname,
                Expr::value(nickname.to_string()),
            )
            .filter(entity::member::Column::Fid.eq(fid))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Delete a member from the roster.
    ///
    /// # Returns
    /// - `Ok(true)` - Member was deleted
    /// - `Ok(false)` - No member with the given FID
    /// - `Err(DbErr)` - Database operation failed
    pub async fn delete(&self, fid: i64) -> Result<bool, DbErr> {
        let result = entity::prelude::Member::delete_by_id(fid)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
