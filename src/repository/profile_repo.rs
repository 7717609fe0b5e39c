//! User profile repository (数据库访问层)

use crate::{
    error::AppError,
    models::profile::{ProfileRequest, UserProfile},
};
use sqlx::PgPool;

pub struct ProfileRepository {
    db: PgPool,
}

impl ProfileRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 查找用户的档案（每个用户至多一条）
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<UserProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profile WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;

        Ok(profile)
    }

    /// 创建档案
    pub async fn create(
        &self,
        user_id: i64,
        req: &ProfileRequest,
    ) -> Result<UserProfile, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profile
                (user_id, last_name, first_name, age, occupation, gender, favorite_sport)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.last_name)
        .bind(&req.first_name)
        .bind(req.age)
        .bind(&req.occupation)
        .bind(&req.gender)
        .bind(&req.favorite_sport)
        .fetch_one(&self.db)
        .await?;

        Ok(profile)
    }

    /// 更新档案
    pub async fn update_by_user_id(
        &self,
        user_id: i64,
        req: &ProfileRequest,
    ) -> Result<Option<UserProfile>, AppError> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE user_profile
            SET
                last_name = $2,
                first_name = $3,
                age = $4,
                occupation = $5,
                gender = $6,
                favorite_sport = $7
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.last_name)
        .bind(&req.first_name)
        .bind(req.age)
        .bind(&req.occupation)
        .bind(&req.gender)
        .bind(&req.favorite_sport)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    /// 删除档案
    pub async fn delete_by_user_id(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_profile WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
