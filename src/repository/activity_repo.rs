//! Exercise activity repository (数据库访问层)

use crate::{
    error::AppError,
    models::{
        activity::{ActivityRequest, UserActivity},
        diet::DailyCalories,
    },
};
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct ActivityRepository {
    db: PgPool,
}

impl ActivityRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出用户的全部活动记录
    pub async fn list_by_user_id(&self, user_id: i64) -> Result<Vec<UserActivity>, AppError> {
        let activities = sqlx::query_as::<_, UserActivity>(
            "SELECT * FROM user_activity WHERE user_id = $1 ORDER BY activity_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(activities)
    }

    /// 根据 ID 查找活动记录
    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserActivity>, AppError> {
        let activity =
            sqlx::query_as::<_, UserActivity>("SELECT * FROM user_activity WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(activity)
    }

    /// 创建活动记录
    pub async fn create(
        &self,
        user_id: i64,
        req: &ActivityRequest,
    ) -> Result<UserActivity, AppError> {
        let activity = sqlx::query_as::<_, UserActivity>(
            r#"
            INSERT INTO user_activity
                (user_id, height, weight, bmi, activity_date, duration, exercise_type,
                 steps, calories, max_heart_rate, min_heart_rate)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(req.height)
        .bind(req.weight)
        .bind(req.bmi)
        .bind(req.activity_date)
        .bind(req.duration)
        .bind(&req.exercise_type)
        .bind(req.steps)
        .bind(req.calories)
        .bind(req.max_heart_rate)
        .bind(req.min_heart_rate)
        .fetch_one(&self.db)
        .await?;

        Ok(activity)
    }

    /// 更新活动记录
    pub async fn update(
        &self,
        id: i64,
        req: &ActivityRequest,
    ) -> Result<Option<UserActivity>, AppError> {
        let activity = sqlx::query_as::<_, UserActivity>(
            r#"
            UPDATE user_activity
            SET
                height = $2,
                weight = $3,
                bmi = $4,
                activity_date = $5,
                duration = $6,
                exercise_type = $7,
                steps = $8,
                calories = $9,
                max_heart_rate = $10,
                min_heart_rate = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.height)
        .bind(req.weight)
        .bind(req.bmi)
        .bind(req.activity_date)
        .bind(req.duration)
        .bind(&req.exercise_type)
        .bind(req.steps)
        .bind(req.calories)
        .bind(req.max_heart_rate)
        .bind(req.min_heart_rate)
        .fetch_optional(&self.db)
        .await?;

        Ok(activity)
    }

    /// 删除活动记录
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM user_activity WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 按日汇总某时间段内消耗的卡路里
    pub async fn daily_burned(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCalories>, AppError> {
        let rows = sqlx::query_as::<_, DailyCalories>(
            r#"
            SELECT activity_date AS date, COALESCE(SUM(calories), 0)::BIGINT AS calories
            FROM user_activity
            WHERE user_id = $1 AND activity_date BETWEEN $2 AND $3
            GROUP BY activity_date
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
