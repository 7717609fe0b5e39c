//! Dietary record and food item repository (数据库访问层)

use crate::{
    error::AppError,
    models::diet::{
        CategoryTotal, DailyCalories, DietaryRecord, DietaryRecordRequest, FoodItem,
        FoodItemRequest,
    },
};
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct DietRepository {
    db: PgPool,
}

impl DietRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ===== 饮食记录 =====

    /// 列出用户的全部饮食记录
    pub async fn list_records_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<DietaryRecord>, AppError> {
        let records = sqlx::query_as::<_, DietaryRecord>(
            "SELECT * FROM dietary_record WHERE user_id = $1 ORDER BY record_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// 根据 ID 查找饮食记录
    pub async fn find_record_by_id(&self, id: i64) -> Result<Option<DietaryRecord>, AppError> {
        let record =
            sqlx::query_as::<_, DietaryRecord>("SELECT * FROM dietary_record WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db)
                .await?;

        Ok(record)
    }

    /// 创建饮食记录
    pub async fn create_record(
        &self,
        user_id: i64,
        req: &DietaryRecordRequest,
    ) -> Result<DietaryRecord, AppError> {
        let record = sqlx::query_as::<_, DietaryRecord>(
            r#"
            INSERT INTO dietary_record
                (user_id, record_date, record_time, meal_type, notes, total_calories)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(req.record_date)
        .bind(req.record_time)
        .bind(&req.meal_type)
        .bind(&req.notes)
        .bind(req.total_calories)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    /// 更新饮食记录
    pub async fn update_record(
        &self,
        id: i64,
        req: &DietaryRecordRequest,
    ) -> Result<Option<DietaryRecord>, AppError> {
        let record = sqlx::query_as::<_, DietaryRecord>(
            r#"
            UPDATE dietary_record
            SET
                record_date = $2,
                record_time = $3,
                meal_type = $4,
                notes = $5,
                total_calories = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(req.record_date)
        .bind(req.record_time)
        .bind(&req.meal_type)
        .bind(&req.notes)
        .bind(req.total_calories)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    /// 删除饮食记录（级联删除其食物条目）
    pub async fn delete_record(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM dietary_record WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ===== 食物条目 =====

    /// 列出某条饮食记录下的食物条目
    pub async fn list_items_by_record_id(&self, record_id: i64) -> Result<Vec<FoodItem>, AppError> {
        let items =
            sqlx::query_as::<_, FoodItem>("SELECT * FROM food_item WHERE dietary_record_id = $1")
                .bind(record_id)
                .fetch_all(&self.db)
                .await?;

        Ok(items)
    }

    /// 根据 ID 查找食物条目
    pub async fn find_item_by_id(&self, id: i64) -> Result<Option<FoodItem>, AppError> {
        let item = sqlx::query_as::<_, FoodItem>("SELECT * FROM food_item WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(item)
    }

    /// 创建食物条目
    pub async fn create_item(&self, req: &FoodItemRequest) -> Result<FoodItem, AppError> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            INSERT INTO food_item
                (dietary_record_id, name, category, quantity, unit, calories)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.dietary_record_id)
        .bind(&req.name)
        .bind(&req.category)
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(req.calories)
        .fetch_one(&self.db)
        .await?;

        Ok(item)
    }

    /// 更新食物条目
    pub async fn update_item(
        &self,
        id: i64,
        req: &FoodItemRequest,
    ) -> Result<Option<FoodItem>, AppError> {
        let item = sqlx::query_as::<_, FoodItem>(
            r#"
            UPDATE food_item
            SET
                name = $2,
                category = $3,
                quantity = $4,
                unit = $5,
                calories = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.category)
        .bind(req.quantity)
        .bind(&req.unit)
        .bind(req.calories)
        .fetch_optional(&self.db)
        .await?;

        Ok(item)
    }

    /// 删除食物条目
    pub async fn delete_item(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM food_item WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ===== 统计查询 =====

    /// 用户最近一条饮食记录的日期
    pub async fn latest_record_date(&self, user_id: i64) -> Result<Option<NaiveDate>, AppError> {
        // MAX 聚合恒返回一行，无记录时为 NULL
        let (date,): (Option<NaiveDate>,) =
            sqlx::query_as("SELECT MAX(record_date) FROM dietary_record WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.db)
                .await?;

        Ok(date)
    }

    /// 按食物类别汇总某时间段内的卡路里
    pub async fn category_totals(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CategoryTotal>, AppError> {
        let rows = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT COALESCE(fi.category, 'other') AS category,
                   COALESCE(SUM(fi.calories), 0)::BIGINT AS total_calories
            FROM food_item fi
            JOIN dietary_record dr ON fi.dietary_record_id = dr.id
            WHERE dr.user_id = $1 AND dr.record_date BETWEEN $2 AND $3
            GROUP BY COALESCE(fi.category, 'other')
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// 按日汇总某时间段内摄入的卡路里
    pub async fn daily_intake(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyCalories>, AppError> {
        let rows = sqlx::query_as::<_, DailyCalories>(
            r#"
            SELECT record_date AS date, COALESCE(SUM(total_calories), 0)::BIGINT AS calories
            FROM dietary_record
            WHERE user_id = $1 AND record_date BETWEEN $2 AND $3
            GROUP BY record_date
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
