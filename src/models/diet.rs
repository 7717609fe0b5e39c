//! Dietary record and food item models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// One meal record; food items reference it
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DietaryRecord {
    pub id: i64,
    pub user_id: i64,
    pub record_date: NaiveDate,
    pub record_time: Option<NaiveTime>,
    pub meal_type: Option<String>,
    pub notes: Option<String>,
    pub total_calories: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a dietary record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryRecordRequest {
    pub record_date: NaiveDate,
    pub record_time: Option<NaiveTime>,
    pub meal_type: Option<String>,
    pub notes: Option<String>,
    pub total_calories: Option<i32>,
}

/// One food item inside a dietary record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: i64,
    pub dietary_record_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub calories: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Create/update payload for a food item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemRequest {
    pub dietary_record_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub calories: Option<i32>,
}

/// Per-category calorie total over a date range
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryTotal {
    pub category: String,
    pub total_calories: i64,
}

/// Calorie sum for one day
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyCalories {
    pub date: NaiveDate,
    pub calories: i64,
}

/// Pie chart slice for the frontend
#[derive(Debug, Serialize)]
pub struct CategorySlice {
    #[serde(rename = "type")]
    pub category: String,
    pub value: i64,
}

/// Line chart point for the frontend
///
/// Long format: one point per day per series, `category` is either
/// "Consumed" or "Burned".
#[derive(Debug, Serialize)]
pub struct CaloriePoint {
    pub date: NaiveDate,
    pub value: i64,
    pub category: String,
}

/// Today's intake vs burned totals
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub calories_consumed: i64,
    pub calories_burned: i64,
    pub net_calories: i64,
    /// "up" when net is positive, "down" otherwise
    pub trend: String,
}
