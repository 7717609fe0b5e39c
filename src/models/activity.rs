//! Exercise activity models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One exercise activity record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub id: i64,
    pub user_id: i64,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub activity_date: NaiveDate,
    pub duration: Option<i32>,
    pub exercise_type: Option<String>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub min_heart_rate: Option<i32>,
}

/// Create/update payload for an activity record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub activity_date: NaiveDate,
    pub duration: Option<i32>,
    pub exercise_type: Option<String>,
    pub steps: Option<i32>,
    pub calories: Option<i32>,
    pub max_heart_rate: Option<i32>,
    pub min_heart_rate: Option<i32>,
}
