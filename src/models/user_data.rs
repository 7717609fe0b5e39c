//! Aggregated user data views

use crate::models::{activity::UserActivity, diet::DietaryRecord, profile::UserProfile};
use serde::Serialize;

/// Aggregate numbers over the caller's full history
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_steps: i64,
    pub total_calories: i64,
    pub total_duration: i64,
    pub avg_heart_rate: f64,
    pub total_dietary_records: i64,
    pub avg_daily_calories: f64,
    pub recent_activities_count: i64,
}

/// Profile, activity and diet history plus derived stats in one payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveUserData {
    pub profile: Option<UserProfile>,
    pub activities: Vec<UserActivity>,
    pub dietary_records: Vec<DietaryRecord>,
    pub stats: UserStats,
}
