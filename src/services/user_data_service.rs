//! 用户数据聚合服务
//!
//! 把档案、运动记录和饮食记录组合成单个响应，并在其上计算全量统计。

use crate::{
    error::AppError,
    models::activity::UserActivity,
    models::diet::DietaryRecord,
    models::user_data::{ComprehensiveUserData, UserStats},
    repository::{ActivityRepository, DietRepository, ProfileRepository},
};
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;

pub struct UserDataService {
    db: PgPool,
}

impl UserDataService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 档案 + 运动与饮食历史 + 统计，单次响应
    pub async fn comprehensive(&self, user_id: i64) -> Result<ComprehensiveUserData, AppError> {
        let profile = ProfileRepository::new(self.db.clone())
            .find_by_user_id(user_id)
            .await?;
        let activities = ActivityRepository::new(self.db.clone())
            .list_by_user_id(user_id)
            .await?;
        let dietary_records = DietRepository::new(self.db.clone())
            .list_records_by_user_id(user_id)
            .await?;

        let stats = compute_stats(&activities, &dietary_records, Utc::now().date_naive());

        Ok(ComprehensiveUserData {
            profile,
            activities,
            dietary_records,
            stats,
        })
    }

    /// 仅统计数字
    pub async fn stats(&self, user_id: i64) -> Result<UserStats, AppError> {
        let activities = ActivityRepository::new(self.db.clone())
            .list_by_user_id(user_id)
            .await?;
        let dietary_records = DietRepository::new(self.db.clone())
            .list_records_by_user_id(user_id)
            .await?;

        Ok(compute_stats(
            &activities,
            &dietary_records,
            Utc::now().date_naive(),
        ))
    }
}

/// 全量历史上的聚合统计
///
/// 缺失字段按 0 计；平均心率取每条记录 (max + min) / 2 的均值，只统计
/// 两个值都存在的记录；近期活动数是 today 之前 7 天内（不含边界日）的
/// 记录数。
fn compute_stats(
    activities: &[UserActivity],
    dietary_records: &[DietaryRecord],
    today: NaiveDate,
) -> UserStats {
    let total_steps: i64 = activities
        .iter()
        .map(|a| a.steps.unwrap_or(0) as i64)
        .sum();
    let total_calories: i64 = activities
        .iter()
        .map(|a| a.calories.unwrap_or(0) as i64)
        .sum();
    let total_duration: i64 = activities
        .iter()
        .map(|a| a.duration.unwrap_or(0) as i64)
        .sum();

    let heart_rates: Vec<f64> = activities
        .iter()
        .filter_map(|a| match (a.max_heart_rate, a.min_heart_rate) {
            (Some(max), Some(min)) => Some((max + min) as f64 / 2.0),
            _ => None,
        })
        .collect();
    let avg_heart_rate = if heart_rates.is_empty() {
        0.0
    } else {
        heart_rates.iter().sum::<f64>() / heart_rates.len() as f64
    };

    let avg_daily_calories = if dietary_records.is_empty() {
        0.0
    } else {
        dietary_records
            .iter()
            .map(|r| r.total_calories.unwrap_or(0) as f64)
            .sum::<f64>()
            / dietary_records.len() as f64
    };

    let seven_days_ago = today - Duration::days(7);
    let recent_activities_count = activities
        .iter()
        .filter(|a| a.activity_date > seven_days_ago)
        .count() as i64;

    UserStats {
        total_steps,
        total_calories,
        total_duration,
        avg_heart_rate,
        total_dietary_records: dietary_records.len() as i64,
        avg_daily_calories,
        recent_activities_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn activity(date: &str, steps: Option<i32>, calories: Option<i32>) -> UserActivity {
        UserActivity {
            id: 1,
            user_id: 1,
            height: None,
            weight: None,
            bmi: None,
            activity_date: day(date),
            duration: Some(30),
            exercise_type: None,
            steps,
            calories,
            max_heart_rate: Some(160),
            min_heart_rate: Some(80),
        }
    }

    fn record(total_calories: Option<i32>) -> DietaryRecord {
        DietaryRecord {
            id: 1,
            user_id: 1,
            record_date: day("2024-05-14"),
            record_time: None,
            meal_type: None,
            notes: None,
            total_calories,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn test_compute_stats_sums_and_averages() {
        let activities = vec![
            activity("2024-05-14", Some(8000), Some(300)),
            activity("2024-05-15", Some(6000), None),
        ];
        let records = vec![record(Some(1800)), record(Some(2200)), record(None)];

        let stats = compute_stats(&activities, &records, day("2024-05-16"));

        assert_eq!(stats.total_steps, 14000);
        assert_eq!(stats.total_calories, 300);
        assert_eq!(stats.total_duration, 60);
        assert_eq!(stats.avg_heart_rate, 120.0);
        assert_eq!(stats.total_dietary_records, 3);
        // (1800 + 2200 + 0) / 3
        assert!((stats.avg_daily_calories - 4000.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.recent_activities_count, 2);
    }

    #[test]
    fn test_compute_stats_empty_history() {
        let stats = compute_stats(&[], &[], day("2024-05-16"));

        assert_eq!(stats.total_steps, 0);
        assert_eq!(stats.avg_heart_rate, 0.0);
        assert_eq!(stats.avg_daily_calories, 0.0);
        assert_eq!(stats.total_dietary_records, 0);
        assert_eq!(stats.recent_activities_count, 0);
    }

    #[test]
    fn test_compute_stats_recent_window_excludes_boundary() {
        // 边界日（正好 7 天前）不计入近期活动
        let activities = vec![
            activity("2024-05-09", None, None),
            activity("2024-05-10", None, None),
        ];

        let stats = compute_stats(&activities, &[], day("2024-05-16"));
        assert_eq!(stats.recent_activities_count, 1);
    }
}
