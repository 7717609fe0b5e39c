//! 饮食统计服务
//!
//! 对已加载的汇总行做纯算术整形，供前端图表使用。统计窗口是用户最近
//! 一条饮食记录所在的自然周（周一开始），没有记录时取当前日期所在周。

use crate::{
    error::AppError,
    models::diet::{CaloriePoint, CategorySlice, DailyCalories, DailySummary},
    repository::{ActivityRepository, DietRepository},
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::PgPool;

pub struct StatsService {
    db: PgPool,
}

impl StatsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 各食物类别在统计周内的卡路里占比
    pub async fn food_categories(&self, user_id: i64) -> Result<Vec<CategorySlice>, AppError> {
        let diet_repo = DietRepository::new(self.db.clone());
        let (start, end) = self.current_week_range(user_id).await?;

        let totals = diet_repo.category_totals(user_id, start, end).await?;

        Ok(totals
            .into_iter()
            .map(|t| CategorySlice {
                category: t.category,
                value: t.total_calories,
            })
            .collect())
    }

    /// 统计周内每天的摄入与消耗对比，缺失的日期补零
    ///
    /// 折线图长表格式：每天两个点，category 为 Consumed / Burned。
    pub async fn calorie_comparison(&self, user_id: i64) -> Result<Vec<CaloriePoint>, AppError> {
        let diet_repo = DietRepository::new(self.db.clone());
        let activity_repo = ActivityRepository::new(self.db.clone());
        let (start, end) = self.current_week_range(user_id).await?;

        let intake = diet_repo.daily_intake(user_id, start, end).await?;
        let burned = activity_repo.daily_burned(user_id, start, end).await?;

        Ok(fill_week(start, &intake, &burned))
    }

    /// 今日摄入与消耗汇总
    pub async fn daily_summary(&self, user_id: i64) -> Result<DailySummary, AppError> {
        let diet_repo = DietRepository::new(self.db.clone());
        let activity_repo = ActivityRepository::new(self.db.clone());
        let today = Utc::now().date_naive();

        let intake = diet_repo.daily_intake(user_id, today, today).await?;
        let burned = activity_repo.daily_burned(user_id, today, today).await?;

        Ok(summarize_day(
            intake.first().map_or(0, |d| d.calories),
            burned.first().map_or(0, |d| d.calories),
        ))
    }

    /// 统计窗口：最近一条记录所在的周一到周日
    async fn current_week_range(&self, user_id: i64) -> Result<(NaiveDate, NaiveDate), AppError> {
        let diet_repo = DietRepository::new(self.db.clone());

        let anchor = diet_repo
            .latest_record_date(user_id)
            .await?
            .unwrap_or_else(|| Utc::now().date_naive());

        Ok(week_of(anchor))
    }
}

/// 包含 anchor 的自然周（周一开始）
fn week_of(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// 把按天的摄入/消耗汇总对齐到完整一周，先摄入系列后消耗系列
fn fill_week(
    start: NaiveDate,
    intake: &[DailyCalories],
    burned: &[DailyCalories],
) -> Vec<CaloriePoint> {
    let mut points = week_series(start, intake, "Consumed");
    points.extend(week_series(start, burned, "Burned"));
    points
}

/// 单个系列的完整一周，缺失的日期补零
fn week_series(start: NaiveDate, daily: &[DailyCalories], category: &str) -> Vec<CaloriePoint> {
    (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CaloriePoint {
                date,
                value: daily.iter().find(|d| d.date == date).map_or(0, |d| d.calories),
                category: category.to_string(),
            }
        })
        .collect()
}

/// 今日净卡路里与趋势方向
fn summarize_day(consumed: i64, burned: i64) -> DailySummary {
    let net = consumed - burned;

    DailySummary {
        calories_consumed: consumed,
        calories_burned: burned,
        net_calories: net,
        trend: if net > 0 { "up" } else { "down" }.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_week_of_is_monday_based() {
        // 2024-05-15 是周三
        let (start, end) = week_of(day("2024-05-15"));
        assert_eq!(start, day("2024-05-13"));
        assert_eq!(end, day("2024-05-19"));

        // 周一与周日落在同一周
        assert_eq!(week_of(day("2024-05-13")).0, day("2024-05-13"));
        assert_eq!(week_of(day("2024-05-19")).0, day("2024-05-13"));
    }

    #[test]
    fn test_fill_week_emits_both_series_zero_filled() {
        let start = day("2024-05-13");
        let intake = vec![DailyCalories {
            date: day("2024-05-14"),
            calories: 1800,
        }];
        let burned = vec![DailyCalories {
            date: day("2024-05-16"),
            calories: 400,
        }];

        let points = fill_week(start, &intake, &burned);

        // 每个系列 7 个点，先 Consumed 后 Burned
        assert_eq!(points.len(), 14);
        assert!(points[..7].iter().all(|p| p.category == "Consumed"));
        assert!(points[7..].iter().all(|p| p.category == "Burned"));

        assert_eq!(points[0].value, 0);
        assert_eq!(points[1].value, 1800);
        assert_eq!(points[6].date, day("2024-05-19"));
        assert_eq!(points[7 + 3].value, 400);
        assert_eq!(points[7 + 1].value, 0);
    }

    #[test]
    fn test_summarize_day_trend() {
        let up = summarize_day(2000, 500);
        assert_eq!(up.net_calories, 1500);
        assert_eq!(up.trend, "up");

        let down = summarize_day(300, 500);
        assert_eq!(down.net_calories, -200);
        assert_eq!(down.trend, "down");

        // 持平按 down 处理
        assert_eq!(summarize_day(500, 500).trend, "down");
    }
}
