//! 饮食统计的 HTTP 处理器

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState, response::ApiResponse,
};

/// 本周食物分类热量占比
pub async fn food_categories(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let slices = state.stats_service.food_categories(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(slices)))
}

/// 本周摄入与消耗热量对比
pub async fn calorie_comparison(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let points = state.stats_service.calorie_comparison(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(points)))
}

/// 今日摄入、消耗与净值
pub async fn daily_summary(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let summary = state.stats_service.daily_summary(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(summary)))
}
