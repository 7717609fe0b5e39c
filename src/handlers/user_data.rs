//! 用户数据聚合的 HTTP 处理器

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext, error::AppError, middleware::AppState, response::ApiResponse,
};

/// 档案、运动与饮食历史及统计的汇总视图
pub async fn comprehensive(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let data = state.user_data_service.comprehensive(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(data)))
}

/// 全量历史上的统计数字
pub async fn stats(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.user_data_service.stats(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(stats)))
}
