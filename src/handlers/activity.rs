//! 运动记录的 HTTP 处理器

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::activity::{ActivityRequest, UserActivity},
    repository::ActivityRepository,
    response::ApiResponse,
};

/// 查找属于当前用户的活动记录，越权访问与不存在同样返回 404
async fn find_owned(
    repo: &ActivityRepository,
    id: i64,
    user_id: i64,
) -> Result<UserActivity, AppError> {
    let activity = repo
        .find_by_id(id)
        .await?
        .filter(|a| a.user_id == user_id)
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(activity)
}

/// 列出当前用户的全部运动记录
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = ActivityRepository::new(state.db.clone());
    let activities = repo.list_by_user_id(ctx.user_id).await?;

    Ok(Json(ApiResponse::success(activities)))
}

/// 获取单条运动记录
pub async fn get_activity(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ActivityRepository::new(state.db.clone());
    let activity = find_owned(&repo, id, ctx.user_id).await?;

    Ok(Json(ApiResponse::success(activity)))
}

/// 创建运动记录
pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(req): Json<ActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ActivityRepository::new(state.db.clone());
    let activity = repo.create(ctx.user_id, &req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Activity created",
        activity,
    )))
}

/// 更新运动记录
pub async fn update_activity(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
    Json(req): Json<ActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ActivityRepository::new(state.db.clone());
    find_owned(&repo, id, ctx.user_id).await?;

    let activity = repo
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".to_string()))?;

    Ok(Json(ApiResponse::success_with_message(
        "Activity updated",
        activity,
    )))
}

/// 删除运动记录
pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ActivityRepository::new(state.db.clone());
    find_owned(&repo, id, ctx.user_id).await?;
    repo.delete(id).await?;

    Ok(Json(ApiResponse::<()>::success_with_message(
        "Activity deleted",
        (),
    )))
}
