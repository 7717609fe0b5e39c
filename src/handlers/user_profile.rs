//! 用户健康档案的 HTTP 处理器

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::profile::ProfileRequest,
    repository::ProfileRepository,
    response::ApiResponse,
};

/// 获取当前用户的健康档案
pub async fn get_user_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProfileRepository::new(state.db.clone());
    let profile = repo
        .find_by_user_id(ctx.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ApiResponse::success(profile)))
}

/// 创建当前用户的健康档案
/// 每个用户至多一份档案，重复创建返回 409
pub async fn create_user_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(req): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProfileRepository::new(state.db.clone());

    if repo.find_by_user_id(ctx.user_id).await?.is_some() {
        return Err(AppError::Conflict("Profile already exists".to_string()));
    }

    let profile = repo.create(ctx.user_id, &req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Profile created",
        profile,
    )))
}

/// 更新当前用户的健康档案
pub async fn update_user_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
    Json(req): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProfileRepository::new(state.db.clone());
    let profile = repo
        .update_by_user_id(ctx.user_id, &req)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ApiResponse::success_with_message(
        "Profile updated",
        profile,
    )))
}

/// 删除当前用户的健康档案
pub async fn delete_user_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = ProfileRepository::new(state.db.clone());
    let deleted = repo.delete_by_user_id(ctx.user_id).await?;

    if !deleted {
        return Err(AppError::NotFound("Profile not found".to_string()));
    }

    Ok(Json(ApiResponse::<()>::success_with_message(
        "Profile deleted",
        (),
    )))
}
