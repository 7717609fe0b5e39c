//! 当前用户信息的 HTTP 处理器

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::user::UserInfoResponse,
    repository::UserRepository,
    response::ApiResponse,
};

/// 获取当前登录用户的基础信息
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(ctx.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::success(UserInfoResponse::from(user))))
}
