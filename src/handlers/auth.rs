//! 认证相关的 HTTP 处理器

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::{
    auth::password::PasswordHasher,
    error::AppError,
    middleware::AppState,
    models::user::{LoginRequest, RegisterRequest},
    response::ApiResponse,
};

/// 用户注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // 字段格式之外，密码长度按运行时配置校验
    PasswordHasher::validate_password_policy(&req.password, &state.config)?;

    let result = state.auth_service.register(req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Register success",
        result,
    )))
}

/// 用户登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.auth_service.login(req).await?;

    Ok(Json(ApiResponse::success_with_message(
        "Login success",
        result,
    )))
}
