//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Authorization 头缺失或格式错误
    #[error("Authorization header is missing or invalid")]
    AuthHeader,

    /// 签名错误、令牌过期或令牌主体不存在，对外统一为同一消息
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not authenticated")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// 注册冲突（用户名或邮箱已存在），消息区分字段
    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthHeader | AppError::InvalidToken | AppError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthHeader
            | AppError::InvalidToken
            | AppError::Unauthorized
            | AppError::NotFound(_)
            | AppError::BadRequest(_)
            | AppError::Conflict(_) => self.to_string(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// 获取错误码（与 HTTP 状态码一致）
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 5xx 记录错误日志，4xx 只记录调试日志
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Application error");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }

        let body: ApiResponse<serde_json::Value> =
            ApiResponse::error(self.code(), self.user_message());

        (status, Json(body)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
