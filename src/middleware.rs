//! HTTP 中间件与应用状态

use axum::{extract::Request, middleware::Next, response::Response};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    auth::identity::{IdentityResolver, PgIdentityResolver},
    auth::token::TokenCodec,
    config::AppConfig,
    error::AppError,
    services::{AuthService, StatsService, UserDataService},
};

/// 应用状态
///
/// 服务使用 Arc 包装，多个请求共享同一实例，Clone 成本低廉。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: PgPool,
    pub token_codec: Arc<TokenCodec>,
    pub identity_resolver: Arc<dyn IdentityResolver>,
    pub auth_service: Arc<AuthService>,
    pub stats_service: Arc<StatsService>,
    pub user_data_service: Arc<UserDataService>,
}

impl AppState {
    /// 构建包含全部服务的应用状态
    pub fn new(config: AppConfig, db: PgPool) -> Result<Self, AppError> {
        let token_codec = Arc::new(TokenCodec::from_config(&config)?);
        let identity_resolver: Arc<dyn IdentityResolver> =
            Arc::new(PgIdentityResolver::new(db.clone()));
        let auth_service = Arc::new(AuthService::new(db.clone(), token_codec.clone()));
        let stats_service = Arc::new(StatsService::new(db.clone()));
        let user_data_service = Arc::new(UserDataService::new(db.clone()));

        Ok(Self {
            config,
            db,
            token_codec,
            identity_resolver,
            auth_service,
            stats_service,
            user_data_service,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 trace_id 和 request_id，并记录指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(&req);
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().to_string();

    let span = tracing::info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    async move {
        let start = Instant::now();

        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // 记录指标 - 使用静态字符串
        let method_name = match method.as_str() {
            "GET" => "GET",
            "POST" => "POST",
            "PUT" => "PUT",
            "DELETE" => "DELETE",
            "OPTIONS" => "OPTIONS",
            _ => "UNKNOWN",
        };
        let status_code = match status {
            200 => "200",
            400 => "400",
            401 => "401",
            404 => "404",
            409 => "409",
            500 => "500",
            _ => "other",
        };

        metrics::counter!("http_requests_total", "method" => method_name, "status" => status_code)
            .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(
            method = %method,
            uri = %uri,
            status = status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        // 在响应头中添加 trace_id
        let mut response = response;
        if let Ok(value) = trace_id.parse() {
            response.headers_mut().insert("x-trace-id", value);
        }
        if let Ok(value) = request_id.parse() {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 trace_id
fn extract_or_generate_trace_id(req: &Request) -> String {
    req.headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
