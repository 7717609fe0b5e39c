//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    http::{header::HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::{auth::middleware::auth_gate, handlers, middleware::AppState};

/// 创建应用路由
///
/// 认证闸门作为一层覆盖全部路由，公开路径在闸门内部放行。
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查与认证入口）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login));

    // 需要认证的业务路由
    let api_routes = Router::new()
        // 当前用户信息
        .route("/api/profile", get(handlers::profile::get_profile))

        // 健康档案
        .route(
            "/api/user-profile",
            get(handlers::user_profile::get_user_profile)
                .post(handlers::user_profile::create_user_profile)
                .put(handlers::user_profile::update_user_profile)
                .delete(handlers::user_profile::delete_user_profile),
        )

        // 运动记录
        .route(
            "/api/user-activities",
            get(handlers::activity::list_activities)
                .post(handlers::activity::create_activity),
        )
        .route(
            "/api/user-activities/{id}",
            get(handlers::activity::get_activity)
                .put(handlers::activity::update_activity)
                .delete(handlers::activity::delete_activity),
        )

        // 饮食记录
        .route(
            "/api/dietary-records",
            get(handlers::diet::list_records)
                .post(handlers::diet::create_record),
        )
        .route(
            "/api/dietary-records/{id}",
            get(handlers::diet::get_record)
                .put(handlers::diet::update_record)
                .delete(handlers::diet::delete_record),
        )

        // 食物条目
        .route(
            "/api/food-items",
            get(handlers::food::list_items)
                .post(handlers::food::create_item),
        )
        .route(
            "/api/food-items/{id}",
            get(handlers::food::get_item)
                .put(handlers::food::update_item)
                .delete(handlers::food::delete_item),
        )

        // 饮食统计
        .route(
            "/api/dietary-stats/food-categories",
            get(handlers::stats::food_categories),
        )
        .route(
            "/api/dietary-stats/calorie-comparison",
            get(handlers::stats::calorie_comparison),
        )
        .route(
            "/api/dietary-stats/daily-summary",
            get(handlers::stats::daily_summary),
        )

        // 用户数据聚合
        .route(
            "/api/user-data/comprehensive",
            get(handlers::user_data::comprehensive),
        )
        .route("/api/user-data/stats", get(handlers::user_data::stats));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(build_cors_layer(&state))
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}

/// 按配置构建 CORS 层
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origin = state
        .config
        .security
        .cors_allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
