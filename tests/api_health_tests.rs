//! 健康检查 API 集成测试
//!
//! /health 不依赖数据库，使用惰性连接池即可通过完整路由访问

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use health_system::middleware::AppState;
use std::sync::Arc;

mod common;
use common::{create_test_config, lazy_pool};

#[tokio::test]
async fn test_health_endpoint() {
    let state = Arc::new(
        AppState::new(create_test_config(), lazy_pool()).expect("Failed to create app state"),
    );
    let app = health_system::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["uptime_secs"].is_number());
}

#[tokio::test]
async fn test_health_does_not_require_token() {
    let state = Arc::new(
        AppState::new(create_test_config(), lazy_pool()).expect("Failed to create app state"),
    );
    let app = health_system::routes::create_router(state);

    // 无 Authorization 头也能访问
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}
