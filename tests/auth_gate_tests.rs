//! 认证网关集成测试
//!
//! 使用内存身份解析器与哨兵处理器，不依赖数据库

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::any,
    Router,
};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use health_system::{
    auth::identity::{IdentityResolver, UserIdentity, CAP_AUTHENTICATED},
    auth::middleware::auth_gate,
    error::AppError,
    middleware::AppState,
};

mod common;
use common::{create_test_app_state_with_resolver, create_test_config};

/// 固定用户表的内存解析器
struct StaticResolver {
    known_user_id: i64,
}

#[async_trait]
impl IdentityResolver for StaticResolver {
    async fn resolve(&self, user_id: i64) -> Result<UserIdentity, AppError> {
        if user_id == self.known_user_id {
            Ok(UserIdentity {
                id: user_id,
                username: "alice".to_string(),
                capabilities: vec![CAP_AUTHENTICATED.to_string()],
            })
        } else {
            Err(AppError::InvalidToken)
        }
    }
}

/// 构造带哨兵处理器的测试路由
/// 哨兵计数器记录受保护处理器被执行的次数
fn sentinel_app(state: Arc<AppState>, counter: Arc<AtomicUsize>) -> Router {
    let protected_counter = counter.clone();

    Router::new()
        .route(
            "/api/sentinel",
            any(move || {
                let counter = protected_counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    "ok"
                }
            }),
        )
        .route("/health", any(|| async { "healthy" }))
        .route("/auth/login", any(|| async { "login" }))
        .layer(axum::middleware::from_fn_with_state(state.clone(), auth_gate))
        .with_state(state)
}

fn test_state() -> Arc<AppState> {
    create_test_app_state_with_resolver(
        create_test_config(),
        Arc::new(StaticResolver { known_user_id: 7 }),
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_header_is_rejected() {
    let state = test_state();
    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], 401);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "Authorization header is missing or invalid");

    // 处理器未被执行
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_header_is_rejected() {
    let state = test_state();
    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .header(header::AUTHORIZATION, "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_valid_token_passes() {
    let state = test_state();
    let token = state.token_codec.issue(7).unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let state = test_state();
    // 签发时刻足够早，令牌此刻已过期
    let token = state
        .token_codec
        .issue_at(7, chrono::Utc::now() - chrono::Duration::hours(2))
        .unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let state = test_state();
    let token = state.token_codec.issue(7).unwrap();

    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .header(header::AUTHORIZATION, format!("Bearer {}", tampered))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let state = test_state();
    // 解析器只认识用户 7，这里签发给已不存在的用户 99
    let token = state.token_codec.issue(99).unwrap();

    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api/sentinel")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 响应与无效令牌无法区分
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_public_prefix_passes_without_token() {
    let state = test_state();
    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_preflight_passes_without_token() {
    let state = test_state();
    let counter = Arc::new(AtomicUsize::new(0));
    let app = sentinel_app(state, counter);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/sentinel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // 预检请求不会被网关拦截
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}
