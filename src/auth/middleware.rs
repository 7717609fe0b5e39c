//! 认证网关中间件
//!
//! 每个请求经过一次判定：公开路径与 OPTIONS 预检直接放行；其余路径
//! 必须携带 `Authorization: Bearer <token>`，令牌验证并解析出用户身份
//! 后写入请求扩展，任何一步失败都以统一的 401 响应短路，后续处理器
//! 不会被调用。

use crate::{auth::identity::UserIdentity, error::AppError, middleware::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（附加到请求扩展，整个请求期间只写一次）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub capabilities: Vec<String>,
}

impl From<UserIdentity> for AuthContext {
    fn from(identity: UserIdentity) -> Self {
        Self {
            user_id: identity.id,
            username: identity.username,
            capabilities: identity.capabilities,
        }
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 请求分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// 公开路径或预检请求，跳过令牌处理
    Pass,
    /// 受保护路径，必须完成令牌验证
    Authenticate,
}

/// 按方法和路径对请求分类
pub fn classify(method: &Method, path: &str, public_prefixes: &[String]) -> GateDecision {
    // 跨域预检请求直接放行
    if method == Method::OPTIONS {
        return GateDecision::Pass;
    }

    if public_prefixes.iter().any(|p| path.starts_with(p.as_str())) {
        return GateDecision::Pass;
    }

    GateDecision::Authenticate
}

/// 从 Authorization 头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .ok_or(AppError::AuthHeader)
}

/// 认证网关
///
/// 返回 `Err` 即为拒绝；`AppError` 的 `IntoResponse` 实现负责写入
/// `{code, message, data: null}` 响应体，后续 handler 不再执行。
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let decision = classify(
        req.method(),
        req.uri().path(),
        &state.config.security.public_prefixes,
    );

    if decision == GateDecision::Pass {
        return Ok(next.run(req).await);
    }

    // 提取并验证令牌
    let token = extract_token(req.headers())?;
    let user_id = state.token_codec.verify(&token)?;

    // 解析用户身份；用户已被删除时与无效令牌同样处理
    let identity = state.identity_resolver.resolve(user_id).await?;

    req.extensions_mut().insert(AuthContext::from(identity));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["/auth/".to_string(), "/health".to_string()]
    }

    #[test]
    fn test_classify_public_prefix() {
        assert_eq!(
            classify(&Method::POST, "/auth/login", &prefixes()),
            GateDecision::Pass
        );
        assert_eq!(
            classify(&Method::GET, "/health", &prefixes()),
            GateDecision::Pass
        );
    }

    #[test]
    fn test_classify_preflight() {
        assert_eq!(
            classify(&Method::OPTIONS, "/api/profile", &prefixes()),
            GateDecision::Pass
        );
    }

    #[test]
    fn test_classify_protected() {
        assert_eq!(
            classify(&Method::GET, "/api/profile", &prefixes()),
            GateDecision::Authenticate
        );
        // 前缀匹配不等于包含匹配
        assert_eq!(
            classify(&Method::GET, "/api/auth/", &prefixes()),
            GateDecision::Authenticate
        );
    }

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        let token = extract_token(&headers).unwrap();
        assert_eq!(token, "test_token_123");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Token abc".parse().unwrap());
        assert!(extract_token(&headers).is_err());

        headers.insert("authorization", "bearer abc".parse().unwrap());
        assert!(extract_token(&headers).is_err());
    }
}
