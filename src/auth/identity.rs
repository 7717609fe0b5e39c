//! Identity resolution for validated token subjects

use crate::{error::AppError, repository::UserRepository};
use async_trait::async_trait;
use sqlx::PgPool;

/// 默认能力集：目前只有单一隐式角色
pub const CAP_AUTHENTICATED: &str = "authenticated-user";

/// Identity of the authenticated caller, valid for one request
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub capabilities: Vec<String>,
}

/// Maps a validated token subject to a full user identity
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a user id to an identity
    ///
    /// A subject whose user row no longer exists fails with the same
    /// error as an invalid token; the HTTP response must not reveal
    /// whether the account ever existed.
    async fn resolve(&self, user_id: i64) -> Result<UserIdentity, AppError>;
}

/// Identity resolver backed by the users table
pub struct PgIdentityResolver {
    db: PgPool,
}

impl PgIdentityResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityResolver for PgIdentityResolver {
    async fn resolve(&self, user_id: i64) -> Result<UserIdentity, AppError> {
        let repo = UserRepository::new(self.db.clone());

        let user = repo.find_by_id(user_id).await?.ok_or_else(|| {
            // 日志中保留细节以便审计，响应与无效令牌完全一致
            tracing::warn!(user_id, "Token subject does not map to an existing user");
            AppError::InvalidToken
        })?;

        Ok(UserIdentity {
            id: user.id,
            username: user.username,
            capabilities: vec![CAP_AUTHENTICATED.to_string()],
        })
    }
}
