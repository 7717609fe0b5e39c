//! 认证服务：注册与登录

use crate::{
    auth::password::PasswordHasher,
    auth::token::TokenCodec,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User},
    repository::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    token_codec: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(db: PgPool, token_codec: Arc<TokenCodec>) -> Self {
        Self { db, token_codec }
    }

    /// 用户注册
    ///
    /// 用户名和邮箱冲突返回不同的 409 消息。
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        // 检查用户名是否已存在
        if user_repo.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        // 检查邮箱是否已存在
        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        // 哈希密码后入库
        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user = user_repo
            .create(&req.username, &password_hash, &req.email)
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(RegisterResponse {
            username: user.username,
            email: user.email,
        })
    }

    /// 用户登录
    ///
    /// 用户不存在和密码错误返回同一个泛化错误，不泄露具体字段。
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user: Option<User> = user_repo.find_by_username(&req.username).await?;

        let hasher = PasswordHasher::new();
        let verified = match &user {
            Some(user) => hasher.verify(&req.password, &user.password_hash),
            None => false,
        };

        if !verified {
            tracing::debug!(username = %req.username, "Login failed");
            return Err(AppError::BadRequest(
                "Username or password is incorrect".to_string(),
            ));
        }

        // user 已验证存在
        let user = user.ok_or(AppError::Internal)?;
        let token = self.token_codec.issue(user.id)?;

        tracing::info!(user_id = user.id, username = %user.username, "Login success");

        Ok(LoginResponse { token })
    }
}
