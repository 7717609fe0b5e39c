//! Bearer token issuing and verification
//! Self-contained HS256 tokens carrying the user id as decimal subject

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Signed token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id, serialized as a decimal string)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Token codec holding the process-wide signing key
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    validity_secs: u64,
}

impl TokenCodec {
    /// Create token codec from config
    ///
    /// The signing key is either loaded from `security.token_secret` or
    /// generated randomly at process start. A generated key lives only in
    /// memory, so tokens do not survive a restart.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret: Vec<u8> = match &config.security.token_secret {
            Some(secret) => {
                let secret = secret.expose_secret();

                // Ensure secret is at least 32 bytes for HS256
                if secret.len() < 32 {
                    return Err(AppError::Config(
                        "Token secret too short (min 32 chars)".to_string(),
                    ));
                }
                secret.as_bytes().to_vec()
            }
            None => {
                let mut key = [0u8; 32];
                rand::rngs::OsRng.fill_bytes(&mut key);
                tracing::warn!(
                    "No token secret configured; generated an in-memory signing key. \
                     All tokens become invalid when the process restarts"
                );
                key.to_vec()
            }
        };

        let mut validation = Validation::new(Algorithm::HS256);
        // 零容差：exp < now 即失效，令牌有效期精确到过期时刻本身
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
            validity_secs: config.security.token_exp_secs,
        })
    }

    /// Issue a token for the given user id with an explicit clock
    pub fn issue_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<String, AppError> {
        let expiration = now + Duration::seconds(self.validity_secs as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal
        })
    }

    /// Issue a token for the given user id
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Verify a token and return its subject
    ///
    /// Fails for a bad signature, a malformed payload, or an expired token.
    /// Never panics on malformed input.
    pub fn verify(&self, token: &str) -> Result<i64, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token validation failed: {:?}", e);
            AppError::InvalidToken
        })?;

        data.claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::InvalidToken)
    }

    /// Token validity window in seconds
    pub fn validity_secs(&self) -> u64 {
        self.validity_secs
    }
}
