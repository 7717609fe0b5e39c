//! Password hashing and verification using Argon2id

use crate::{config::AppConfig, error::AppError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

/// Password hasher with fixed parameters
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create hasher with default parameters (OWASP recommended)
    pub fn new() -> Self {
        // OWASP recommended parameters (as of 2024)
        // m=64MiB, t=3 iterations, p=4 lanes
        let params = Params::new(65536, 3, 4, None).expect("Invalid Argon2 params");

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Self { argon2 }
    }

    /// Hash a password
    ///
    /// A random per-call salt is embedded in the output, so hashing the
    /// same password twice yields different strings.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AppError::Internal
            })?
            .to_string();

        Ok(password_hash)
    }

    /// Verify a password against a stored hash
    ///
    /// Comparison runs in constant time inside argon2. A malformed hash
    /// string counts as a failed match rather than an error.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Failed to parse password hash: {:?}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Validate a candidate password against the configured policy
    pub fn validate_password_policy(password: &str, config: &AppConfig) -> Result<(), AppError> {
        let min = config.security.password_min_length;

        if password.chars().count() < min {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                min
            )));
        }

        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "secret1";

        let hash = hasher.hash(password).unwrap();
        assert!(hash.contains("$argon2"));
        assert!(hasher.verify(password, &hash));
    }

    #[test]
    fn test_verify_fails_with_wrong_password() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("secret1").unwrap();
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn test_hash_is_different_each_time() {
        let hasher = PasswordHasher::new();
        let password = "secret1";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        // 随机盐保证同一密码两次哈希不同
        assert_ne!(hash1, hash2);

        assert!(hasher.verify(password, &hash1));
        assert!(hasher.verify(password, &hash2));
    }

    #[test]
    fn test_password_policy_uses_configured_minimum() {
        let mut config = crate::config::tests_support::test_config();
        config.security.password_min_length = 10;

        assert!(PasswordHasher::validate_password_policy("short", &config).is_err());
        assert!(PasswordHasher::validate_password_policy("exactly10!", &config).is_ok());

        // 默认下限
        config.security.password_min_length = 6;
        assert!(PasswordHasher::validate_password_policy("12345", &config).is_err());
        assert!(PasswordHasher::validate_password_policy("123456", &config).is_ok());
    }

    #[test]
    fn test_malformed_hash_is_false_not_panic() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("secret1", "not-a-hash"));
        assert!(!hasher.verify("secret1", ""));
        assert!(!hasher.verify("secret1", "$argon2id$garbage"));
    }
}
