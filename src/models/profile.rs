//! User profile models
//!
//! Wire format is camelCase to keep the existing frontend contract.

use serde::{Deserialize, Serialize};

/// Per-user profile, one row per user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub user_id: i64,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub age: Option<i32>,
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub favorite_sport: Option<String>,
}

/// Create/update payload for the profile
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub age: Option<i32>,
    pub occupation: Option<String>,
    pub gender: Option<String>,
    pub favorite_sport: Option<String>,
}
