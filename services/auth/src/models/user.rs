//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: Option<i64>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// User as exposed over the API, without credentials
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub telegram_id: Option<i64>,
    pub username: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            username: user.username,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// New user creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub telegram_id: Option<i64>,
    #[serde(default)]
    pub is_admin: bool,
}

/// User login credentials
///
/// Lookup is by `username` when present, otherwise by `telegram_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCredentials {
    pub username: Option<String>,
    pub telegram_id: Option<i64>,
    pub password: Option<String>,
}
