//! User repository for database operations

use common::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use crate::models::User;

const USER_COLUMNS: &str = "id, telegram_id, username, password_hash, is_admin, created_at";

/// Key of the advisory lock serializing bootstrap-admin creation
const BOOTSTRAP_LOCK_KEY: i64 = 0x6361_6e64_795f_6164;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user from an already hashed password
    pub async fn create(
        &self,
        username: Option<&str>,
        telegram_id: Option<i64>,
        password_hash: &str,
        is_admin: bool,
    ) -> DatabaseResult<User> {
        info!("Creating new user: {:?}", username);

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, telegram_id, password_hash, is_admin)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(telegram_id)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create the first user as an admin, only while the table is empty
    ///
    /// The emptiness check and the insert run in one transaction holding an
    /// advisory lock, so concurrent attempts cannot both succeed. Returns
    /// `None` when a user already exists.
    pub async fn create_bootstrap_admin(
        &self,
        username: Option<&str>,
        telegram_id: i64,
        password_hash: &str,
    ) -> DatabaseResult<Option<User>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(BOOTSTRAP_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, telegram_id, password_hash, is_admin)
            VALUES ($1, $2, $3, TRUE)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(telegram_id)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Bootstrap admin created with id {}", user.id);
        Ok(Some(user))
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by chat-platform identifier
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> DatabaseResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE telegram_id = $1"
        ))
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    /// Number of registered users
    pub async fn count(&self) -> DatabaseResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Get all users, newest first
    pub async fn list_all(&self) -> DatabaseResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
