//! Session repository for database operations

use common::DatabaseResult;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewSession, Session};

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new session
    pub async fn create(&self, new_session: &NewSession) -> DatabaseResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, user_id, token, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, token, expires_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_session.user_id)
        .bind(&new_session.token)
        .bind(new_session.expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Find a session by its exact token, expired or not
    pub async fn find_by_token(&self, token: &str) -> DatabaseResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token, expires_at, created_at
            FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }
}
