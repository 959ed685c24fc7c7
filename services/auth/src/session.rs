//! Session management backed by the `sessions` table

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::AuthResult;
use crate::models::{NewSession, Session, User};
use crate::repositories::{SessionRepository, UserRepository};

/// Lifetime of a session from the moment it is issued
pub const SESSION_TTL_DAYS: i64 = 7;

/// Length of generated session tokens
pub const TOKEN_LENGTH: usize = 64;

/// Session lifetime as a duration
pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

/// Generate an opaque session token from the thread-local CSPRNG
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Session manager for issuing and resolving user sessions
#[derive(Clone)]
pub struct SessionManager {
    sessions: SessionRepository,
    users: UserRepository,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(pool: PgPool) -> Self {
        Self {
            sessions: SessionRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Create a new session for a user and return its token
    ///
    /// Earlier sessions of the same user stay valid.
    pub async fn issue_session(&self, user_id: i64) -> AuthResult<String> {
        info!("Creating session for user: {}", user_id);

        let new_session = NewSession {
            user_id,
            token: generate_token(),
            expires_at: Utc::now() + session_ttl(),
        };
        let session = self.sessions.create(&new_session).await?;

        Ok(session.token)
    }

    /// Resolve a token to its user, if the session exists and has not expired
    ///
    /// Expired sessions are left in place; they just stop resolving.
    pub async fn resolve_session(&self, token: &str) -> AuthResult<Option<User>> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(session) = self.sessions.find_by_token(token).await? else {
            return Ok(None);
        };
        if !is_live(&session, Utc::now()) {
            return Ok(None);
        }

        let user = self.users.find_by_id(session.user_id).await?;
        if user.is_none() {
            warn!("Session {} points at a missing user", session.id);
        }

        Ok(user)
    }
}

fn is_live(session: &Session, now: DateTime<Utc>) -> bool {
    !session.is_expired_at(now)
}
