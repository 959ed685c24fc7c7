//! Login, bootstrap-admin and user administration

use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::models::{LoginCredentials, NewUser, User, UserSummary};
use crate::password::{hash_password, verify_against_dummy, verify_password};
use crate::rate_limiter::RateLimiter;
use crate::repositories::UserRepository;
use crate::session::SessionManager;
use crate::validation::{validate_password, validate_username};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    sessions: SessionManager,
    rate_limiter: RateLimiter,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(pool: PgPool, rate_limiter: RateLimiter) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionManager::new(pool),
            rate_limiter,
        }
    }

    /// Session manager used to issue and resolve tokens
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Check credentials and open a new session
    ///
    /// Every credential problem is reported as `InvalidCredentials`. While no
    /// user exists at all, a login carrying a telegram id and a password
    /// creates the first user as an admin.
    pub async fn login(&self, credentials: &LoginCredentials) -> AuthResult<LoginOutcome> {
        let password = credentials
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::InvalidCredentials)?;
        let key = throttle_key(credentials).ok_or(AuthError::InvalidCredentials)?;

        if !self.rate_limiter.is_allowed(&key).await {
            warn!("Login throttled for {}", key);
            return Err(AuthError::RateLimited);
        }

        let user = match self.authenticate(credentials, password).await {
            Ok(user) => user,
            Err(AuthError::InvalidCredentials) => {
                self.rate_limiter.record_failure(&key).await;
                warn!("Failed login for {}", key);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        self.rate_limiter.clear(&key).await;
        let token = self.sessions.issue_session(user.id).await?;
        info!("User {} logged in", user.id);

        Ok(LoginOutcome { token, user })
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
        password: &str,
    ) -> AuthResult<User> {
        let username = normalized_username(credentials);

        let existing = match (username, credentials.telegram_id) {
            (Some(username), _) => self.users.find_by_username(username).await?,
            (None, Some(telegram_id)) => self.users.find_by_telegram_id(telegram_id).await?,
            (None, None) => return Err(AuthError::InvalidCredentials),
        };

        let Some(user) = existing else {
            return self
                .bootstrap_admin(username, credentials.telegram_id, password)
                .await;
        };

        let Some(hash) = user.password_hash.as_deref() else {
            verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn bootstrap_admin(
        &self,
        username: Option<&str>,
        telegram_id: Option<i64>,
        password: &str,
    ) -> AuthResult<User> {
        let Some(telegram_id) = telegram_id else {
            verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        };
        if self.users.count().await? > 0 {
            verify_against_dummy(password);
            return Err(AuthError::InvalidCredentials);
        }

        let hash = hash_password(password)?;
        match self
            .users
            .create_bootstrap_admin(username, telegram_id, &hash)
            .await?
        {
            Some(user) => {
                warn!("Created bootstrap admin for telegram id {}", telegram_id);
                Ok(user)
            }
            None => Err(AuthError::InvalidCredentials),
        }
    }

    /// Create a user with a password
    pub async fn create_user(&self, new_user: &NewUser) -> AuthResult<User> {
        let username = new_user.username.trim();
        validate_username(username).map_err(AuthError::Validation)?;
        validate_password(&new_user.password).map_err(AuthError::Validation)?;

        let hash = hash_password(&new_user.password)?;
        let user = self
            .users
            .create(
                Some(username),
                new_user.telegram_id,
                &hash,
                new_user.is_admin,
            )
            .await?;

        info!("User {} created (admin: {})", user.id, user.is_admin);
        Ok(user)
    }

    /// All users, newest first
    pub async fn list_users(&self) -> AuthResult<Vec<UserSummary>> {
        let users = self.users.list_all().await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }
}

fn normalized_username(credentials: &LoginCredentials) -> Option<&str> {
    credentials
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
}

/// Identifier failed attempts are counted against
fn throttle_key(credentials: &LoginCredentials) -> Option<String> {
    match (normalized_username(credentials), credentials.telegram_id) {
        (Some(username), _) => Some(format!("user:{}", username.to_lowercase())),
        (None, Some(telegram_id)) => Some(format!("tg:{}", telegram_id)),
        (None, None) => None,
    }
}
