//! Error types for authentication and session handling

use common::DatabaseError;
use thiserror::Error;

/// Authentication error
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or wrong credentials, or an unknown user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Malformed input for user creation
    #[error("{0}")]
    Validation(String),

    /// Username or chat-platform identifier already taken
    #[error("{0}")]
    Conflict(String),

    /// Too many login attempts for the same identifier
    #[error("Too many login attempts")]
    RateLimited,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Underlying storage failed
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(constraint) => {
                let field = if constraint.contains("telegram") {
                    "telegram id"
                } else {
                    "username"
                };
                AuthError::Conflict(format!("A user with this {} already exists", field))
            }
            other => AuthError::Database(other),
        }
    }
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violations_become_conflicts() {
        let err: AuthError = DatabaseError::UniqueViolation("users_username_key".into()).into();
        assert_eq!(err.to_string(), "A user with this username already exists");

        let err: AuthError = DatabaseError::UniqueViolation("users_telegram_id_key".into()).into();
        assert_eq!(err.to_string(), "A user with this telegram id already exists");
    }

    #[test]
    fn test_other_database_errors_pass_through() {
        let err: AuthError = DatabaseError::Configuration("bad url".into()).into();
        assert!(matches!(err, AuthError::Database(_)));
    }
}
