//! Custom error types for the common library
//!
//! This module defines the persistence and ordering error types shared by
//! the HTTP API and the bot.

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a query error, separating unique violations from the rest.
    pub fn from_query(err: SqlxError) -> Self {
        if let SqlxError::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return DatabaseError::UniqueViolation(constraint);
            }
        }
        DatabaseError::Query(err)
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        DatabaseError::from_query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Errors raised by the order service
#[derive(Error, Debug)]
pub enum OrderError {
    /// Checkout payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Referenced order or products do not exist
    #[error("{0}")]
    NotFound(String),

    /// Underlying storage failed
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<SqlxError> for OrderError {
    fn from(err: SqlxError) -> Self {
        OrderError::Database(err.into())
    }
}

/// Type alias for Result with OrderError
pub type OrderResult<T> = Result<T, OrderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_stay_query_errors() {
        let err = DatabaseError::from_query(SqlxError::RowNotFound);
        assert!(matches!(err, DatabaseError::Query(SqlxError::RowNotFound)));
    }

    #[test]
    fn test_order_error_messages_are_bare() {
        let err = OrderError::Validation("Invalid items".to_string());
        assert_eq!(err.to_string(), "Invalid items");

        let err = OrderError::NotFound("Order not found".to_string());
        assert_eq!(err.to_string(), "Order not found");
    }
}
