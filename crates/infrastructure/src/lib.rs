//! Infrastructure layer for peer presentation grading
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - The grading schema, including the one-evaluation-per-evaluator key
//! - PostgreSQL implementations of the application repository ports
//!
//! ## Usage
//!
//! ```rust,ignore
//! use peer_grading_common::AppConfig;
//! use peer_grading_infrastructure::DatabasePool;
//!
//! let config = AppConfig::load()?;
//! let db = DatabasePool::open(&config.database).await?;
//! if !db.check_store().await.is_ready() {
//!     anyhow::bail!("grading store is not ready");
//! }
//!
//! let evaluations = Arc::new(db.evaluations());
//! let settings = Arc::new(db.settings());
//! let directory = Arc::new(db.directory());
//! ```

pub mod database;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use database::{DatabaseConfig, DatabasePool, StoreStatus, TransactionExt};
pub use repositories::{PgDirectory, PgEvaluationRepository, PgSettingsRepository};
pub use schema::apply_schema;

use peer_grading_application::ApplicationError;

// Re-export result and error types
pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE raised by PostgreSQL on a unique constraint violation
pub(crate) const UNIQUE_VIOLATION: &str = "23505";

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A unique key rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored value could not be mapped back to the domain
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Classify a sqlx error, turning unique violations into `Conflict`
    pub fn from_write(err: sqlx::Error) -> Self {
        let unique_violation = matches!(
            &err,
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
        );
        if unique_violation {
            return Error::Conflict(err.to_string());
        }
        Error::Database(err)
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Database(sqlx::Error::PoolTimedOut)
                | Error::Database(sqlx::Error::Io(_))
                | Error::Database(sqlx::Error::PoolClosed)
        )
    }
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        match err {
            Error::Conflict(message) => ApplicationError::Conflict(message),
            Error::Database(sqlx::Error::PoolTimedOut) => {
                ApplicationError::Timeout("Timed out waiting for a database connection".to_string())
            }
            err @ Error::Database(_) if err.is_retryable() => {
                ApplicationError::ServiceUnavailable(err.to_string())
            }
            other => ApplicationError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let db_err = Error::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let conflict = Error::Conflict("dup".to_string());
        assert!(!conflict.is_retryable());

        let row = Error::Database(sqlx::Error::RowNotFound);
        assert!(!row.is_retryable());
    }

    #[test]
    fn test_application_error_mapping() {
        assert!(matches!(
            ApplicationError::from(Error::Conflict("dup".to_string())),
            ApplicationError::Conflict(_)
        ));
        assert!(matches!(
            ApplicationError::from(Error::Database(sqlx::Error::PoolTimedOut)),
            ApplicationError::Timeout(_)
        ));
        assert!(matches!(
            ApplicationError::from(Error::Database(sqlx::Error::PoolClosed)),
            ApplicationError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApplicationError::from(Error::InvalidData("role".to_string())),
            ApplicationError::Internal(_)
        ));
    }

    #[test]
    fn test_non_database_write_error_passes_through() {
        assert!(matches!(
            Error::from_write(sqlx::Error::RowNotFound),
            Error::Database(sqlx::Error::RowNotFound)
        ));
    }
}
