//! Database error types
//!
//! Errors raised by the pool, the migrations and the bill repository. The
//! store adapter folds all of them into `PortError` before they reach the
//! domain.

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        match self {
            DatabaseError::ConnectionFailed(_) => true,
            DatabaseError::SqlError(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            DatabaseError::MigrationFailed(_) => false,
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_detection() {
        assert!(DatabaseError::ConnectionFailed("refused".into()).is_connection_error());
        assert!(DatabaseError::from(sqlx::Error::PoolTimedOut).is_connection_error());
        assert!(!DatabaseError::from(sqlx::Error::RowNotFound).is_connection_error());
        assert!(!DatabaseError::MigrationFailed("checksum".into()).is_connection_error());
    }
}
