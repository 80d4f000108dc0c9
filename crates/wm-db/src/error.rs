//! Error types for wm-db

use thiserror::Error;

/// Driver operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// History table name rejected (D003)
    #[error("[D003] Invalid history table name: {0}")]
    InvalidTableName(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// History row could not be converted into a record (D005)
    #[error("[D005] Corrupt history record for version {version}: {reason}")]
    CorruptRecord { version: f64, reason: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
