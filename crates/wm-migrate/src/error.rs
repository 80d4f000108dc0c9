//! Error types for the migration engine.

use thiserror::Error;
use wm_core::Version;
use wm_db::DbError;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// A migration version is negative or not a finite number (W001).
    #[error("[W001] Illegal migration version number {version}")]
    IllegalVersion { version: Version },

    /// Two migrations share a version (W002).
    #[error("[W002] Multiple migrations have the version number {version}")]
    DuplicateVersion { version: Version },

    /// An applied migration is missing from the migration set (W003).
    #[error("[W003] Migration {version} was removed after being applied")]
    RemovedMigration { version: Version },

    /// An applied migration's script no longer matches its recorded checksum (W004).
    #[error("[W004] Invalid checksum for migration {version}: script changed after being applied")]
    InvalidChecksum { version: Version },

    /// Driver failure, passed through unchanged.
    #[error(transparent)]
    Driver(#[from] DbError),
}

impl MigrateError {
    /// Version the error refers to, if any.
    pub fn version(&self) -> Option<Version> {
        match self {
            MigrateError::IllegalVersion { version }
            | MigrateError::DuplicateVersion { version }
            | MigrateError::RemovedMigration { version }
            | MigrateError::InvalidChecksum { version } => Some(*version),
            MigrateError::Driver(_) => None,
        }
    }

    /// True for mismatches between the migration set and applied history.
    pub fn is_structural(&self) -> bool {
        !matches!(self, MigrateError::Driver(_))
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
