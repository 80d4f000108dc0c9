//! Error types for wm-core

use thiserror::Error;

/// Core error type for Waymark
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Malformed migration marker line
    #[error("[E003] Migration parse error at line {line}: {message}")]
    MigrationParse { line: usize, message: String },

    /// E004: Parse error inside a migration file
    #[error("[E004] Failed to parse migrations in '{path}': {source}")]
    MigrationFile {
        path: String,
        #[source]
        source: Box<CoreError>,
    },

    /// E005: IO error with file path context
    #[error("[E005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E006: YAML parse error
    #[error("[E006] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
