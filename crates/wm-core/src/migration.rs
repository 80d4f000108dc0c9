//! Migration entities: scripts, applied-history records, and derived status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::checksum::compute_checksum;
use crate::version::Version;

/// One versioned unit of change to a database schema.
///
/// Identity is the version. The script is opaque text; Waymark never looks
/// inside it beyond computing its checksum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    /// Ordering key, unique within a migration set
    pub version: Version,

    /// Free-text description (may be empty)
    pub description: String,

    /// Script body, one newline-terminated line per source line
    pub script: String,
}

impl Migration {
    /// Create a new migration.
    pub fn new(
        version: impl Into<Version>,
        description: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            description: description.into(),
            script: script.into(),
        }
    }

    /// SHA256 checksum of the script, recomputed on every call.
    pub fn checksum(&self) -> String {
        compute_checksum(&self.script)
    }
}

/// Durable proof that a migration version was applied to the target database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// Version of the applied migration
    pub version: Version,

    /// Description at apply time
    pub description: String,

    /// Script checksum at apply time
    pub checksum: String,

    /// When the script finished executing
    pub applied_at: DateTime<Utc>,

    /// Wall time spent executing the script
    pub execution_time: Duration,
}

/// Status of a migration relative to the applied history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Below the high-water mark but never applied
    Ignored,
    /// Recorded in the history table
    Applied,
    /// Above the high-water mark, waiting to be applied
    Pending,
    /// Could not be applied
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ignored => write!(f, "IGNORED"),
            Status::Applied => write!(f, "APPLIED"),
            Status::Pending => write!(f, "PENDING"),
            Status::Error => write!(f, "ERROR"),
        }
    }
}

/// Read-only projection of a migration together with its computed status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationInfo {
    pub status: Status,

    /// Error detail when `status` is [`Status::Error`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub migration: Migration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_tracks_script_only() {
        let a = Migration::new(1.0, "create users", "CREATE TABLE users (id INT);\n");
        let b = Migration::new(2.0, "another description", "CREATE TABLE users (id INT);\n");
        assert_eq!(a.checksum(), b.checksum());

        let edited = Migration::new(1.0, "create users", "CREATE TABLE users (id BIGINT);\n");
        assert_ne!(a.checksum(), edited.checksum());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Ignored.to_string(), "IGNORED");
        assert_eq!(Status::Applied.to_string(), "APPLIED");
        assert_eq!(Status::Pending.to_string(), "PENDING");
        assert_eq!(Status::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_info_serializes_without_empty_error() {
        let info = MigrationInfo {
            status: Status::Pending,
            error: None,
            migration: Migration::new(1.5, "add index", "CREATE INDEX i ON t (c);\n"),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["migration"]["version"], 1.5);
        assert!(json.get("error").is_none());
    }
}
