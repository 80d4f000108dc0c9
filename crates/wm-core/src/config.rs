//! Configuration types and parsing for waymark.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from waymark.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory containing migration `.sql` files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Target database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Target database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Table holding applied-migration history
    #[serde(default = "default_history_table")]
    pub history_table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            history_table: default_history_table(),
        }
    }
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

fn default_history_table() -> String {
    "schema_history".to_string()
}

/// Check a possibly schema-qualified SQL identifier (`table` or `schema.table`).
pub fn is_valid_table_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return false;
    }
    parts.iter().all(|part| {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for waymark.yml or waymark.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("waymark.yml");
        let yaml_path = dir.join("waymark.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate field values that serde cannot check on its own
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir must not be empty".to_string(),
            });
        }
        if !is_valid_table_name(&self.database.history_table) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "history_table '{}' is not a valid table name",
                    self.database.history_table
                ),
            });
        }
        Ok(())
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Database path resolved against the project root.
    ///
    /// `:memory:` and absolute paths are returned unchanged.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        let path = &self.database.path;
        if path == ":memory:" || Path::new(path).is_absolute() {
            path.clone()
        } else {
            root.join(path).display().to_string()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
