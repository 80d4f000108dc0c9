//! wm-core - Core library for Waymark
//!
//! This crate provides the migration data model, the text parser that turns
//! migration scripts into [`Migration`] values, checksum computation, and the
//! project configuration shared by the other Waymark crates.

pub mod checksum;
pub mod config;
pub mod error;
pub mod migration;
pub mod parser;
pub mod version;

pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{Migration, MigrationInfo, MigrationRecord, Status};
pub use parser::{parse_migrations, parse_migrations_dir};
pub use version::Version;
