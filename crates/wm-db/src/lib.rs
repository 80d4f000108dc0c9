//! wm-db - Driver layer for Waymark
//!
//! This crate provides the `MigrationDriver` trait, the narrow capability the
//! migration engine consumes, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbDriver;
pub use error::{DbError, DbResult};
pub use traits::MigrationDriver;
