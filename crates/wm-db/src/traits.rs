//! Migration driver trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use std::time::Duration;
use wm_core::MigrationRecord;

/// Storage and execution capability consumed by the migration engine.
///
/// One implementation exists per database engine; the SQL text for the
/// history table lives in the implementation, never in the engine.
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait MigrationDriver: Send + Sync {
    /// Ensure the history table exists. Must be idempotent.
    async fn create(&self) -> DbResult<()>;

    /// Return every applied record. Callers do not rely on the order.
    async fn all(&self) -> DbResult<Vec<MigrationRecord>>;

    /// Append one record. Must fail on a duplicate version.
    async fn insert(&self, record: &MigrationRecord) -> DbResult<()>;

    /// Execute a script and report the wall time it took.
    async fn exec(&self, script: &str) -> DbResult<Duration>;

    /// Driver type identifier for logging
    fn driver_type(&self) -> &'static str;
}
