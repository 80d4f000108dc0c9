//! Apply loop for outstanding migrations.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use wm_core::{Migration, MigrationInfo, MigrationRecord};
use wm_db::MigrationDriver;

use crate::error::MigrateResult;
use crate::planner::plan;
use crate::status::info;
use crate::validator::validate;

/// Migration handle for one target database.
///
/// [`migrate`](Self::migrate) calls on the same handle are serialized by a
/// lock the handle owns. The lock does not coordinate separate processes or
/// separate handles pointed at the same database. `validate`, `plan` and
/// `info` take no lock and may observe history mid-run.
pub struct Migrator {
    driver: Arc<dyn MigrationDriver>,
    lock: Mutex<()>,
}

impl Migrator {
    /// Create a handle over `driver`.
    pub fn new(driver: Arc<dyn MigrationDriver>) -> Self {
        Self {
            driver,
            lock: Mutex::new(()),
        }
    }

    /// Borrow the underlying driver.
    pub fn driver(&self) -> &Arc<dyn MigrationDriver> {
        &self.driver
    }

    /// See [`crate::validate`].
    pub async fn validate(&self, migrations: &[Migration]) -> MigrateResult<()> {
        validate(self.driver.as_ref(), migrations).await
    }

    /// See [`crate::plan`].
    pub async fn plan(&self, migrations: &[Migration]) -> MigrateResult<Vec<Migration>> {
        plan(self.driver.as_ref(), migrations).await
    }

    /// See [`crate::info`].
    pub async fn info(&self, migrations: &[Migration]) -> MigrateResult<Vec<MigrationInfo>> {
        info(self.driver.as_ref(), migrations).await
    }

    /// Apply every planned migration, in ascending version order.
    ///
    /// Ensures the history table exists, validates, plans, then for each
    /// planned migration executes the script and records it. Stops at the
    /// first failure: earlier migrations stay applied and recorded, the failed
    /// one is not recorded, and later ones are not attempted. Calling again
    /// resumes from the failed migration.
    ///
    /// Returns the records inserted by this call.
    pub async fn migrate(
        &self,
        migrations: &[Migration],
    ) -> MigrateResult<Vec<MigrationRecord>> {
        let _guard = self.lock.lock().await;
        let driver = self.driver.as_ref();

        driver.create().await?;
        validate(driver, migrations).await?;
        let planned = plan(driver, migrations).await?;

        if planned.is_empty() {
            log::info!("Schema is up to date ({} migration(s) known)", migrations.len());
            return Ok(Vec::new());
        }

        let mut applied = Vec::with_capacity(planned.len());
        for migration in planned {
            log::debug!(
                "Applying migration {} ({}) via {}",
                migration.version,
                migration.description,
                driver.driver_type()
            );
            let execution_time = driver.exec(&migration.script).await?;

            let record = MigrationRecord {
                version: migration.version,
                checksum: migration.checksum(),
                description: migration.description,
                applied_at: Utc::now(),
                execution_time,
            };
            driver.insert(&record).await?;
            log::debug!(
                "Recorded migration {} in {:?}",
                record.version,
                record.execution_time
            );
            applied.push(record);
        }

        log::info!("Applied {} migration(s)", applied.len());
        Ok(applied)
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
