//! Works out which migrations are still to run.
//!
//! Planning uses a high-water mark rather than a set difference: only
//! migrations above the highest applied version are planned. A never-applied
//! migration below the mark is left alone and shows up as
//! [`Status::Ignored`](wm_core::Status::Ignored) in [`crate::info`].

use wm_core::{Migration, MigrationRecord, Version};
use wm_db::MigrationDriver;

use crate::error::MigrateResult;

/// Plan the migrations that [`crate::Migrator::migrate`] would run, ascending
/// by version.
pub async fn plan(
    driver: &dyn MigrationDriver,
    migrations: &[Migration],
) -> MigrateResult<Vec<Migration>> {
    let records = driver.all().await?;
    Ok(plan_against(&records, migrations))
}

/// Highest applied version, if anything has been applied.
pub(crate) fn high_water_mark(records: &[MigrationRecord]) -> Option<Version> {
    records.iter().map(|r| r.version).max()
}

pub(crate) fn plan_against(
    records: &[MigrationRecord],
    migrations: &[Migration],
) -> Vec<Migration> {
    let mut planned: Vec<Migration> = match high_water_mark(records) {
        None => migrations.to_vec(),
        Some(mark) => {
            log::debug!("High-water mark is {mark}");
            migrations
                .iter()
                .filter(|m| m.version > mark)
                .cloned()
                .collect()
        }
    };

    // Driver and caller ordering are not trusted
    planned.sort_by_key(|m| m.version);
    log::debug!("Planned {} of {} migration(s)", planned.len(), migrations.len());
    planned
}

#[cfg(test)]
#[path = "planner_test.rs"]
mod tests;
