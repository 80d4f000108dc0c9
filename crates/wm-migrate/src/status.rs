//! Per-migration status for display.
//!
//! Read-only: nothing here validates or mutates history. Results reflect the
//! history at fetch time and may be stale if a migrate run is in flight.

use std::collections::HashSet;

use wm_core::{Migration, MigrationInfo, MigrationRecord, Status, Version};
use wm_db::MigrationDriver;

use crate::error::MigrateResult;

/// Compute the status of each migration, in the caller's order.
///
/// Fails only if the history fetch fails.
pub async fn info(
    driver: &dyn MigrationDriver,
    migrations: &[Migration],
) -> MigrateResult<Vec<MigrationInfo>> {
    let records = driver.all().await?;
    Ok(describe(&records, migrations))
}

pub(crate) fn describe(
    records: &[MigrationRecord],
    migrations: &[Migration],
) -> Vec<MigrationInfo> {
    let mut newest_first: Vec<&MigrationRecord> = records.iter().collect();
    newest_first.sort_by(|a, b| b.version.cmp(&a.version));

    let infos: Vec<MigrationInfo> = match newest_first.first() {
        None => migrations
            .iter()
            .map(|m| project(Status::Pending, m))
            .collect(),
        Some(last) => {
            let applied: HashSet<Version> = newest_first.iter().map(|r| r.version).collect();
            migrations
                .iter()
                .map(|m| project(status_of(last.version, &applied, m), m))
                .collect()
        }
    };

    let ignored = infos
        .iter()
        .filter(|i| i.status == Status::Ignored)
        .count();
    if ignored > 0 {
        log::warn!("{ignored} migration(s) below the applied high-water mark were never applied");
    }
    infos
}

fn status_of(last: Version, applied: &HashSet<Version>, migration: &Migration) -> Status {
    if migration.version > last {
        Status::Pending
    } else if applied.contains(&migration.version) {
        Status::Applied
    } else {
        Status::Ignored
    }
}

fn project(status: Status, migration: &Migration) -> MigrationInfo {
    MigrationInfo {
        status,
        error: None,
        migration: migration.clone(),
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
