//! Consistency checks for a migration set against applied history.
//!
//! Applied history is append-only: a migration that has been applied may
//! never be removed or edited. Any violation is reported, never repaired.

use std::collections::HashMap;

use wm_core::{Migration, MigrationRecord, Version};
use wm_db::MigrationDriver;

use crate::error::{MigrateError, MigrateResult};

/// Validate `migrations` against the history held by `driver`.
///
/// Checks run in order and stop at the first failure: illegal versions,
/// duplicate versions, applied migrations missing from the set, and applied
/// migrations whose checksum changed. The caller's slice is left untouched.
pub async fn validate(
    driver: &dyn MigrationDriver,
    migrations: &[Migration],
) -> MigrateResult<()> {
    let sorted = sorted_by_version(migrations);
    check_versions(&sorted)?;

    let applied = driver.all().await?;
    check_history(&applied, &sorted)
}

/// Borrow `migrations` sorted by ascending version (stable).
pub(crate) fn sorted_by_version(migrations: &[Migration]) -> Vec<&Migration> {
    let mut sorted: Vec<&Migration> = migrations.iter().collect();
    sorted.sort_by_key(|m| m.version);
    sorted
}

/// Structural checks on the set alone. `sorted` must be ascending.
pub(crate) fn check_versions(sorted: &[&Migration]) -> MigrateResult<()> {
    if let Some(illegal) = sorted.iter().find(|m| !m.version.is_legal()) {
        return Err(MigrateError::IllegalVersion {
            version: illegal.version,
        });
    }

    if let Some(pair) = sorted.windows(2).find(|w| w[0].version == w[1].version) {
        return Err(MigrateError::DuplicateVersion {
            version: pair[0].version,
        });
    }

    Ok(())
}

/// Checks of the set against applied records. `sorted` must be ascending.
pub(crate) fn check_history(
    applied: &[MigrationRecord],
    sorted: &[&Migration],
) -> MigrateResult<()> {
    let defined: HashMap<Version, &Migration> = sorted.iter().map(|m| (m.version, *m)).collect();

    let mut records: Vec<&MigrationRecord> = applied.iter().collect();
    records.sort_by_key(|r| r.version);

    if let Some(removed) = records.iter().find(|r| !defined.contains_key(&r.version)) {
        return Err(MigrateError::RemovedMigration {
            version: removed.version,
        });
    }

    let recorded: HashMap<Version, &MigrationRecord> =
        records.iter().map(|r| (r.version, *r)).collect();

    for migration in sorted {
        if let Some(record) = recorded.get(&migration.version) {
            if record.checksum != migration.checksum() {
                return Err(MigrateError::InvalidChecksum {
                    version: migration.version,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
