use super::*;
use crate::test_support::{migration, FakeDriver};

#[tokio::test]
async fn test_valid_set_against_empty_history() {
    let driver = FakeDriver::new();
    let migrations = vec![migration(1.0), migration(1.1), migration(2.0)];
    validate(&driver, &migrations).await.unwrap();
}

#[tokio::test]
async fn test_valid_set_with_partial_history() {
    let migrations = vec![migration(1.0), migration(1.1), migration(2.0)];
    let driver = FakeDriver::with_applied(&migrations[..2]);
    validate(&driver, &migrations).await.unwrap();
}

#[tokio::test]
async fn test_negative_version_is_illegal() {
    let driver = FakeDriver::new();
    let migrations = vec![migration(1.0), migration(-2.0), migration(-1.0)];
    let err = validate(&driver, &migrations).await.unwrap_err();
    assert!(
        matches!(err, MigrateError::IllegalVersion { version } if version == Version::new(-2.0))
    );
}

#[tokio::test]
async fn test_nan_version_is_illegal() {
    let driver = FakeDriver::new();
    let migrations = vec![migration(1.0), Migration::new(f64::NAN, "nan", "SELECT 1;\n")];
    let err = validate(&driver, &migrations).await.unwrap_err();
    assert!(matches!(err, MigrateError::IllegalVersion { .. }));
}

#[tokio::test]
async fn test_duplicate_version_regardless_of_position() {
    let driver = FakeDriver::new();
    let layouts = [
        vec![migration(2.0), migration(1.0), migration(2.0)],
        vec![migration(2.0), migration(2.0), migration(3.0)],
        vec![migration(3.0), migration(2.0), migration(1.0), migration(2.0)],
    ];
    for migrations in layouts {
        let err = validate(&driver, &migrations).await.unwrap_err();
        assert!(
            matches!(err, MigrateError::DuplicateVersion { version } if version == Version::new(2.0)),
            "unexpected error: {err}"
        );
    }
}

#[tokio::test]
async fn test_illegal_version_checked_before_duplicates() {
    let driver = FakeDriver::new();
    let migrations = vec![migration(1.0), migration(1.0), migration(-1.0)];
    let err = validate(&driver, &migrations).await.unwrap_err();
    assert!(matches!(err, MigrateError::IllegalVersion { .. }));
}

#[tokio::test]
async fn test_structural_errors_skip_history_fetch() {
    let driver = FakeDriver::new().fail_all();
    let migrations = vec![migration(1.0), migration(1.0)];
    let err = validate(&driver, &migrations).await.unwrap_err();
    assert!(matches!(err, MigrateError::DuplicateVersion { .. }));
}

#[tokio::test]
async fn test_removed_migration() {
    let applied = vec![migration(1.0), migration(1.1), migration(1.2)];
    let driver = FakeDriver::with_applied(&applied);

    let current = vec![migration(1.0), migration(1.2), migration(2.0)];
    let err = validate(&driver, &current).await.unwrap_err();
    assert!(
        matches!(err, MigrateError::RemovedMigration { version } if version == Version::new(1.1))
    );
}

#[tokio::test]
async fn test_lowest_removed_version_reported() {
    let applied = vec![migration(1.0), migration(2.0), migration(3.0)];
    let driver = FakeDriver::with_applied(&applied);

    let err = validate(&driver, &[migration(1.0)]).await.unwrap_err();
    assert_eq!(err.version(), Some(Version::new(2.0)));
}

#[tokio::test]
async fn test_edited_script_fails_checksum() {
    let applied = vec![migration(1.0), migration(1.1)];
    let driver = FakeDriver::with_applied(&applied);

    let mut current = applied.clone();
    current[1].script = "SELECT 'edited';\n".to_string();
    let err = validate(&driver, &current).await.unwrap_err();
    assert!(
        matches!(err, MigrateError::InvalidChecksum { version } if version == Version::new(1.1))
    );
}

#[tokio::test]
async fn test_description_change_is_not_drift() {
    let applied = vec![migration(1.0)];
    let driver = FakeDriver::with_applied(&applied);

    let mut current = applied.clone();
    current[0].description = "renamed".to_string();
    validate(&driver, &current).await.unwrap();
}

#[tokio::test]
async fn test_removal_checked_before_checksum() {
    let applied = vec![migration(1.0), migration(2.0)];
    let driver = FakeDriver::with_applied(&applied);

    let mut edited = migration(1.0);
    edited.script = "SELECT 'edited';\n".to_string();
    let err = validate(&driver, &[edited]).await.unwrap_err();
    assert!(matches!(err, MigrateError::RemovedMigration { .. }));
}

#[tokio::test]
async fn test_history_fetch_error_propagates() {
    let driver = FakeDriver::new().fail_all();
    let err = validate(&driver, &[migration(1.0)]).await.unwrap_err();
    assert!(matches!(err, MigrateError::Driver(_)));
}

#[tokio::test]
async fn test_caller_slice_not_reordered() {
    let driver = FakeDriver::new();
    let migrations = vec![migration(3.0), migration(1.0), migration(2.0)];
    validate(&driver, &migrations).await.unwrap();
    let versions: Vec<f64> = migrations.iter().map(|m| m.version.as_f64()).collect();
    assert_eq!(versions, vec![3.0, 1.0, 2.0]);
}

#[test]
fn test_sorted_by_version_is_stable() {
    let mut first = migration(1.0);
    first.description = "first".to_string();
    let mut second = migration(1.0);
    second.description = "second".to_string();
    let migrations = vec![migration(2.0), first, second];

    let sorted = sorted_by_version(&migrations);
    assert_eq!(sorted[0].description, "first");
    assert_eq!(sorted[1].description, "second");
    assert_eq!(sorted[2].version, Version::new(2.0));
}
