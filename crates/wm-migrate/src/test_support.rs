//! In-process driver used by the engine's unit tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::time::Duration;
use wm_core::{Migration, MigrationRecord, Version};
use wm_db::{DbError, DbResult, MigrationDriver};

#[derive(Default)]
struct FakeState {
    create_calls: usize,
    all_calls: usize,
    records: Vec<MigrationRecord>,
    executed: Vec<String>,
    fail_exec_containing: Option<String>,
    fail_all: bool,
    fail_create: bool,
    fail_insert_for: Option<Version>,
}

/// Driver that keeps history in memory.
///
/// `all()` returns records in reverse insertion order so callers that rely
/// on driver ordering get caught.
#[derive(Default)]
pub(crate) struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start with `migrations` already applied.
    pub(crate) fn with_applied(migrations: &[Migration]) -> Self {
        let driver = Self::new();
        driver.state.lock().unwrap().records = migrations.iter().map(record_for).collect();
        driver
    }

    /// Fail any `exec` whose script contains `needle`.
    pub(crate) fn fail_exec_containing(self, needle: &str) -> Self {
        self.state.lock().unwrap().fail_exec_containing = Some(needle.to_string());
        self
    }

    /// Fail every `all` call.
    pub(crate) fn fail_all(self) -> Self {
        self.state.lock().unwrap().fail_all = true;
        self
    }

    /// Fail every `create` call.
    pub(crate) fn fail_create(self) -> Self {
        self.state.lock().unwrap().fail_create = true;
        self
    }

    /// Fail `insert` of the record for `version`; its script still runs.
    pub(crate) fn fail_insert_for(self, version: f64) -> Self {
        self.state.lock().unwrap().fail_insert_for = Some(Version::new(version));
        self
    }

    pub(crate) fn all_calls(&self) -> usize {
        self.state.lock().unwrap().all_calls
    }

    pub(crate) fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.state.lock().unwrap().executed.clone()
    }

    pub(crate) fn recorded_versions(&self) -> Vec<f64> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .map(|r| r.version.as_f64())
            .collect()
    }
}

/// History record for `migration` as if it had been applied just now.
pub(crate) fn record_for(migration: &Migration) -> MigrationRecord {
    MigrationRecord {
        version: migration.version,
        description: migration.description.clone(),
        checksum: migration.checksum(),
        applied_at: Utc::now(),
        execution_time: Duration::from_millis(1),
    }
}

/// Shorthand for a migration whose script mentions its version.
pub(crate) fn migration(version: f64) -> Migration {
    Migration::new(
        version,
        format!("migration {version}"),
        format!("SELECT {version};\n"),
    )
}

#[async_trait]
impl MigrationDriver for FakeDriver {
    async fn create(&self) -> DbResult<()> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if state.fail_create {
            return Err(DbError::ExecutionError("cannot create history".to_string()));
        }
        Ok(())
    }

    async fn all(&self) -> DbResult<Vec<MigrationRecord>> {
        let mut state = self.state.lock().unwrap();
        state.all_calls += 1;
        if state.fail_all {
            return Err(DbError::ConnectionError("history unavailable".to_string()));
        }
        Ok(state.records.iter().rev().cloned().collect())
    }

    async fn insert(&self, record: &MigrationRecord) -> DbResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        if state.fail_insert_for == Some(record.version) {
            return Err(DbError::ExecutionError(format!(
                "cannot record version {}",
                record.version
            )));
        }
        if state.records.iter().any(|r| r.version == record.version) {
            return Err(DbError::ExecutionError(format!(
                "duplicate version {}",
                record.version
            )));
        }
        state.records.push(record.clone());
        Ok(())
    }

    async fn exec(&self, script: &str) -> DbResult<Duration> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        if let Some(needle) = &state.fail_exec_containing {
            if script.contains(needle.as_str()) {
                return Err(DbError::ExecutionError(format!("cannot run: {script}")));
            }
        }
        state.executed.push(script.to_string());
        Ok(Duration::from_millis(1))
    }

    fn driver_type(&self) -> &'static str {
        "fake"
    }
}
