//! DuckDB migration driver implementation

use crate::error::{DbError, DbResult};
use crate::traits::MigrationDriver;
use async_trait::async_trait;
use chrono::DateTime;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use wm_core::config::is_valid_table_name;
use wm_core::{MigrationRecord, Version};

/// Default name of the applied-migration history table
pub const DEFAULT_HISTORY_TABLE: &str = "schema_history";

/// DuckDB migration driver
///
/// History rows store `applied_at` as unix seconds and `execution_time` as
/// fractional seconds.
pub struct DuckDbDriver {
    conn: Mutex<Connection>,
    history_table: String,
}

impl DuckDbDriver {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self::with_connection(conn))
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self::with_connection(conn))
    }

    /// Open an existing database file without write access
    pub fn read_only(path: &Path) -> DbResult<Self> {
        let config = duckdb::Config::default()
            .access_mode(duckdb::AccessMode::ReadOnly)
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        let conn = Connection::open_with_flags(path, config)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self::with_connection(conn))
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            history_table: DEFAULT_HISTORY_TABLE.to_string(),
        }
    }

    /// Use `table` (optionally `schema.table`) for applied-migration history.
    pub fn with_history_table(mut self, table: impl Into<String>) -> DbResult<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(DbError::InvalidTableName(table));
        }
        self.history_table = table;
        Ok(self)
    }

    /// Name of the history table
    pub fn history_table(&self) -> &str {
        &self.history_table
    }

    fn connection(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// History table name as a quoted identifier, e.g. `"meta"."db_version"`
    fn quoted_history_table(&self) -> String {
        self.history_table
            .split('.')
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn create_table_sql(&self) -> String {
        let mut sql = String::new();
        if let Some((schema, _)) = self.history_table.split_once('.') {
            sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\";\n"));
        }
        sql.push_str(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                version        DOUBLE  NOT NULL UNIQUE,
                description    VARCHAR NOT NULL,
                checksum       VARCHAR NOT NULL,
                applied_at     BIGINT  NOT NULL,
                execution_time DOUBLE  NOT NULL
            );",
            self.quoted_history_table()
        ));
        sql
    }

    fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} (version, description, checksum, applied_at, execution_time)
             VALUES (?, ?, ?, ?, ?)",
            self.quoted_history_table()
        )
    }

    fn all_sql(&self) -> String {
        format!(
            "SELECT version, description, checksum, applied_at, execution_time
             FROM {}
             ORDER BY version ASC",
            self.quoted_history_table()
        )
    }

    fn create_sync(&self) -> DbResult<()> {
        let conn = self.connection()?;
        conn.execute_batch(&self.create_table_sql()).map_err(|e| {
            DbError::ExecutionError(format!(
                "failed to create history table {}: {e}",
                self.history_table
            ))
        })
    }

    fn all_sync(&self) -> DbResult<Vec<MigrationRecord>> {
        let conn = self.connection()?;
        // No table yet means nothing has been applied
        if !relation_exists_in(&conn, &self.history_table)? {
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(&self.all_sql())?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, f64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, f64>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (version, description, checksum, applied_at, execution_time) = row?;
            records.push(record_from_row(
                version,
                description,
                checksum,
                applied_at,
                execution_time,
            )?);
        }
        Ok(records)
    }

    fn insert_sync(&self, record: &MigrationRecord) -> DbResult<()> {
        let conn = self.connection()?;
        let version = record.version.as_f64();
        let applied_at = record.applied_at.timestamp();
        let execution_time = record.execution_time.as_secs_f64();
        conn.execute(
            &self.insert_sql(),
            duckdb::params![
                version,
                record.description,
                record.checksum,
                applied_at,
                execution_time
            ],
        )
        .map_err(|e| {
            DbError::ExecutionError(format!("failed to record migration {version}: {e}"))
        })?;
        Ok(())
    }

    fn exec_sync(&self, script: &str) -> DbResult<Duration> {
        if script.trim().is_empty() {
            return Ok(Duration::ZERO);
        }
        let conn = self.connection()?;
        let start = Instant::now();
        conn.execute_batch(script)
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(start.elapsed())
    }

    /// Check if a table or view exists in the target database
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let conn = self.connection()?;
        relation_exists_in(&conn, name)
    }
}

fn relation_exists_in(conn: &Connection, name: &str) -> DbResult<bool> {
    // Handle schema-qualified names
    let (schema, table) = name.split_once('.').unwrap_or(("main", name));

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ? AND table_name = ?",
        duckdb::params![schema, table],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

fn record_from_row(
    version: f64,
    description: String,
    checksum: String,
    applied_at: i64,
    execution_time: f64,
) -> DbResult<MigrationRecord> {
    let applied_at =
        DateTime::from_timestamp(applied_at, 0).ok_or_else(|| DbError::CorruptRecord {
            version,
            reason: format!("applied_at {applied_at} is out of range"),
        })?;
    let execution_time =
        Duration::try_from_secs_f64(execution_time).map_err(|e| DbError::CorruptRecord {
            version,
            reason: format!("execution_time {execution_time}: {e}"),
        })?;
    Ok(MigrationRecord {
        version: Version::new(version),
        description,
        checksum,
        applied_at,
        execution_time,
    })
}

#[async_trait]
impl MigrationDriver for DuckDbDriver {
    async fn create(&self) -> DbResult<()> {
        log::debug!("Ensuring history table {} exists", self.history_table);
        self.create_sync()
    }

    async fn all(&self) -> DbResult<Vec<MigrationRecord>> {
        self.all_sync()
    }

    async fn insert(&self, record: &MigrationRecord) -> DbResult<()> {
        self.insert_sync(record)
    }

    async fn exec(&self, script: &str) -> DbResult<Duration> {
        self.exec_sync(script)
    }

    fn driver_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
