//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wm_core::{parse_migrations_dir, Config, Migration};
use wm_db::DuckDbDriver;
use wm_migrate::Migrator;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs exits without printing this.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// A loaded project: config plus the parsed migration set.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
    pub(crate) migrations: Vec<Migration>,
}

/// Load config and parse every migration file in the project.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();
    let config = match &global.config {
        Some(path) => Config::load(path),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load config")?;

    let migrations_dir = config.migrations_dir_absolute(&root);
    let migrations = parse_migrations_dir(&migrations_dir)
        .with_context(|| format!("Failed to read migrations from {}", migrations_dir.display()))?;

    if global.verbose {
        eprintln!(
            "[verbose] Loaded {} migration(s) from {}",
            migrations.len(),
            migrations_dir.display()
        );
    }

    Ok(Project {
        root,
        config,
        migrations,
    })
}

fn database_path(project: &Project, global: &GlobalArgs) -> String {
    let path = match &global.database {
        Some(path) => path.clone(),
        None => project.config.database_path_absolute(&project.root),
    };
    if global.verbose {
        eprintln!(
            "[verbose] Using database {} (history table {})",
            path, project.config.database.history_table
        );
    }
    path
}

fn into_migrator(driver: DuckDbDriver, project: &Project) -> Result<Migrator> {
    let driver = driver
        .with_history_table(project.config.database.history_table.clone())
        .context("Invalid history table")?;
    Ok(Migrator::new(Arc::new(driver)))
}

/// Open the target database and wrap it in a [`Migrator`].
///
/// `--database` overrides the configured path. A missing database file is
/// created.
pub(crate) fn create_migrator(project: &Project, global: &GlobalArgs) -> Result<Migrator> {
    let path = database_path(project, global);
    let driver = DuckDbDriver::new(&path).context("Failed to connect to database")?;
    into_migrator(driver, project)
}

/// Like [`create_migrator`], but never writes to the target.
///
/// A database file that does not exist yet has no history, so it is read as
/// an empty in-memory database and nothing is created on disk.
pub(crate) fn create_read_only_migrator(
    project: &Project,
    global: &GlobalArgs,
) -> Result<Migrator> {
    let path = database_path(project, global);
    let file = Path::new(&path);
    let driver = if path == ":memory:" || !file.exists() {
        if global.verbose && path != ":memory:" {
            eprintln!("[verbose] Database {path} does not exist yet; nothing applied");
        }
        DuckDbDriver::in_memory()
    } else {
        DuckDbDriver::read_only(file)
    }
    .context("Failed to connect to database")?;
    into_migrator(driver, project)
}

/// Calculate column widths for table output
fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }
    widths
}

/// Print a simple left-aligned table
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

/// Table rows of version and description for a list of migrations
pub(crate) fn migration_rows(migrations: &[Migration]) -> Vec<Vec<String>> {
    migrations
        .iter()
        .map(|m| vec![m.version.to_string(), m.description.clone()])
        .collect()
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
