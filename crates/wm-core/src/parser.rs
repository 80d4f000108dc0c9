//! Migration script parser.
//!
//! A script file holds zero or more migration blocks. Each block starts with a
//! version marker and may carry a description marker:
//!
//! ```text
//! -- Version: 1.0
//! -- Description: create users
//! CREATE TABLE users (id INTEGER);
//! ```
//!
//! Markers are matched case-insensitively with at most one space removed, so
//! `--version:1.0`, `-- VERSION: 1.0` and `--Version: 1.0` are all accepted.
//! Every other line belongs to the script body of the current block. Text
//! before the first version marker is discarded.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;

const VERSION_MARKER: &str = "--version:";
const DESCRIPTION_MARKER: &str = "--description:";

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Version,
    Description,
    Body,
}

fn classify(line: &str) -> LineKind {
    let normalized = line.to_lowercase().replacen(' ', "", 1);
    if normalized.starts_with(VERSION_MARKER) {
        LineKind::Version
    } else if normalized.starts_with(DESCRIPTION_MARKER) {
        LineKind::Description
    } else {
        LineKind::Body
    }
}

/// Text after the first `:` of a marker line, trimmed.
fn marker_payload(line: &str) -> &str {
    line.split_once(':')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default()
}

fn parse_failure(line: usize, message: String) -> CoreError {
    log::error!("Migration parse error at line {line}: {message}");
    CoreError::MigrationParse { line, message }
}

fn parse_version(line_no: usize, line: &str) -> CoreResult<f64> {
    let raw = marker_payload(line);
    let value: f64 = raw
        .parse()
        .map_err(|e| parse_failure(line_no, format!("invalid version '{raw}': {e}")))?;
    if !value.is_finite() {
        return Err(parse_failure(
            line_no,
            format!("version '{raw}' is not a finite number"),
        ));
    }
    Ok(value)
}

/// Parse a text blob into migrations, in file order.
///
/// Parsing is all-or-nothing: a version marker with a non-numeric payload
/// fails the whole call and no migrations are returned.
pub fn parse_migrations(text: &str) -> CoreResult<Vec<Migration>> {
    let mut migrations = Vec::new();
    let mut current: Option<Migration> = None;

    for (idx, line) in text.lines().enumerate() {
        match classify(line) {
            LineKind::Version => {
                let version = parse_version(idx + 1, line)?;
                if let Some(done) = current.replace(Migration::new(version, "", "")) {
                    migrations.push(done);
                }
            }
            LineKind::Description => {
                if let Some(migration) = current.as_mut() {
                    migration.description = marker_payload(line).to_string();
                }
            }
            LineKind::Body => {
                if let Some(migration) = current.as_mut() {
                    migration.script.push_str(line);
                    migration.script.push('\n');
                }
            }
        }
    }

    migrations.extend(current);
    Ok(migrations)
}

/// Parse every `.sql` file in `dir`, in file-name order.
///
/// Results from each file are concatenated; nothing is sorted by version.
pub fn parse_migrations_dir(dir: &Path) -> CoreResult<Vec<Migration>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let mut migrations = Vec::new();
    for path in files {
        let text = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let parsed = parse_migrations(&text).map_err(|e| CoreError::MigrationFile {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        log::debug!(
            "Parsed {} migration(s) from {}",
            parsed.len(),
            path.display()
        );
        migrations.extend(parsed);
    }
    Ok(migrations)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
