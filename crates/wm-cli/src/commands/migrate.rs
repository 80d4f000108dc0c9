//! Migrate command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{create_migrator, load_project};

/// Execute the migrate command
pub async fn execute(_args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = create_migrator(&project, global)?;

    let applied = migrator
        .migrate(&project.migrations)
        .await
        .context("Migration failed")?;

    if applied.is_empty() {
        println!("Schema of '{}' is up to date", project.config.name);
        return Ok(());
    }

    for record in &applied {
        println!(
            "  Applied {} {} ({} ms)",
            record.version,
            record.description,
            record.execution_time.as_millis()
        );
    }
    println!();
    println!(
        "Applied {} migration{}",
        applied.len(),
        if applied.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
