//! Plan command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::{
    create_read_only_migrator, load_project, migration_rows, print_table,
};

/// Execute the plan command
pub async fn execute(_args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = create_read_only_migrator(&project, global)?;

    let planned = migrator
        .plan(&project.migrations)
        .await
        .context("Failed to plan migrations")?;

    if planned.is_empty() {
        println!("Nothing to apply");
        return Ok(());
    }
    print_table(&["VERSION", "DESCRIPTION"], &migration_rows(&planned));
    Ok(())
}
