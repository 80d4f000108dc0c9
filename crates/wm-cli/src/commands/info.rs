//! Info command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, InfoArgs, InfoOutput};
use crate::commands::common::{create_read_only_migrator, load_project, print_table};

/// Execute the info command
pub async fn execute(args: &InfoArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = create_read_only_migrator(&project, global)?;

    let infos = migrator
        .info(&project.migrations)
        .await
        .context("Failed to read migration history")?;

    match args.output {
        InfoOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&infos)?);
        }
        InfoOutput::Table => {
            let rows: Vec<Vec<String>> = infos
                .iter()
                .map(|i| {
                    vec![
                        i.migration.version.to_string(),
                        i.status.to_string(),
                        i.migration.description.clone(),
                    ]
                })
                .collect();
            print_table(&["VERSION", "STATUS", "DESCRIPTION"], &rows);
        }
    }
    Ok(())
}
