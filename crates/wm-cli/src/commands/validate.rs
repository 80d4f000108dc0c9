//! Validate command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{create_read_only_migrator, load_project, ExitCode};

/// Execute the validate command
///
/// Exits with code 2 when the migration set disagrees with applied history,
/// and with an error for anything else.
pub async fn execute(_args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = create_read_only_migrator(&project, global)?;

    match migrator.validate(&project.migrations).await {
        Ok(()) => {
            println!("OK: {} migration(s) consistent", project.migrations.len());
            Ok(())
        }
        Err(err) if err.is_structural() => {
            eprintln!("Validation failed: {err}");
            Err(ExitCode(2).into())
        }
        Err(err) => Err(err.into()),
    }
}
