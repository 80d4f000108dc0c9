//! Migration engine for Waymark.
//!
//! Given the full set of migrations and a [`MigrationDriver`], the engine
//! checks the set against applied history ([`validate`]), works out what is
//! left to run ([`plan`]), applies it under a per-handle lock
//! ([`Migrator::migrate`]), and reports per-migration status ([`info`]).
//!
//! [`MigrationDriver`]: wm_db::MigrationDriver

pub mod error;
pub mod executor;
pub mod planner;
pub mod status;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{MigrateError, MigrateResult};
pub use executor::Migrator;
pub use planner::plan;
pub use status::info;
pub use validator::validate;
