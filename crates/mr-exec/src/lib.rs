//! mr-exec - Script execution for Migrun
//!
//! This crate runs split statements against a database session, classifies
//! each result, and drives whole migration runs file by file.

pub mod error;
pub mod executor;
pub mod outcome;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ExecError, ExecResult};
pub use executor::{execute_statements, ExecutionPolicy};
pub use outcome::{FileReport, RunReport, RunSummary, SkipReason, StatementOutcome};
pub use runner::{apply_migrations, MigrationRunner};
