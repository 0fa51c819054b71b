//! Error types for mr-exec

use mr_core::CoreError;
use mr_db::DbError;
use thiserror::Error;

/// Errors that abort a migration run
///
/// Per-statement failures never appear here; they are recorded as
/// outcomes in the run report.
#[derive(Error, Debug)]
pub enum ExecError {
    /// Enumeration, configuration, or file read failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Session could not be opened or closed
    #[error(transparent)]
    Db(#[from] DbError),

    /// X001: Session failed while a file was being applied
    #[error("[X001] Run aborted while applying '{file}': {source}")]
    Aborted { file: String, source: DbError },
}

/// Result type alias for ExecError
pub type ExecResult<T> = Result<T, ExecError>;
