//! Session trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// An open, exclusively owned database session used for one migration run.
///
/// Statement failures are reported as [`DbError::Statement`]; any other
/// error means the session can no longer be used.
///
/// [`DbError::Statement`]: crate::error::DbError::Statement
#[async_trait]
pub trait Session: Send {
    /// Execute a single statement
    async fn execute(&mut self, sql: &str) -> DbResult<()>;

    /// Commit all pending work
    async fn commit(&mut self) -> DbResult<()>;

    /// Close the session. Further calls fail with `ConnectionLost`.
    async fn close(&mut self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Human-readable connection target (no credentials)
    fn describe(&self) -> String;
}
