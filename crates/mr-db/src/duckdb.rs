//! DuckDB session implementation
//!
//! DuckDB runs in autocommit mode here: statements are applied as soon as
//! they execute and `commit` is a no-op, matching the run's
//! no-rollback semantics. DuckDB errors carry no numeric code.

use crate::error::{DbError, DbResult};
use crate::traits::Session;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;

/// DuckDB session
pub struct DuckDbSession {
    conn: Option<Connection>,
    path: String,
}

impl DuckDbSession {
    /// Create a new in-memory DuckDB session
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Some(conn),
            path: ":memory:".to_string(),
        })
    }

    /// Create a new DuckDB session backed by a file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Some(conn),
            path: path.display().to_string(),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn conn(&self) -> DbResult<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| DbError::ConnectionLost("session is closed".to_string()))
    }

    /// Run a scalar count query. Used to inspect state after a run.
    pub fn query_count(&self, sql: &str) -> DbResult<usize> {
        let count: i64 = self
            .conn()?
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }

    /// Check if a table or view exists in the `main` schema
    pub fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'main' AND table_name = ?",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[async_trait]
impl Session for DuckDbSession {
    async fn execute(&mut self, sql: &str) -> DbResult<()> {
        self.conn()?.execute_batch(sql)?;
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        self.conn()?;
        Ok(())
    }

    async fn close(&mut self) -> DbResult<()> {
        match self.conn.take() {
            Some(conn) => conn
                .close()
                .map_err(|(_, e)| DbError::Internal(format!("failed to close DuckDB: {}", e))),
            None => Ok(()),
        }
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
