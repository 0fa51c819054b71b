//! mr-db - Database session layer for Migrun
//!
//! This crate provides the `Session` trait consumed by the script executor
//! and its implementations for MySQL (via `mysql_async`) and DuckDB.

pub mod duckdb;
pub mod error;
pub mod mysql;
pub mod traits;

pub use crate::duckdb::DuckDbSession;
pub use error::{DbError, DbResult};
pub use crate::mysql::MysqlSession;
pub use traits::Session;

use mr_core::{Backend, DatabaseConfig};

/// Open a session for the configured backend
pub async fn open_session(config: &DatabaseConfig) -> DbResult<Box<dyn Session>> {
    let session: Box<dyn Session> = match config.backend {
        Backend::Mysql => Box::new(MysqlSession::connect(config).await?),
        Backend::DuckDb => Box::new(DuckDbSession::new(&config.path)?),
    };
    log::info!(
        "Opened {} session ({})",
        session.db_type(),
        session.describe()
    );
    Ok(session)
}
