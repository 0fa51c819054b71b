//! Error types for mr-db

use mysql_async::DriverError;
use thiserror::Error;

/// Database session errors
///
/// Only [`DbError::Statement`] describes a problem with a single statement;
/// every other variant means the session itself is unusable.
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement rejected by the server (D002)
    #[error("[D002] SQL execution failed{}: {message}", format_code(.code, .state))]
    Statement {
        /// Server error code, when the backend reports one
        code: Option<u16>,
        /// SQLSTATE, when the backend reports one
        state: Option<String>,
        /// Server message
        message: String,
    },

    /// Connection lost or session already closed (D003)
    #[error("[D003] Database session lost: {0}")]
    ConnectionLost(String),

    /// Commit failed (D004)
    #[error("[D004] Commit failed: {0}")]
    CommitError(String),

    /// Internal error (D007)
    #[error("[D007] Internal database error: {0}")]
    Internal(String),
}

fn format_code(code: &Option<u16>, state: &Option<String>) -> String {
    match (code, state) {
        (Some(code), Some(state)) => format!(" ({} {})", code, state),
        (Some(code), None) => format!(" ({})", code),
        (None, Some(state)) => format!(" ({})", state),
        (None, None) => String::new(),
    }
}

impl DbError {
    /// Build a statement error
    pub fn statement(code: Option<u16>, state: Option<String>, message: impl Into<String>) -> Self {
        DbError::Statement {
            code,
            state,
            message: message.into(),
        }
    }

    /// Whether this error only affects the statement that raised it
    pub fn is_statement_error(&self) -> bool {
        matches!(self, DbError::Statement { .. })
    }
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

/// Driver errors that leave the connection unusable. Everything else the
/// driver raises only affects the statement being run.
fn is_protocol_fault(err: &DriverError) -> bool {
    matches!(
        err,
        DriverError::ConnectionClosed
            | DriverError::PoolDisconnected
            | DriverError::PacketOutOfOrder
            | DriverError::PacketTooLarge
            | DriverError::UnexpectedPacket { .. }
            | DriverError::BadCompressedPacketHeader
    )
}

impl From<mysql_async::Error> for DbError {
    fn from(err: mysql_async::Error) -> Self {
        match err {
            mysql_async::Error::Server(server) => DbError::Statement {
                code: Some(server.code),
                state: Some(server.state),
                message: server.message,
            },
            mysql_async::Error::Url(e) => DbError::ConnectionError(e.to_string()),
            mysql_async::Error::Io(e) => DbError::ConnectionLost(e.to_string()),
            mysql_async::Error::Driver(e) if is_protocol_fault(&e) => {
                DbError::ConnectionLost(e.to_string())
            }
            mysql_async::Error::Driver(e) => DbError::Statement {
                code: None,
                state: None,
                message: e.to_string(),
            },
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error carries no numeric server code, so every failure
        // surfaces as an uncoded statement error.
        DbError::Statement {
            code: None,
            state: None,
            message: err.to_string(),
        }
    }
}
