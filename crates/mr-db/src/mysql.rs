//! MySQL/MariaDB session implementation
//!
//! Uses a single `mysql_async` connection with autocommit disabled, so work
//! only becomes durable when the runner commits at a file boundary.

use crate::error::{DbError, DbResult};
use crate::traits::Session;
use async_trait::async_trait;
use log::{debug, info};
use mr_core::DatabaseConfig;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder};

/// MySQL session over one dedicated connection
pub struct MysqlSession {
    conn: Option<Conn>,
    target: String,
    raise_on_warnings: bool,
}

/// Build connection options from configuration
pub(crate) fn build_opts(config: &DatabaseConfig) -> Opts {
    let mut builder = OptsBuilder::default()
        .ip_or_hostname(config.host.as_str())
        .tcp_port(config.port)
        .user(Some(config.user.as_str()))
        .pass(Some(config.password.as_str()))
        // utf8mb4 for full Unicode; no implicit commits between files
        .init(vec!["SET NAMES utf8mb4", "SET autocommit = 0"]);

    if !config.name.is_empty() {
        builder = builder.db_name(Some(config.name.as_str()));
    }

    builder.into()
}

fn describe_target(config: &DatabaseConfig) -> String {
    format!(
        "{}@{}:{}/{}",
        config.user, config.host, config.port, config.name
    )
}

impl MysqlSession {
    /// Connect to the configured server
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let target = describe_target(config);
        let conn = Conn::new(build_opts(config))
            .await
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", target, e)))?;

        info!("Connected to MySQL: {}", target);

        Ok(Self {
            conn: Some(conn),
            target,
            raise_on_warnings: config.raise_on_warnings,
        })
    }

    fn conn_mut(&mut self) -> DbResult<&mut Conn> {
        self.conn
            .as_mut()
            .ok_or_else(|| DbError::ConnectionLost("session is closed".to_string()))
    }
}

/// Turn the first server warning of the last statement into a statement error
async fn first_warning(conn: &mut Conn) -> DbResult<Option<DbError>> {
    let warnings: Vec<(String, u16, String)> = conn.query("SHOW WARNINGS").await?;
    Ok(warnings.into_iter().next().map(|(level, code, message)| {
        debug!("Statement raised {} {}: {}", level, code, message);
        DbError::statement(Some(code), None, message)
    }))
}

#[async_trait]
impl Session for MysqlSession {
    async fn execute(&mut self, sql: &str) -> DbResult<()> {
        let raise_on_warnings = self.raise_on_warnings;
        let conn = self.conn_mut()?;
        conn.query_drop(sql).await?;

        if raise_on_warnings && conn.get_warnings() > 0 {
            if let Some(err) = first_warning(conn).await? {
                return Err(err);
            }
        }
        Ok(())
    }

    async fn commit(&mut self) -> DbResult<()> {
        self.conn_mut()?
            .query_drop("COMMIT")
            .await
            .map_err(|e| DbError::CommitError(e.to_string()))
    }

    async fn close(&mut self) -> DbResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.disconnect().await?;
            debug!("Disconnected from MySQL: {}", self.target);
        }
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }

    fn describe(&self) -> String {
        self.target.clone()
    }
}
