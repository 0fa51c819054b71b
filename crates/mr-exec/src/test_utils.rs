//! Scripted session for executor and runner tests

use async_trait::async_trait;
use mr_db::{DbError, DbResult, Session};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What the mock does when a statement contains a given fragment
pub(crate) enum Scripted {
    /// Fail with a statement error carrying this code
    Code(u16),
    /// Fail with a statement error with no code
    Uncoded,
    /// Lose the connection
    Lost,
}

/// In-memory session that records everything it is asked to do
#[derive(Default)]
pub(crate) struct MockSession {
    rules: Vec<(String, Scripted)>,
    pub(crate) executed: Vec<String>,
    pub(crate) commits: usize,
    pub(crate) closed: bool,
    /// Set on close; survives the session being moved or dropped
    pub(crate) closed_signal: Arc<AtomicBool>,
    pub(crate) fail_commit: bool,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a response for any statement containing `fragment`
    pub(crate) fn on(mut self, fragment: &str, response: Scripted) -> Self {
        self.rules.push((fragment.to_string(), response));
        self
    }
}

#[async_trait]
impl Session for MockSession {
    async fn execute(&mut self, sql: &str) -> DbResult<()> {
        if self.closed {
            return Err(DbError::ConnectionLost("session is closed".to_string()));
        }
        self.executed.push(sql.to_string());

        let rule = self
            .rules
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()));
        match rule {
            Some((_, Scripted::Code(code))) => Err(DbError::statement(
                Some(*code),
                Some("HY000".to_string()),
                format!("scripted error {}", code),
            )),
            Some((_, Scripted::Uncoded)) => Err(DbError::statement(None, None, "scripted error")),
            Some((_, Scripted::Lost)) => {
                Err(DbError::ConnectionLost("server has gone away".to_string()))
            }
            None => Ok(()),
        }
    }

    async fn commit(&mut self) -> DbResult<()> {
        if self.fail_commit {
            return Err(DbError::CommitError("scripted commit failure".to_string()));
        }
        self.commits += 1;
        Ok(())
    }

    async fn close(&mut self) -> DbResult<()> {
        self.closed = true;
        self.closed_signal.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "mock"
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
