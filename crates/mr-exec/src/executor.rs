//! Statement execution with per-statement error classification
//!
//! Statement-level failures are absorbed and recorded; only session-level
//! errors propagate to the caller.

use crate::outcome::{SkipReason, StatementOutcome};
use log::{debug, error, info, warn};
use mr_core::{Config, RunMode, Statement};
use mr_db::{DbError, DbResult, Session};

/// How statements of one run are treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPolicy {
    /// Stop a file at its first `DROP TABLE` statement
    pub skip_destructive: bool,

    /// Server error codes recorded as warnings rather than failures
    pub warn_codes: Vec<u16>,
}

impl ExecutionPolicy {
    /// Build the policy for a run mode using the configured warn codes
    pub fn new(mode: RunMode, config: &Config) -> Self {
        Self {
            skip_destructive: mode.skip_destructive(),
            warn_codes: config.warn_codes.clone(),
        }
    }

    /// Map a statement error to its outcome, passing session errors through
    pub fn classify(&self, err: DbError) -> DbResult<StatementOutcome> {
        match err {
            DbError::Statement { code, message, .. } => {
                if code.is_some_and(|c| self.warn_codes.contains(&c)) {
                    Ok(StatementOutcome::Warned { code, message })
                } else {
                    Ok(StatementOutcome::Failed { code, message })
                }
            }
            other => Err(other),
        }
    }
}

fn first_line(sql: &str) -> &str {
    sql.lines().next().unwrap_or_default()
}

/// Execute `statements` from `file` in order and record one outcome per
/// attempted statement.
///
/// Under `skip_destructive` the first `DROP TABLE` statement is recorded as
/// skipped and nothing after it in the file is attempted. The caller commits.
pub async fn execute_statements(
    session: &mut dyn Session,
    file: &str,
    statements: &[Statement],
    policy: &ExecutionPolicy,
) -> DbResult<Vec<StatementOutcome>> {
    let mut outcomes = Vec::with_capacity(statements.len());

    for (index, statement) in statements.iter().enumerate() {
        if policy.skip_destructive && statement.is_drop_table() {
            info!(
                "Skipping destructive statement in {}: {}",
                file,
                first_line(statement.as_str())
            );
            let remaining = statements.len() - index - 1;
            if remaining > 0 {
                info!("Skipping the remaining {} statements of {}", remaining, file);
            }
            outcomes.push(StatementOutcome::Skipped {
                reason: SkipReason::Destructive,
            });
            break;
        }

        if statement.is_blank() {
            outcomes.push(StatementOutcome::Skipped {
                reason: SkipReason::Empty,
            });
            continue;
        }

        let outcome = match session.execute(statement.as_str()).await {
            Ok(()) => {
                debug!("{}: statement {} executed", file, index + 1);
                StatementOutcome::Executed
            }
            Err(e) => policy.classify(e)?,
        };

        match &outcome {
            StatementOutcome::Warned { code, message } => warn!(
                "{}: statement {} raised {}: {}",
                file,
                index + 1,
                code.map(|c| c.to_string()).unwrap_or_default(),
                message
            ),
            StatementOutcome::Failed { code, message } => error!(
                "Error executing command in {}:\n{}\nError ({}): {}",
                file,
                statement,
                code.map(|c| c.to_string())
                    .unwrap_or_else(|| "no code".to_string()),
                message
            ),
            _ => {}
        }

        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[cfg(test)]
#[path = "executor_test.rs"]
mod tests;
