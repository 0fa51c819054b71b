//! Migration runner: applies discovered files one by one on a single session

use crate::error::{ExecError, ExecResult};
use crate::executor::{execute_statements, ExecutionPolicy};
use crate::outcome::{FileReport, RunReport};
use chrono::Utc;
use log::info;
use mr_core::{discover_migrations, split_statements, Config, MigrationFile, RunMode};
use mr_db::{open_session, Session};
use std::path::Path;

/// Drives a run over an ordered list of migration files
pub struct MigrationRunner {
    mode: RunMode,
    policy: ExecutionPolicy,
}

impl MigrationRunner {
    /// Create a runner for `mode` using the warn codes from `config`
    pub fn new(mode: RunMode, config: &Config) -> Self {
        Self {
            mode,
            policy: ExecutionPolicy::new(mode, config),
        }
    }

    /// The policy applied to every file
    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Read, split, execute, and commit one file
    pub async fn run_file(
        &self,
        session: &mut dyn Session,
        file: &MigrationFile,
    ) -> ExecResult<FileReport> {
        info!("Executing {}...", file.name);

        let sql = file.read_sql()?;
        let statements = split_statements(&sql);

        let outcomes = execute_statements(session, &file.name, &statements, &self.policy)
            .await
            .map_err(|source| ExecError::Aborted {
                file: file.name.clone(),
                source,
            })?;

        session
            .commit()
            .await
            .map_err(|source| ExecError::Aborted {
                file: file.name.clone(),
                source,
            })?;

        Ok(FileReport::new(file, statements.len(), outcomes))
    }

    /// Apply every file in order, committing after each one.
    ///
    /// Stops at the first session-level failure; files already committed
    /// stay applied.
    pub async fn run_files(
        &self,
        session: &mut dyn Session,
        files: &[MigrationFile],
    ) -> ExecResult<RunReport> {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(files.len());

        for file in files {
            reports.push(self.run_file(session, file).await?);
        }

        Ok(RunReport {
            mode: self.mode,
            started_at,
            finished_at: Utc::now(),
            files: reports,
        })
    }

    /// Run all files on `session` and close it, whether or not the run
    /// succeeded. A run error takes precedence over a close error.
    pub async fn run_and_close(
        &self,
        mut session: Box<dyn Session>,
        files: &[MigrationFile],
    ) -> ExecResult<RunReport> {
        let result = self.run_files(session.as_mut(), files).await;
        let closed = session.close().await;

        let report = result?;
        closed?;
        Ok(report)
    }
}

/// Discover the migrations under `root`, open a session, and apply them.
///
/// Enumeration happens before connecting, so a bad file name never opens a
/// connection.
pub async fn apply_migrations(config: &Config, mode: RunMode, root: &Path) -> ExecResult<RunReport> {
    let dir = config.migrations_dir_absolute(root);
    let files = discover_migrations(&dir)?;
    info!(
        "Found {} migration files in {} (mode: {})",
        files.len(),
        dir.display(),
        mode
    );

    let session = open_session(&config.database).await?;
    MigrationRunner::new(mode, config)
        .run_and_close(session, &files)
        .await
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
