//! Per-statement outcomes and their per-file and per-run aggregates

use chrono::{DateTime, Utc};
use mr_core::{MigrationFile, RunMode};
use serde::Serialize;
use std::fmt;

/// Why a statement was not sent to the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `DROP TABLE` under the additive run mode; ends the file
    Destructive,
    /// Nothing to execute after trimming
    Empty,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Destructive => write!(f, "destructive statement"),
            SkipReason::Empty => write!(f, "empty statement"),
        }
    }
}

/// Result of one attempted statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatementOutcome {
    /// Applied successfully
    Executed,
    /// Not sent to the database
    Skipped { reason: SkipReason },
    /// Rejected with a code from the warn set; the run continues
    Warned { code: Option<u16>, message: String },
    /// Rejected with any other error; the run continues
    Failed { code: Option<u16>, message: String },
}

impl StatementOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, StatementOutcome::Executed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StatementOutcome::Skipped { .. })
    }

    pub fn is_warned(&self) -> bool {
        matches!(self, StatementOutcome::Warned { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StatementOutcome::Failed { .. })
    }
}

/// Outcomes for a single migration file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name
    pub file: String,

    /// Numeric ordering prefix
    pub prefix: u64,

    /// Number of statements the script split into
    pub statements: usize,

    /// One outcome per attempted statement, in order
    pub outcomes: Vec<StatementOutcome>,
}

impl FileReport {
    pub fn new(file: &MigrationFile, statements: usize, outcomes: Vec<StatementOutcome>) -> Self {
        Self {
            file: file.name.clone(),
            prefix: file.prefix,
            statements,
            outcomes,
        }
    }

    fn count(&self, pred: impl Fn(&StatementOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }

    pub fn executed(&self) -> usize {
        self.count(StatementOutcome::is_executed)
    }

    pub fn skipped(&self) -> usize {
        self.count(StatementOutcome::is_skipped)
    }

    pub fn warned(&self) -> usize {
        self.count(StatementOutcome::is_warned)
    }

    pub fn failed(&self) -> usize {
        self.count(StatementOutcome::is_failed)
    }

    /// Statements never attempted because a destructive skip ended the file
    pub fn not_attempted(&self) -> usize {
        self.statements.saturating_sub(self.outcomes.len())
    }
}

/// Totals across a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub executed: usize,
    pub skipped: usize,
    pub warned: usize,
    pub failed: usize,
    pub not_attempted: usize,
}

impl RunSummary {
    /// True when no statement failed or warned
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.warned == 0
    }
}

/// Report for a whole migration run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Mode the run was executed in
    pub mode: RunMode,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last file was committed
    pub finished_at: DateTime<Utc>,

    /// Per-file reports in execution order
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Aggregate counts over every file
    pub fn summary(&self) -> RunSummary {
        self.files
            .iter()
            .fold(RunSummary::default(), |mut acc, file| {
                acc.files += 1;
                acc.executed += file.executed();
                acc.skipped += file.skipped();
                acc.warned += file.warned();
                acc.failed += file.failed();
                acc.not_attempted += file.not_attempted();
                acc
            })
    }

    /// Run duration in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(name: &str, prefix: u64) -> MigrationFile {
        MigrationFile {
            name: name.to_string(),
            prefix,
            path: PathBuf::from(name),
        }
    }

    fn failed(code: u16) -> StatementOutcome {
        StatementOutcome::Failed {
            code: Some(code),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_file_report_counts() {
        let report = FileReport::new(
            &file("1_a.sql", 1),
            5,
            vec![
                StatementOutcome::Executed,
                StatementOutcome::Warned {
                    code: Some(1060),
                    message: "dup".to_string(),
                },
                failed(1146),
                StatementOutcome::Skipped {
                    reason: SkipReason::Destructive,
                },
            ],
        );

        assert_eq!(report.executed(), 1);
        assert_eq!(report.warned(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.not_attempted(), 1);
    }

    #[test]
    fn test_run_summary_totals() {
        let now = Utc::now();
        let run = RunReport {
            mode: RunMode::FullReset,
            started_at: now,
            finished_at: now,
            files: vec![
                FileReport::new(&file("1_a.sql", 1), 2, vec![StatementOutcome::Executed; 2]),
                FileReport::new(
                    &file("2_b.sql", 2),
                    2,
                    vec![StatementOutcome::Executed, failed(1064)],
                ),
            ],
        };

        let summary = run.summary();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.executed, 3);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
        assert_eq!(run.duration_ms(), 0);
    }

    #[test]
    fn test_empty_run_is_clean() {
        let now = Utc::now();
        let run = RunReport {
            mode: RunMode::Additive,
            started_at: now,
            finished_at: now,
            files: Vec::new(),
        };
        assert_eq!(run.summary(), RunSummary::default());
        assert!(run.summary().is_clean());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(StatementOutcome::Skipped {
            reason: SkipReason::Destructive,
        })
        .unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "destructive");

        let json = serde_json::to_value(failed(1146)).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["code"], 1146);
    }
}
