//! Run command implementation

use anyhow::{Context, Result};
use mr_core::RunMode;
use mr_exec::{apply_migrations, FileReport, RunReport, RunSummary};
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat, RunArgs};
use crate::context::{self, Overrides};
use crate::prompt;

/// JSON shape of a finished run
#[derive(Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    report: &'a RunReport,
    summary: RunSummary,
    duration_ms: i64,
}

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = context::load_config(
        global,
        Overrides {
            backend: args.backend.map(Into::into),
            database_path: args.database_path.clone(),
        },
    )?;

    let mode: RunMode = match args.mode {
        Some(mode) => mode.into(),
        None => prompt::select_mode()?,
    };

    let root = context::project_root(global);
    let report = apply_migrations(&config, mode, &root)
        .await
        .context("Migration run failed")?;

    match args.output {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn file_line(file: &FileReport) -> String {
    let mut parts = vec![format!("{} executed", file.executed())];
    if file.warned() > 0 {
        parts.push(format!("{} warned", file.warned()));
    }
    if file.failed() > 0 {
        parts.push(format!("{} failed", file.failed()));
    }
    if file.skipped() > 0 {
        parts.push(format!("{} skipped", file.skipped()));
    }
    if file.not_attempted() > 0 {
        parts.push(format!("{} not attempted", file.not_attempted()));
    }

    let marker = if file.failed() > 0 { "✗" } else { "✓" };
    format!("  {} {} ({})", marker, file.file, parts.join(", "))
}

fn print_text(report: &RunReport) {
    println!("Mode: {}", report.mode);
    println!();

    for file in &report.files {
        println!("{}", file_line(file));
    }

    let summary = report.summary();
    println!();
    println!(
        "{} executed, {} warned, {} failed, {} skipped [{}ms]",
        summary.executed,
        summary.warned,
        summary.failed,
        summary.skipped,
        report.duration_ms()
    );
    println!("All {} SQL scripts have been executed.", summary.files);
}

fn print_json(report: &RunReport) -> Result<()> {
    let output = RunOutput {
        report,
        summary: report.summary(),
        duration_ms: report.duration_ms(),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
