//! Split command implementation

use anyhow::{Context, Result};
use mr_core::split_statements;
use std::path::Path;

use crate::cli::{OutputFormat, SplitArgs};

/// Execute the split command
pub async fn execute(args: &SplitArgs) -> Result<()> {
    let path = Path::new(&args.file);
    let sql = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let statements = split_statements(&sql);

    match args.output {
        OutputFormat::Text => {
            for (i, statement) in statements.iter().enumerate() {
                let marker = if statement.is_drop_table() {
                    " (DROP TABLE)"
                } else {
                    ""
                };
                println!("-- [{}]{}", i + 1, marker);
                println!("{}", statement);
            }
            println!();
            println!("{} statements", statements.len());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&statements)
                .context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }

    Ok(())
}
