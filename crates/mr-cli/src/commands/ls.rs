//! List command implementation

use anyhow::{Context, Result};
use mr_core::{discover_migrations, MigrationFile};
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, OutputFormat};
use crate::context::{self, Overrides};

#[derive(Serialize)]
struct MigrationInfo {
    order: usize,
    prefix: u64,
    name: String,
    path: String,
}

impl MigrationInfo {
    fn new(order: usize, file: &MigrationFile) -> Self {
        Self {
            order,
            prefix: file.prefix,
            name: file.name.clone(),
            path: file.path.display().to_string(),
        }
    }
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let config = context::load_config(global, Overrides::default())?;
    let dir = config.migrations_dir_absolute(&context::project_root(global));
    let files = discover_migrations(&dir).context("Failed to list migrations")?;

    let infos: Vec<MigrationInfo> = files
        .iter()
        .enumerate()
        .map(|(i, file)| MigrationInfo::new(i + 1, file))
        .collect();

    match args.output {
        OutputFormat::Text => print_table(&infos),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&infos).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_table(infos: &[MigrationInfo]) {
    let prefix_width = infos
        .iter()
        .map(|m| m.prefix.to_string().len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!("{:>5}  {:>prefix_width$}  NAME", "ORDER", "PREFIX");
    println!("{:->5}  {:->prefix_width$}  {}", "", "", "-".repeat(40));
    for info in infos {
        println!(
            "{:>5}  {:>prefix_width$}  {}",
            info.order, info.prefix, info.name
        );
    }

    println!();
    println!("{} migration files found", infos.len());
}
