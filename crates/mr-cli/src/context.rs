//! Configuration assembly for CLI commands

use anyhow::{Context, Result};
use mr_core::config::load_dotenv;
use mr_core::{Backend, Config};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

const IN_MEMORY: &str = ":memory:";

/// Per-command overrides layered on top of file and environment settings
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub backend: Option<Backend>,
    pub database_path: Option<String>,
}

/// The project directory all relative paths resolve against
pub(crate) fn project_root(global: &GlobalArgs) -> PathBuf {
    PathBuf::from(&global.project_dir)
}

/// Build the effective configuration.
///
/// Precedence, lowest first: defaults, config file, `.env` and process
/// environment, command-line flags.
pub(crate) fn load_config(global: &GlobalArgs, overrides: Overrides) -> Result<Config> {
    let root = project_root(global);

    let env_file = match &global.env_file {
        Some(path) => Some(PathBuf::from(path)),
        None => Some(root.join(".env")).filter(|p| p.is_file()),
    };
    load_dotenv(env_file.as_deref()).context("Failed to load environment file")?;

    let mut config = match &global.config {
        Some(path) => {
            Config::load(Path::new(path)).context("Failed to load configuration file")?
        }
        None => Config::load_from_dir_or_default(&root)
            .context("Failed to load project configuration")?,
    };

    config
        .apply_env()
        .context("Invalid database settings in environment")?;

    if let Some(dir) = &global.migrations_dir {
        config.migrations_dir = dir.clone();
    }
    if let Some(backend) = overrides.backend {
        config.database.backend = backend;
    }
    if let Some(path) = overrides.database_path {
        config.database.path = path;
    }
    if config.database.backend == Backend::DuckDb && config.database.path != IN_MEMORY {
        let path = Path::new(&config.database.path);
        if path.is_relative() {
            config.database.path = root.join(path).display().to_string();
        }
    }

    config.validate().context("Invalid configuration")?;
    log::debug!(
        "Using {} backend, migrations in {}",
        config.database.backend,
        config.migrations_dir
    );
    Ok(config)
}
