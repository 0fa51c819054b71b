//! Configuration types and loading for migrun.yml
//!
//! Settings are resolved in three layers: the YAML file (or built-in
//! defaults), then `.env`/process environment variables, then CLI flags
//! applied by the caller.

use crate::error::{CoreError, CoreResult};
use crate::serde_helpers::default_true;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the database host
pub const ENV_DB_HOST: &str = "dbhost";
/// Environment variable holding the database port
pub const ENV_DB_PORT: &str = "dbport";
/// Environment variable holding the database user
pub const ENV_DB_USER: &str = "dbuser";
/// Environment variable holding the database password
pub const ENV_DB_PASS: &str = "dbpass";
/// Environment variable holding the database (schema) name
pub const ENV_DB_NAME: &str = "dbname";

/// MySQL error code 1060, duplicate column name
pub const ER_DUP_FIELDNAME: u16 = 1060;

/// Main configuration from migrun.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory containing the numbered `.sql` migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Server error codes downgraded to warnings instead of failures
    #[serde(default = "default_warn_codes")]
    pub warn_codes: Vec<u16>,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_dir: default_migrations_dir(),
            warn_codes: default_warn_codes(),
            database: DatabaseConfig::default(),
        }
    }
}

/// Database backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// MySQL / MariaDB server (default)
    #[default]
    Mysql,
    /// Local DuckDB file or in-memory database
    DuckDb,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Mysql => write!(f, "mysql"),
            Backend::DuckDb => write!(f, "duckdb"),
        }
    }
}

/// Database connection configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Backend type (mysql or duckdb)
    #[serde(default)]
    pub backend: Backend,

    /// Server host name or address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server TCP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login user
    #[serde(default)]
    pub user: String,

    /// Login password
    #[serde(default, skip_serializing)]
    pub password: String,

    /// Database (schema) to connect to
    #[serde(default)]
    pub name: String,

    /// DuckDB file path or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Treat server warnings raised by a statement as statement errors
    #[serde(default = "default_true")]
    pub raise_on_warnings: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: default_host(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            name: String::new(),
            path: default_db_path(),
            raise_on_warnings: true,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("raise_on_warnings", &self.raise_on_warnings)
            .finish()
    }
}

const DEFAULT_CONFIG_FILES: [&str; 2] = ["migrun.yml", "migrun.yaml"];

fn default_migrations_dir() -> String {
    "database".to_string()
}

fn default_warn_codes() -> Vec<u16> {
    vec![ER_DUP_FIELDNAME]
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

/// Load variables from a `.env` file into the process environment.
///
/// With no explicit path the usual `.env` lookup applies. A missing
/// default file is not an error; a missing explicit file is. Variables
/// already set in the environment are never overwritten.
pub fn load_dotenv(path: Option<&Path>) -> CoreResult<()> {
    match path {
        Some(p) => {
            dotenv::from_path(p).map_err(|e| CoreError::ConfigParseError {
                message: format!("failed to load env file {}: {}", p.display(), e),
            })?;
            log::debug!("Loaded environment from {}", p.display());
        }
        None => match dotenv::dotenv() {
            Ok(found) => log::debug!("Loaded environment from {}", found.display()),
            Err(_) => log::debug!("No .env file found, using process environment"),
        },
    }
    Ok(())
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load migrun.yml / migrun.yaml from `dir`, or fall back to defaults
    /// when neither exists.
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        for name in DEFAULT_CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }
        log::debug!("No config file in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    /// Apply `dbhost`/`dbport`/`dbuser`/`dbpass`/`dbname` from the process
    /// environment.
    pub fn apply_env(&mut self) -> CoreResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides using a custom variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> CoreResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;
        if let Some(host) = lookup(ENV_DB_HOST) {
            db.host = host;
        }
        if let Some(port) = lookup(ENV_DB_PORT) {
            db.port = port.trim().parse().map_err(|_| CoreError::ConfigInvalid {
                message: format!("{} must be a port number, got '{}'", ENV_DB_PORT, port),
            })?;
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            db.user = user;
        }
        if let Some(password) = lookup(ENV_DB_PASS) {
            db.password = password;
        }
        if let Some(name) = lookup(ENV_DB_NAME) {
            db.name = name;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        match self.database.backend {
            Backend::Mysql => {
                if self.database.host.trim().is_empty() {
                    return Err(CoreError::ConfigInvalid {
                        message: "database.host cannot be empty for the mysql backend"
                            .to_string(),
                    });
                }
                if self.database.port == 0 {
                    return Err(CoreError::ConfigInvalid {
                        message: "database.port must be non-zero".to_string(),
                    });
                }
            }
            Backend::DuckDb => {
                if self.database.path.trim().is_empty() {
                    return Err(CoreError::ConfigInvalid {
                        message: "database.path cannot be empty for the duckdb backend"
                            .to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Resolve the migrations directory against a base directory
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Whether a server error code is downgraded to a warning
    pub fn is_warn_code(&self, code: u16) -> bool {
        self.warn_codes.contains(&code)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
