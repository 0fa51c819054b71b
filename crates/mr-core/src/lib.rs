//! mr-core - Core library for Migrun
//!
//! This crate provides configuration loading, run-mode selection, migration
//! file discovery and the delimiter-aware SQL statement splitter shared by
//! all Migrun components.

pub mod config;
pub mod error;
pub mod migration;
pub mod run_mode;
pub(crate) mod serde_helpers;
pub mod splitter;
pub mod statement;

pub use config::{Backend, Config, DatabaseConfig};
pub use error::{CoreError, CoreResult, RunModeRejection};
pub use migration::{discover_migrations, MigrationFile};
pub use run_mode::RunMode;
pub use splitter::split_statements;
pub use statement::Statement;
