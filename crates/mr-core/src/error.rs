//! Error types for mr-core

use std::fmt;
use thiserror::Error;

/// Why a run mode choice was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunModeRejection {
    /// Input is not an integer
    NotANumber,
    /// Integer that matches no mode
    OutOfRange,
}

impl fmt::Display for RunModeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunModeRejection::NotANumber => write!(f, "please enter a number"),
            RunModeRejection::OutOfRange => write!(f, "please enter 1 or 2"),
        }
    }
}

/// Core error type for Migrun
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Migrations directory missing or not a directory
    #[error("[E004] Migrations directory not found: {path}")]
    MigrationDirNotFound { path: String },

    /// E005: Migration file name has no numeric prefix
    #[error("[E005] Invalid migration file name '{name}': expected '<N>_<description>.sql'")]
    InvalidMigrationName { name: String },

    /// E006: Run mode choice outside the accepted options
    #[error("[E006] Invalid run mode '{input}': {reason}")]
    InvalidRunMode {
        input: String,
        reason: RunModeRejection,
    },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
