//! Run mode selection
//!
//! The run mode decides whether destructive `DROP TABLE` statements are
//! applied or skipped. Interactive front-ends collect a numeric choice and
//! turn it into a [`RunMode`] with [`RunMode::from_choice`].

use crate::error::{CoreError, CoreResult, RunModeRejection};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a migration run treats destructive statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunMode {
    /// Option 1: rebuild from scratch, destructive statements allowed
    FullReset,
    /// Option 2: update an existing database, `DROP TABLE` statements skipped
    Additive,
}

impl RunMode {
    /// All modes in prompt order
    pub const ALL: [RunMode; 2] = [RunMode::FullReset, RunMode::Additive];

    /// The number a user types to pick this mode
    pub fn choice(self) -> u8 {
        match self {
            RunMode::FullReset => 1,
            RunMode::Additive => 2,
        }
    }

    /// Short description shown next to the choice number
    pub fn description(self) -> &'static str {
        match self {
            RunMode::FullReset => "Pre-installed database, update and create new tables",
            RunMode::Additive => {
                "Database without dependencies on new tables needing to be updated"
            }
        }
    }

    /// Whether `DROP TABLE` statements are skipped in this mode
    pub fn skip_destructive(self) -> bool {
        matches!(self, RunMode::Additive)
    }

    /// Parse a raw numeric choice as typed at the prompt.
    ///
    /// Rejects non-numeric input and numbers other than 1 or 2.
    pub fn from_choice(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        let number: i64 = trimmed.parse().map_err(|_| CoreError::InvalidRunMode {
            input: trimmed.to_string(),
            reason: RunModeRejection::NotANumber,
        })?;

        Self::ALL
            .into_iter()
            .find(|mode| i64::from(mode.choice()) == number)
            .ok_or_else(|| CoreError::InvalidRunMode {
                input: trimmed.to_string(),
                reason: RunModeRejection::OutOfRange,
            })
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::FullReset => write!(f, "full-reset"),
            RunMode::Additive => write!(f, "additive"),
        }
    }
}

impl FromStr for RunMode {
    type Err = CoreError;

    /// Accepts either the kebab-case name or the numeric choice
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-reset" | "full_reset" => Ok(RunMode::FullReset),
            "additive" => Ok(RunMode::Additive),
            other => Self::from_choice(other),
        }
    }
}
