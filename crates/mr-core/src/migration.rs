//! Migration file discovery and ordering

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A `<N>_<description>.sql` file in the migrations directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationFile {
    /// File name, used as the identity in logs and reports
    pub name: String,

    /// Numeric prefix that orders the file within a run
    pub prefix: u64,

    /// Absolute or caller-relative path to the file
    pub path: PathBuf,
}

impl MigrationFile {
    /// Build a migration file from a path, parsing its numeric prefix.
    ///
    /// The prefix is the part of the file name before the first `_`; a name
    /// whose prefix is not an unsigned integer is rejected.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::InvalidMigrationName {
                name: path.display().to_string(),
            })?
            .to_string();

        let prefix = parse_prefix(&name).ok_or_else(|| CoreError::InvalidMigrationName {
            name: name.clone(),
        })?;

        Ok(Self {
            name,
            prefix,
            path: path.to_path_buf(),
        })
    }

    /// Read the script text. Contents are not cached.
    pub fn read_sql(&self) -> CoreResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| CoreError::IoWithPath {
            path: self.path.display().to_string(),
            source: e,
        })
    }
}

fn parse_prefix(name: &str) -> Option<u64> {
    name.split('_').next()?.parse().ok()
}

fn is_sql_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|e| e == "sql")
}

/// Discover all `.sql` migration files directly inside `dir`.
///
/// Files are sorted by numeric prefix (so `2_` runs before `10_`), with the
/// file name as a tie-breaker. Other files and subdirectories are ignored.
/// Any `.sql` file without a numeric prefix fails the whole discovery.
pub fn discover_migrations(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if is_sql_file(&path) {
            files.push(MigrationFile::from_path(&path)?);
        }
    }

    files.sort_by(|a, b| a.prefix.cmp(&b.prefix).then_with(|| a.name.cmp(&b.name)));
    log::debug!(
        "Discovered {} migration files in {}",
        files.len(),
        dir.display()
    );
    Ok(files)
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
