use super::*;
use std::fs;
use tempfile::TempDir;

fn names(files: &[MigrationFile]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_numeric_not_lexicographic_order() {
    let dir = TempDir::new().unwrap();
    for name in ["2_x.sql", "10_y.sql", "1_z.sql"] {
        fs::write(dir.path().join(name), "SELECT 1;").unwrap();
    }

    let files = discover_migrations(dir.path()).unwrap();
    assert_eq!(names(&files), vec!["1_z.sql", "2_x.sql", "10_y.sql"]);
    assert_eq!(
        files.iter().map(|f| f.prefix).collect::<Vec<_>>(),
        vec![1, 2, 10]
    );
}

#[test]
fn test_zero_padding_is_ignored() {
    let dir = TempDir::new().unwrap();
    for name in ["003_c.sql", "2_b.sql", "01_a.sql"] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let files = discover_migrations(dir.path()).unwrap();
    assert_eq!(names(&files), vec!["01_a.sql", "2_b.sql", "003_c.sql"]);
}

#[test]
fn test_equal_prefixes_sorted_by_name() {
    let dir = TempDir::new().unwrap();
    for name in ["1_b.sql", "1_a.sql"] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let files = discover_migrations(dir.path()).unwrap();
    assert_eq!(names(&files), vec!["1_a.sql", "1_b.sql"]);
}

#[test]
fn test_non_sql_files_and_dirs_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1_a.sql"), "").unwrap();
    fs::write(dir.path().join("README.md"), "notes").unwrap();
    fs::write(dir.path().join("notes_2.txt"), "").unwrap();
    fs::create_dir(dir.path().join("3_archive.sql")).unwrap();

    let files = discover_migrations(dir.path()).unwrap();
    assert_eq!(names(&files), vec!["1_a.sql"]);
}

#[test]
fn test_missing_prefix_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("1_a.sql"), "").unwrap();
    fs::write(dir.path().join("init_schema.sql"), "").unwrap();

    let err = discover_migrations(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidMigrationName { ref name } if name == "init_schema.sql"
    ));
}

#[test]
fn test_name_without_underscore_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("5.sql"), "").unwrap();

    let err = discover_migrations(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidMigrationName { .. }));
}

#[test]
fn test_missing_directory() {
    let dir = TempDir::new().unwrap();
    let err = discover_migrations(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, CoreError::MigrationDirNotFound { .. }));
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    assert!(discover_migrations(dir.path()).unwrap().is_empty());
}

#[test]
fn test_read_sql_is_lazy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("1_a.sql");
    fs::write(&path, "SELECT 1;").unwrap();

    let file = MigrationFile::from_path(&path).unwrap();
    fs::write(&path, "SELECT 2;").unwrap();
    assert_eq!(file.read_sql().unwrap(), "SELECT 2;");
}

#[test]
fn test_read_sql_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = MigrationFile::from_path(&dir.path().join("7_gone.sql")).unwrap();
    assert!(matches!(
        file.read_sql().unwrap_err(),
        CoreError::IoWithPath { .. }
    ));
}
