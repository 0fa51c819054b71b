use super::*;
use serial_test::serial;
use std::collections::HashMap;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.migrations_dir, "database");
    assert_eq!(config.warn_codes, vec![1060]);
    assert_eq!(config.database.backend, Backend::Mysql);
    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.port, 3306);
    assert!(config.database.raise_on_warnings);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("migrations_dir: sql").unwrap();
    assert_eq!(config.migrations_dir, "sql");
    assert_eq!(config.warn_codes, vec![ER_DUP_FIELDNAME]);
    assert_eq!(config.database.path, ":memory:");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
migrations_dir: db/migrations
warn_codes: [1060, 1061, 1050]
database:
  backend: mysql
  host: db.internal
  port: 3307
  user: deploy
  password: s3cret
  name: app
  raise_on_warnings: false
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.migrations_dir, "db/migrations");
    assert!(config.is_warn_code(1061));
    assert!(!config.is_warn_code(1146));
    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 3307);
    assert_eq!(config.database.user, "deploy");
    assert_eq!(config.database.password, "s3cret");
    assert_eq!(config.database.name, "app");
    assert!(!config.database.raise_on_warnings);
}

#[test]
fn test_parse_duckdb_backend() {
    let yaml = "database:\n  backend: duckdb\n  path: ./local.duckdb\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.database.backend, Backend::DuckDb);
    assert_eq!(config.database.path, "./local.duckdb");
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("migration_dir: typo");
    assert!(result.is_err());
}

#[test]
fn test_password_not_serialized_or_debug_printed() {
    let mut config = Config::default();
    config.database.password = "hunter2".to_string();

    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(!yaml.contains("hunter2"));
    assert!(!format!("{:?}", config).contains("hunter2"));
}

#[test]
fn test_validate_empty_migrations_dir() {
    let config = Config {
        migrations_dir: "  ".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_validate_mysql_requires_host() {
    let mut config = Config::default();
    config.database.host = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_duckdb_requires_path() {
    let mut config = Config::default();
    config.database.backend = Backend::DuckDb;
    config.database.path = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("migrun.yml")).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_load_from_dir_or_default() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "database");

    std::fs::write(dir.path().join("migrun.yaml"), "migrations_dir: scripts\n").unwrap();
    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config.migrations_dir, "scripts");
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("migrun.yml");
    std::fs::write(&path, "warn_codes: not-a-list\n").unwrap();
    assert!(matches!(
        Config::load(&path).unwrap_err(),
        CoreError::YamlParse(_)
    ));
}

#[test]
fn test_apply_env_from() {
    let vars: HashMap<&str, &str> = [
        ("dbhost", "10.0.0.5"),
        ("dbport", "3310"),
        ("dbuser", "root"),
        ("dbpass", "pw"),
        ("dbname", "shop"),
    ]
    .into_iter()
    .collect();

    let mut config = Config::default();
    config
        .apply_env_from(|k| vars.get(k).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.database.host, "10.0.0.5");
    assert_eq!(config.database.port, 3310);
    assert_eq!(config.database.user, "root");
    assert_eq!(config.database.password, "pw");
    assert_eq!(config.database.name, "shop");
}

#[test]
fn test_apply_env_from_keeps_unset_values() {
    let mut config = Config::default();
    config.database.user = "from_yaml".to_string();
    config.apply_env_from(|_| None).unwrap();
    assert_eq!(config.database.user, "from_yaml");
    assert_eq!(config.database.host, "localhost");
}

#[test]
fn test_apply_env_from_bad_port() {
    let mut config = Config::default();
    let err = config
        .apply_env_from(|k| (k == ENV_DB_PORT).then(|| "mysql".to_string()))
        .unwrap_err();
    assert!(err.to_string().contains("dbport"));
}

#[test]
#[serial]
fn test_load_dotenv_explicit_file() {
    let dir = TempDir::new().unwrap();
    let env_path = dir.path().join(".env");
    std::fs::write(&env_path, "dbname=dotenv_schema\n").unwrap();
    std::env::remove_var(ENV_DB_NAME);

    load_dotenv(Some(&env_path)).unwrap();
    let mut config = Config::default();
    config.apply_env().unwrap();
    assert_eq!(config.database.name, "dotenv_schema");

    std::env::remove_var(ENV_DB_NAME);
}

#[test]
#[serial]
fn test_load_dotenv_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    assert!(load_dotenv(Some(&dir.path().join("missing.env"))).is_err());
}
