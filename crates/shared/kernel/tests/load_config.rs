use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use toggle_kernel::config::{ConfigError, load_config};
use toggle_kernel::domain::config::{Config, LogFormat, StoreBackend};

fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn loads_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "toggle.toml",
        r#"
        [store]
        backend = "memory"

        [log]
        level = "debug"
        format = "json"
        "#,
    );

    let cfg: Config = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.store.backend, StoreBackend::Memory);
    assert_eq!(cfg.store.file_name, "catalog.json");
    assert_eq!(cfg.log.level, "debug");
    assert_eq!(cfg.log.format, LogFormat::Json);
}

#[test]
#[serial]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config::<Config>(Some(dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}
