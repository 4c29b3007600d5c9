//! Configuration loading and validation tests
//!
//! Tests focus on BEHAVIOR of configuration loading, validation, and error
//! handling, not on TOML parsing internals.

use agentboard::config::{ConfigError, EngineConfig};
use agentboard::engine::Engine;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[storage]
path = "boards.db"

[automation]
auto_assign = true
max_parent_depth = 16
"#
    )
    .unwrap();

    let config = EngineConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.storage.path, "boards.db");
    assert!(config.automation.auto_assign);
    assert_eq!(config.automation.max_parent_depth, 16);
}

#[test]
fn test_config_defaults_automation_section() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[storage]
path = ":memory:"
"#
    )
    .unwrap();

    let config = EngineConfig::load_from_file(temp_file.path()).unwrap();
    assert!(config.automation.auto_assign);
    assert_eq!(config.automation.max_parent_depth, 32);
}

#[test]
fn test_config_rejects_missing_storage_section() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[automation]
auto_assign = false
"#
    )
    .unwrap();

    let err = EngineConfig::load_from_file(temp_file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}

#[test]
fn test_config_rejects_empty_storage_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[storage]
path = ""
"#
    )
    .unwrap();

    let err = EngineConfig::load_from_file(temp_file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfig(_)));
}

#[test]
fn test_config_rejects_zero_parent_depth() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[storage]
path = "boards.db"

[automation]
max_parent_depth = 0
"#
    )
    .unwrap();

    let err = EngineConfig::load_from_file(temp_file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfig(_)));
}

#[test]
fn test_engine_builds_from_loaded_config() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[storage]
path = ":memory:"

[automation]
auto_assign = false
"#
    )
    .unwrap();

    let config = EngineConfig::load_from_file(temp_file.path()).unwrap();
    let engine = Engine::from_config(&config).unwrap();

    // The store behind the configured engine is usable.
    let project = engine.store().lock().create_project("p").unwrap();
    assert_eq!(project.name, "p");
}

#[test]
fn test_config_missing_file_is_read_error() {
    let err = EngineConfig::load_from_file(std::path::Path::new("/nonexistent/engine.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileRead(_)));
}
