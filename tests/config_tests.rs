//! Configuration module tests

use llm_error_glossary::config::settings::{Settings, DEFAULT_GLOSSARY_PATH, DEFAULT_LOG_PATH};
use std::env;
use std::path::PathBuf;

const VARS: [&str; 4] = [
    "LLM_ERROR_LOG_PATH",
    "LLM_ERROR_GLOSSARY_PATH",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// Clean up test environment variables
fn cleanup_test_env() {
    for var in &VARS {
        env::remove_var(var);
    }
}

// Environment variables are process-wide, so every env scenario runs in
// this single test.
#[test]
fn test_settings_from_environment() {
    cleanup_test_env();

    let settings = Settings::new().unwrap();
    assert_eq!(settings.paths.log_path, PathBuf::from(DEFAULT_LOG_PATH));
    assert_eq!(settings.paths.glossary_path, PathBuf::from(DEFAULT_GLOSSARY_PATH));
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");

    env::set_var("LLM_ERROR_LOG_PATH", "/srv/agent/worker.log");
    env::set_var("LLM_ERROR_GLOSSARY_PATH", "/srv/agent/glossary.json");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");
    let settings = Settings::new().unwrap();
    assert_eq!(settings.paths.log_path, PathBuf::from("/srv/agent/worker.log"));
    assert_eq!(settings.paths.glossary_path, PathBuf::from("/srv/agent/glossary.json"));
    assert_eq!(settings.logging.format, "json");

    env::set_var("LOG_FORMAT", "xml");
    assert!(Settings::new().is_err());

    env::set_var("LOG_FORMAT", "text");
    env::set_var("RUST_LOG", "loud");
    let error = Settings::new().unwrap_err();
    assert!(format!("{:#}", error).contains("Invalid log level"));

    cleanup_test_env();
}

#[test]
fn test_command_line_paths_override() {
    let settings = Settings::default()
        .with_paths(Some(PathBuf::from("a.log")), Some(PathBuf::from("b.json")))
        .unwrap();
    assert_eq!(settings.paths.log_path, PathBuf::from("a.log"));
    assert_eq!(settings.paths.glossary_path, PathBuf::from("b.json"));
}

#[test]
fn test_empty_path_rejected() {
    let result = Settings::default().with_paths(Some(PathBuf::new()), None);
    assert!(result.is_err());
}

#[test]
fn test_directory_glossary_path_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = Settings::default().with_paths(None, Some(dir.path().to_path_buf()));
    assert!(result.is_err());
}
