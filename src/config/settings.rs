//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default worker log location
pub const DEFAULT_LOG_PATH: &str = "./worker.log";

/// Default glossary location
pub const DEFAULT_GLOSSARY_PATH: &str = "./llm_error_glossary.json";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Input/output paths
    pub paths: PathsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Input/output paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Worker log to scan
    pub log_path: PathBuf,
    /// Glossary JSON file to maintain
    pub glossary_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                log_path: PathBuf::from(DEFAULT_LOG_PATH),
                glossary_path: PathBuf::from(DEFAULT_GLOSSARY_PATH),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            paths: PathsConfig {
                log_path: PathBuf::from(get_env_or_default("LLM_ERROR_LOG_PATH", DEFAULT_LOG_PATH)),
                glossary_path: PathBuf::from(get_env_or_default(
                    "LLM_ERROR_GLOSSARY_PATH",
                    DEFAULT_GLOSSARY_PATH,
                )),
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate().context("Invalid settings")?;

        Ok(settings)
    }

    /// Override paths with command line values where given
    pub fn with_paths(mut self, log_path: Option<PathBuf>, glossary_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = log_path {
            self.paths.log_path = path;
        }
        if let Some(path) = glossary_path {
            self.paths.glossary_path = path;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.paths.log_path.as_os_str().is_empty() {
            anyhow::bail!("Log path cannot be empty");
        }

        if self.paths.glossary_path.as_os_str().is_empty() {
            anyhow::bail!("Glossary path cannot be empty");
        }

        if self.paths.glossary_path.is_dir() {
            anyhow::bail!("Glossary path is a directory: {:?}", self.paths.glossary_path);
        }

        // RUST_LOG may carry directives such as "llm_error_glossary=debug"
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level = self.logging.level.to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !valid_levels.contains(&level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
