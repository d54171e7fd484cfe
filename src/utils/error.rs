//! Error handling module
//!
//! Defines error types and handling logic used in the project

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// Log file missing or unreadable
    #[error("Failed to read log file {path:?}: {source}")]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Glossary file exists but could not be read
    #[error("Failed to read glossary file {path:?}: {source}")]
    GlossaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Glossary file could not be written
    #[error("Failed to write glossary file {path:?}: {source}")]
    GlossaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl GlossaryError {
    /// Whether the error aborts the run before the glossary is touched
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GlossaryError::LogRead { .. }
                | GlossaryError::GlossaryRead { .. }
                | GlossaryError::Config(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GlossaryError::Config(_) => 2,
            _ => 1,
        }
    }

    /// Path the error relates to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            GlossaryError::LogRead { path, .. }
            | GlossaryError::GlossaryRead { path, .. }
            | GlossaryError::GlossaryWrite { path, .. } => Some(path.as_path()),
            GlossaryError::Serialization(_) | GlossaryError::Config(_) => None,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, GlossaryError>;

/// Error context extension trait for io results
pub trait ErrorContext<T> {
    /// Attach log file context
    fn log_read_context(self, path: &Path) -> AppResult<T>;

    /// Attach glossary read context
    fn glossary_read_context(self, path: &Path) -> AppResult<T>;

    /// Attach glossary write context
    fn glossary_write_context(self, path: &Path) -> AppResult<T>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn log_read_context(self, path: &Path) -> AppResult<T> {
        self.map_err(|source| GlossaryError::LogRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn glossary_read_context(self, path: &Path) -> AppResult<T> {
        self.map_err(|source| GlossaryError::GlossaryRead {
            path: path.to_path_buf(),
            source,
        })
    }

    fn glossary_write_context(self, path: &Path) -> AppResult<T> {
        self.map_err(|source| GlossaryError::GlossaryWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
