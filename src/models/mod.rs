//! Data models module
//!
//! Defines the persisted glossary structures and the transient values
//! produced while scanning a log

use crate::providers::Provider;
use serde::{Deserialize, Serialize};

pub mod glossary;

pub use glossary::{ErrorRecord, Glossary, GlossaryEntry};

/// Fields recovered from an error payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Provider status string (e.g. `RESOURCE_EXHAUSTED`)
    pub code: Option<String>,
    /// Human readable message
    pub message: Option<String>,
    /// Machine reason (e.g. `RATE_LIMIT`)
    pub reason: Option<String>,
}

/// One error occurrence found in a log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMatch {
    /// Provider the occurrence is filed under
    pub provider: Provider,
    pub http_status_code: u16,
    pub details: ErrorDetails,
    /// Byte range in the log covered by the match and its payload
    pub span: (usize, usize),
    /// Whether the generic rate-limit scan produced this match
    pub from_fallback: bool,
}

impl ErrorMatch {
    /// Message text used for deduplication
    pub fn message(&self) -> &str {
        self.details.message.as_deref().unwrap_or_default()
    }
}
