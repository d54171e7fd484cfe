//! LLM Error Glossary Library
//!
//! Scans worker logs for LLM provider errors, classifies them, and keeps a
//! deduplicated JSON glossary of everything seen so far

pub mod config;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use models::{ErrorRecord, Glossary};
pub use providers::{identify_provider, Provider};
pub use services::{
    create_error_entry, extract_error_details, is_rate_limit_error, update_glossary,
    GlossaryUpdater, UpdateOutcome, UpdateReport,
};
pub use utils::error::{AppResult, GlossaryError};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
