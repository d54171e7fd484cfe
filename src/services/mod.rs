//! Service layer module
//!
//! Contains the glossary scanning, classification, and persistence services

pub mod classifier;
pub mod extractor;
pub mod scanner;
pub mod store;
pub mod updater;

pub use classifier::{create_error_entry, is_rate_limit_error};
pub use extractor::extract_error_details;
pub use scanner::scan_log;
pub use updater::{update_glossary, GlossaryUpdater, UpdateOutcome, UpdateReport};
