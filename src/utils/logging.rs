//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::config::settings::LoggingConfig;
use tracing::info;

/// Maximum message length shown in console output
pub const MAX_PREVIEW_LEN: usize = 120;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, total - max_len)
    } else {
        s.to_string()
    }
}

/// Message preview suitable for a single console line
pub fn preview(message: &str) -> String {
    truncate_content(&message.replace('\n', " "), MAX_PREVIEW_LEN)
}

/// Initialize logging system
///
/// Falls back silently when a global subscriber is already installed,
/// which happens when the library is driven from tests.
pub fn init_logging(config: &LoggingConfig) {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (machine consumption)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        info!("Logging system initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_content() {
        assert_eq!(truncate_content("Quota exceeded", 50), "Quota exceeded");
    }

    #[test]
    fn test_truncate_long_content() {
        let long = "x".repeat(30);
        assert_eq!(truncate_content(&long, 10), "xxxxxxxxxx... (20 chars truncated)");
    }

    #[test]
    fn test_truncate_multibyte_content() {
        let text = "配额已用尽配额已用尽";
        assert_eq!(truncate_content(text, 5), "配额已用尽... (5 chars truncated)");
    }

    #[test]
    fn test_preview_flattens_newlines() {
        assert_eq!(preview("line one\nline two"), "line one line two");
    }
}
