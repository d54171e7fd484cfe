//! Rate-limit classification and glossary record construction

use crate::models::glossary::{now_timestamp, ErrorRecord, RATE_LIMIT_CODE, UNKNOWN_ERROR_CODE};
use crate::providers::Provider;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Map;

/// Statuses treated as throttling regardless of message text
pub const RATE_LIMIT_STATUSES: [u16; 2] = [429, 402];

/// Throttling phrases, matched against the lowercased message
static RATE_LIMIT_PHRASES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"rate.*limit|quota.*exceeded|too.*many.*request|daily.*limit|request.*limit|token.*limit")
        .expect("Failed to compile rate limit phrase regex")
});

/// Whether an error signals throttling or quota exhaustion
pub fn is_rate_limit_error(message: &str, http_status_code: u16) -> bool {
    RATE_LIMIT_STATUSES.contains(&http_status_code)
        || RATE_LIMIT_PHRASES.is_match(&message.to_lowercase())
}

/// Build a new glossary record for an occurrence
pub fn create_error_entry(
    provider: Provider,
    http_status_code: u16,
    code: Option<&str>,
    message: &str,
    reason: Option<&str>,
) -> ErrorRecord {
    let is_rate_limit = is_rate_limit_error(message, http_status_code);

    let (code, why, how) = if is_rate_limit {
        (
            RATE_LIMIT_CODE.to_string(),
            rate_limit_why(&provider, http_status_code, reason),
            rate_limit_how(&provider),
        )
    } else {
        let code = code.filter(|c| !c.is_empty()).unwrap_or(UNKNOWN_ERROR_CODE);
        (
            code.to_string(),
            generic_why(message, reason),
            generic_how(&provider, code, http_status_code),
        )
    };

    ErrorRecord {
        code,
        http_status_code,
        provider,
        reason: message.to_string(),
        exact_message: message.to_string(),
        why,
        how,
        is_rate_limit,
        last_seen: now_timestamp(),
        extra: Map::new(),
    }
}

fn reason_sentence(reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => {
            format!(" The specific reason from the API was '{}'.", reason)
        }
        _ => String::new(),
    }
}

fn rate_limit_why(provider: &Provider, http_status_code: u16, reason: Option<&str>) -> String {
    let status_note = match http_status_code {
        429 => " The HTTP status code 429 typically indicates rate limiting.".to_string(),
        402 => " The HTTP status code 402 indicates the account has run out of paid quota or credits."
            .to_string(),
        status => format!(
            " The HTTP status code was {}, but the message describes a usage limit.",
            status
        ),
    };

    format!(
        "This error indicates that the {} API rate limit or quota has been exceeded.{}{}",
        provider.display_name(),
        reason_sentence(reason),
        status_note
    )
}

fn rate_limit_how(provider: &Provider) -> String {
    format!(
        "1. Wait for the quota to reset (usually a few minutes to 24 hours depending on the limit). \
         2. Review your usage patterns and optimize API calls. \
         3. Consider upgrading your {} plan or requesting a quota increase if this is a recurring issue. \
         4. Implement exponential backoff in your API calls to avoid hitting rate limits.",
        provider.display_name()
    )
}

fn generic_why(message: &str, reason: Option<&str>) -> String {
    format!("This error indicates: {}.{}", message.trim_end_matches('.'), reason_sentence(reason))
}

fn generic_how(provider: &Provider, code: &str, http_status_code: u16) -> String {
    let name = provider.display_name();
    format!(
        "1. Consult the {name} API documentation for error code {code} (HTTP {status}). \
         2. Verify that your API key is valid and has the required permissions. \
         3. Check the request format and parameters against the API reference. \
         4. Make sure your {name} account is in good standing and billing is active.",
        name = name,
        code = code,
        status = http_status_code
    )
}
