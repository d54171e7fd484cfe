//! Log signature table
//!
//! Every pattern exposes two named groups: `status` (three digit HTTP
//! status) and `payload` (start of the error body). Payloads never span
//! past the end of the line here; multi-line JSON bodies are completed by
//! the extractor.

use super::Provider;
use once_cell::sync::Lazy;
use regex::Regex;

/// Statuses the provider-agnostic scan is allowed to report
pub const FALLBACK_STATUSES: [u16; 3] = [429, 402, 403];

/// Provider-specific signatures, tried in table order
const PROVIDER_PATTERN_SOURCES: [(Provider, &[&str]); 5] = [
    (
        Provider::Gemini,
        &[
            r"(?i)Gemini API request failed with status(?: code)? (?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)Gemini API error[ \t]+(?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)\[GoogleGenerativeAI Error\][^\r\n]*?\[(?P<status>\d{3})[^\]\r\n]*\][ \t]*(?P<payload>[^\r\n]+)",
        ],
    ),
    (
        Provider::OpenAI,
        &[
            r"(?i)OpenAI API request failed with status(?: code)? (?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)OpenAI API error[ \t]+(?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
        ],
    ),
    (
        Provider::Anthropic,
        &[
            r"(?i)(?:Anthropic|Claude) API request failed with status(?: code)? (?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)(?:Anthropic|Claude) API error[ \t]+(?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
        ],
    ),
    (
        Provider::Mistral,
        &[
            r"(?i)Mistral(?: AI)? API request failed with status(?: code)? (?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)Mistral(?: AI)? API error[ \t]+(?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
        ],
    ),
    (
        Provider::Qwen,
        &[
            r"(?i)(?:Qwen|DashScope) API request failed with status(?: code)? (?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
            r"(?i)(?:Qwen|DashScope) API error[ \t]+(?P<status>\d{3}):[ \t]*(?P<payload>[^\r\n]+)",
        ],
    ),
];

/// Generic throttling phrases near a quota-related status
///
/// The status must stand on its own: a digit, decimal point or timestamp
/// colon right before it (`21429`, `10:00:03.429`) is not a status.
const FALLBACK_PATTERN_SOURCES: &[&str] = &[
    // status first: "HTTP 429: Too Many Requests"
    r"(?im)(?:^|[^\d.,:\r\n]|[a-z]:)(?P<status>429|402|403)\b[ \t]*[:\-]?[ \t]*(?P<payload>[^\r\n]{0,80}?(?:rate[ \t_-]*limit|quota[ \t_-]*exceeded|too[ \t_-]*many[ \t_-]*requests)[^\r\n]*)",
    // phrase first: "Rate limit exceeded (status 429)"
    r"(?i)(?P<payload>(?:rate[ \t_-]*limit|quota[ \t_-]*exceeded|too[ \t_-]*many[ \t_-]*requests)[^\r\n]*?)(?:[ \t]*[(\[]?(?:status|code|HTTP)[ \t:=]*|[ \t]+[(\[]?|[(\[])(?P<status>429|402|403)\b",
];

/// A compiled provider signature
#[derive(Debug)]
pub struct LogPattern {
    /// Bucket the pattern files its matches under
    pub provider: Provider,
    pub regex: Regex,
}

/// Compiled provider signatures, grouped by provider in scan order
pub static PROVIDER_PATTERNS: Lazy<Vec<LogPattern>> = Lazy::new(|| {
    PROVIDER_PATTERN_SOURCES
        .iter()
        .flat_map(|(provider, sources)| {
            sources.iter().map(move |source| LogPattern {
                provider: provider.clone(),
                regex: Regex::new(source).expect("Failed to compile provider log pattern"),
            })
        })
        .collect()
});

/// Compiled provider-agnostic rate-limit signatures
pub static FALLBACK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    FALLBACK_PATTERN_SOURCES
        .iter()
        .map(|source| Regex::new(source).expect("Failed to compile fallback log pattern"))
        .collect()
});

/// Patterns registered for one provider, in table order
pub fn patterns_for(provider: Provider) -> impl Iterator<Item = &'static LogPattern> {
    PROVIDER_PATTERNS
        .iter()
        .filter(move |pattern| pattern.provider == provider)
}
