//! Provider module
//!
//! Known LLM vendors, their keyword table and their log signatures

pub mod patterns;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// LLM API vendor an error is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAI,
    Anthropic,
    Mistral,
    Qwen,
    /// Vendor name found in a glossary file but not recognized here
    Other(String),
    Unknown,
}

impl Provider {
    /// Providers with a dedicated pattern list, in scan order
    pub const KNOWN: [Provider; 5] = [
        Provider::Gemini,
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Mistral,
        Provider::Qwen,
    ];

    /// Parse a stored provider name
    ///
    /// Known names match case-insensitively, then the keyword table is
    /// consulted (`claude` is Anthropic). Anything else is kept verbatim.
    pub fn from_name(name: &str) -> Provider {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("unknown") {
            return Provider::Unknown;
        }
        if let Some(known) = Provider::KNOWN
            .into_iter()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(name))
        {
            return known;
        }
        match identify_provider(name) {
            Provider::Unknown => Provider::Other(name.to_string()),
            named => named,
        }
    }

    /// Name as stored in the glossary
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Mistral => "mistral",
            Provider::Qwen => "qwen",
            Provider::Other(name) => name,
            Provider::Unknown => "unknown",
        }
    }

    /// Human readable vendor name used in generated explanations
    pub fn display_name(&self) -> &str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Mistral => "Mistral",
            Provider::Qwen => "Qwen",
            Provider::Other(name) => name,
            Provider::Unknown => "LLM provider",
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Unknown
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Provider::from_name(&name))
    }
}

/// Keyword table for provider identification, first match wins
const PROVIDER_KEYWORDS: [(Provider, &[&str]); 5] = [
    (Provider::Gemini, &["gemini"]),
    (Provider::OpenAI, &["openai", "gpt"]),
    (Provider::Anthropic, &["anthropic", "claude"]),
    (Provider::Mistral, &["mistral"]),
    (Provider::Qwen, &["qwen"]),
];

/// Identify the provider named in a piece of text
///
/// Case-insensitive substring scan; returns [`Provider::Unknown`] when
/// no keyword is present.
pub fn identify_provider(text: &str) -> Provider {
    let lowered = text.to_lowercase();
    PROVIDER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(provider, _)| provider.clone())
        .unwrap_or(Provider::Unknown)
}

/// Resolve the provider a match should be filed under
///
/// Message content wins over the bucket the matching pattern belongs to.
pub fn resolve_provider(message: &str, bucket: Provider) -> Provider {
    match identify_provider(message) {
        Provider::Unknown => bucket,
        named => named,
    }
}
