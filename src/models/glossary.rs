//! Glossary data model
//!
//! On-disk shape: `{ "llm_errors": [ ErrorRecord, ... ] }`. Keys this crate
//! does not know about are carried through untouched.

use crate::providers::Provider;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Normalized label for throttling and quota errors
pub const RATE_LIMIT_CODE: &str = "RATE_LIMIT_EXCEEDED";

/// Label used when neither classification nor the provider gave a code
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";

/// One known LLM provider error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Classified error kind
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,

    /// HTTP status extracted from the log
    #[serde(default, alias = "httpStatusCode", deserialize_with = "null_as_default")]
    pub http_status_code: u16,

    /// Vendor the error is attributed to
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: Provider,

    /// Raw error message (kept for older glossary readers)
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,

    /// Raw error message
    #[serde(default, alias = "exactMessage", deserialize_with = "null_as_default")]
    pub exact_message: String,

    /// Generated explanation
    #[serde(default, deserialize_with = "null_as_default")]
    pub why: String,

    /// Generated remediation guidance
    #[serde(default, deserialize_with = "null_as_default")]
    pub how: String,

    #[serde(default, alias = "isRateLimit", deserialize_with = "null_as_default")]
    pub is_rate_limit: bool,

    /// ISO-8601 UTC timestamp of the latest sighting
    #[serde(default, alias = "lastSeen", deserialize_with = "null_as_default")]
    pub last_seen: String,

    /// Fields written by other tools
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorRecord {
    /// Message used for deduplication
    ///
    /// Older files may only carry `reason`.
    pub fn message(&self) -> &str {
        if self.exact_message.is_empty() {
            &self.reason
        } else {
            &self.exact_message
        }
    }

    /// Whether this record describes the given occurrence
    pub fn matches(&self, provider: &Provider, http_status_code: u16, message: &str) -> bool {
        self.provider == *provider && self.http_status_code == http_status_code && self.message() == message
    }

    /// Record a new sighting
    pub fn touch(&mut self, timestamp: &str) {
        self.last_seen = timestamp.to_string();
    }
}

/// One element of the `llm_errors` array
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GlossaryEntry {
    Record(ErrorRecord),
    /// Valid JSON that does not read as a record, written back unchanged
    Opaque(Value),
}

impl GlossaryEntry {
    pub fn from_value(value: Value) -> Self {
        match ErrorRecord::deserialize(&value) {
            Ok(record) => GlossaryEntry::Record(record),
            Err(e) => {
                warn!("Keeping unreadable glossary entry as is ({}): {}", e, value);
                GlossaryEntry::Opaque(value)
            }
        }
    }

    pub fn as_record(&self) -> Option<&ErrorRecord> {
        match self {
            GlossaryEntry::Record(record) => Some(record),
            GlossaryEntry::Opaque(_) => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut ErrorRecord> {
        match self {
            GlossaryEntry::Record(record) => Some(record),
            GlossaryEntry::Opaque(_) => None,
        }
    }
}

impl From<ErrorRecord> for GlossaryEntry {
    fn from(record: ErrorRecord) -> Self {
        GlossaryEntry::Record(record)
    }
}

impl<'de> Deserialize<'de> for GlossaryEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(GlossaryEntry::from_value)
    }
}

/// Persisted collection of known errors, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    #[serde(default, alias = "llmErrors", deserialize_with = "null_as_default")]
    pub llm_errors: Vec<GlossaryEntry>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a glossary from any parsed JSON document
    ///
    /// Entries that are not readable records are kept as they are. A
    /// document that is not an object, or whose `llm_errors` is not an
    /// array, has no usable records and yields an empty list.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut object) = value else {
            warn!("Glossary root is not a JSON object. Starting with empty glossary.");
            return Self::new();
        };

        let entries = match object.remove("llm_errors").or_else(|| object.remove("llmErrors")) {
            Some(Value::Array(items)) => items.into_iter().map(GlossaryEntry::from_value).collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                warn!("Glossary llm_errors is not an array, discarding: {}", other);
                Vec::new()
            }
        };

        Self {
            llm_errors: entries,
            extra: object,
        }
    }

    /// Number of entries, readable or not
    pub fn len(&self) -> usize {
        self.llm_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.llm_errors.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.llm_errors.iter().filter_map(GlossaryEntry::as_record)
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut ErrorRecord> {
        self.llm_errors.iter_mut().filter_map(GlossaryEntry::as_record_mut)
    }

    /// Find the record for an occurrence, if already known
    pub fn find_mut(
        &mut self,
        provider: &Provider,
        http_status_code: u16,
        message: &str,
    ) -> Option<&mut ErrorRecord> {
        self.records_mut()
            .find(|record| record.matches(provider, http_status_code, message))
    }

    /// Append a newly discovered record
    pub fn push(&mut self, record: ErrorRecord) {
        self.llm_errors.push(record.into());
    }

    /// Pretty-printed JSON with 2-space indentation and a trailing newline
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

/// Current UTC time in ISO-8601 with a trailing `Z`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Treat explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
