//! Rate-limit classification and record construction tests

use llm_error_glossary::services::classifier::RATE_LIMIT_STATUSES;
use llm_error_glossary::{create_error_entry, is_rate_limit_error, Provider};

const SAMPLE_MESSAGES: &[&str] = &[
    "",
    "Quota exceeded",
    "Invalid API key",
    "The model is overloaded. Please try again later.",
    "You exceeded your current quota, please check your plan and billing details.",
    "Request too large for gpt-4o",
    "请求过于频繁",
];

const RATE_LIMIT_MESSAGES: &[&str] = &[
    "Rate limit reached for requests",
    "rate-limited by upstream",
    "Quota for metric exceeded",
    "Too many requests, slow down",
    "Daily usage limit reached",
    "request per minute limit hit",
    "max token limit exceeded",
];

const OTHER_MESSAGES: &[&str] = &[
    "Invalid API key",
    "Model not found",
    "The model is overloaded.",
    "Internal server error",
    "Permission denied on resource project",
];

#[test]
fn test_quota_statuses_always_rate_limit() {
    for status in RATE_LIMIT_STATUSES {
        for message in SAMPLE_MESSAGES {
            assert!(
                is_rate_limit_error(message, status),
                "{} / {:?} should be a rate limit",
                status,
                message
            );
        }
    }
}

#[test]
fn test_other_statuses_follow_phrases() {
    for status in [400u16, 401, 403, 404, 500, 503, 529] {
        for message in RATE_LIMIT_MESSAGES {
            assert!(is_rate_limit_error(message, status), "{:?}", message);
        }
        for message in OTHER_MESSAGES {
            assert!(!is_rate_limit_error(message, status), "{:?}", message);
        }
    }
}

#[test]
fn test_classification_is_case_insensitive() {
    assert!(is_rate_limit_error("RATE LIMIT EXCEEDED", 400));
    assert!(is_rate_limit_error("Quota Exceeded", 400));
}

#[test]
fn test_classification_is_deterministic() {
    let a = create_error_entry(Provider::OpenAI, 403, None, "Quota exceeded for org", None);
    let b = create_error_entry(Provider::OpenAI, 403, None, "Quota exceeded for org", None);
    assert_eq!(a.code, b.code);
    assert_eq!(a.why, b.why);
    assert_eq!(a.how, b.how);
    assert_eq!(a.code, "RATE_LIMIT_EXCEEDED");
}

#[test]
fn test_rate_limit_guidance_has_four_steps() {
    let record = create_error_entry(Provider::Mistral, 429, None, "Too many requests", None);
    for step in ["1. ", "2. ", "3. ", "4. "] {
        assert!(record.how.contains(step), "missing step {:?}", step);
    }
    assert!(record.how.contains("Mistral plan"));
    assert!(!record.why.contains("specific reason"));
}

#[test]
fn test_generic_guidance_has_four_steps() {
    let record = create_error_entry(Provider::Gemini, 404, Some("NOT_FOUND"), "Model not found", None);
    assert_eq!(record.code, "NOT_FOUND");
    for step in ["1. ", "2. ", "3. ", "4. "] {
        assert!(record.how.contains(step), "missing step {:?}", step);
    }
    assert!(record.how.contains("API key"));
    assert!(record.how.contains("request format"));
}

#[test]
fn test_empty_code_falls_back_to_unknown() {
    let record = create_error_entry(Provider::Unknown, 500, Some(""), "Internal server error", None);
    assert_eq!(record.code, "UNKNOWN_ERROR");
}
