//! Log scanning
//!
//! Runs the provider signature table over the whole log text, then the
//! provider-agnostic rate-limit scan for anything the table missed.

use crate::models::ErrorMatch;
use crate::providers::patterns::{patterns_for, FALLBACK_PATTERNS, FALLBACK_STATUSES};
use crate::providers::{identify_provider, resolve_provider, Provider};
use crate::services::extractor::{extract_error_details, payload_end};
use regex::{Captures, Regex};
use tracing::debug;

/// Find every recognizable LLM error in a log, in discovery order
pub fn scan_log(text: &str) -> Vec<ErrorMatch> {
    let mut matches = scan_provider_patterns(text);
    let consumed: Vec<(usize, usize)> = matches.iter().map(|m| m.span).collect();
    matches.extend(scan_fallback(text, &consumed));
    matches
}

/// Provider-specific pass, provider by provider in table order
pub fn scan_provider_patterns(text: &str) -> Vec<ErrorMatch> {
    let mut matches = Vec::new();

    for provider in Provider::KNOWN {
        for pattern in patterns_for(provider) {
            let found = for_each_capture(&pattern.regex, text, |caps, span| {
                build_match(text, caps, span, |message| {
                    resolve_provider(message, pattern.provider.clone())
                })
            });
            matches.extend(found);
        }
    }

    debug!("Provider patterns produced {} matches", matches.len());
    matches
}

/// Generic rate-limit pass
///
/// Matches overlapping `consumed` spans were already handled by a
/// provider signature and are skipped, as are statuses outside
/// [`FALLBACK_STATUSES`].
pub fn scan_fallback(text: &str, consumed: &[(usize, usize)]) -> Vec<ErrorMatch> {
    let mut taken: Vec<(usize, usize)> = consumed.to_vec();
    let mut matches = Vec::new();

    for regex in FALLBACK_PATTERNS.iter() {
        let found = for_each_capture(regex, text, |caps, span| {
            if taken.iter().any(|other| overlaps(*other, span)) {
                return None;
            }
            let found = build_match(text, caps, span, |message| {
                resolve_provider(message, identify_provider(line_around(text, span)))
            })?;
            if !FALLBACK_STATUSES.contains(&found.http_status_code) {
                return None;
            }
            taken.push(found.span);
            Some(ErrorMatch {
                from_fallback: true,
                ..found
            })
        });
        matches.extend(found);
    }

    debug!("Fallback scan produced {} matches", matches.len());
    matches
}

/// Walk non-overlapping captures, letting payloads extend past the match
fn for_each_capture<F>(regex: &Regex, text: &str, mut visit: F) -> Vec<ErrorMatch>
where
    F: FnMut(&Captures<'_>, (usize, usize)) -> Option<ErrorMatch>,
{
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = regex.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        let end = caps
            .name("payload")
            .map(|payload| payload_end(text, payload.start(), payload.end()))
            .unwrap_or(whole.end())
            .max(whole.end());

        if let Some(m) = visit(&caps, (whole.start(), end)) {
            found.push(m);
        }

        // empty matches cannot occur with these patterns, but never stall
        pos = if end > whole.start() { end } else { whole.start() + 1 };
    }

    found
}

fn build_match<R>(
    text: &str,
    caps: &Captures<'_>,
    span: (usize, usize),
    resolve: R,
) -> Option<ErrorMatch>
where
    R: FnOnce(&str) -> Provider,
{
    let http_status_code = caps.name("status")?.as_str().parse::<u16>().ok()?;
    let payload = caps.name("payload")?;
    let end = payload_end(text, payload.start(), payload.end());
    let details = extract_error_details(&text[payload.start()..end]);

    // nothing recoverable, drop silently
    let message = details.message.as_deref()?;
    let provider = resolve(message);

    Some(ErrorMatch {
        provider,
        http_status_code,
        details,
        span,
        from_fallback: false,
    })
}

fn overlaps(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Full line(s) containing a span
fn line_around(text: &str, span: (usize, usize)) -> &str {
    let start = text[..span.0].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let end = text[span.1..]
        .find('\n')
        .map(|idx| span.1 + idx)
        .unwrap_or(text.len());
    &text[start..end]
}
