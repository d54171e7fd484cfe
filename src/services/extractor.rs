//! Error payload extraction
//!
//! Turns the text captured after a status code into structured fields.
//! Never fails: anything that is not a JSON object degrades to a raw
//! text message.

use crate::models::ErrorDetails;
use serde_json::{Map, Value};

/// Upper bound on how far a JSON payload may run past its first line
const MAX_JSON_PAYLOAD_BYTES: usize = 64 * 1024;

/// Extract code, message and reason from an error payload
pub fn extract_error_details(payload: &str) -> ErrorDetails {
    let trimmed = payload.trim();

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(object)) => details_from_object(&object),
        _ => ErrorDetails {
            code: None,
            message: non_empty(trimmed),
            reason: None,
        },
    }
}

fn details_from_object(object: &Map<String, Value>) -> ErrorDetails {
    let mut details = ErrorDetails::default();

    match object.get("error") {
        Some(Value::Object(error)) => {
            details.code = string_field(error, "status")
                .or_else(|| string_field(error, "code"))
                .or_else(|| string_field(error, "type"));
            details.message = string_field(error, "message");
            details.reason = error
                .get("details")
                .and_then(Value::as_array)
                .and_then(|items| items.first())
                .and_then(|first| first.get("reason"))
                .and_then(Value::as_str)
                .and_then(non_empty)
                .or_else(|| string_field(error, "reason"));
        }
        Some(Value::String(message)) => details.message = non_empty(message),
        _ => {}
    }

    if details.message.is_none() {
        details.message = string_field(object, "message").or_else(|| string_field(object, "detail"));
    }

    details
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).and_then(non_empty)
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// End offset of the payload starting at `start`
///
/// A payload opening with `{` is followed across line breaks until its
/// braces balance. If they never do, the single-line capture ending at
/// `line_end` is kept.
pub fn payload_end(text: &str, start: usize, line_end: usize) -> usize {
    if !text[start..].starts_with('{') {
        return line_end;
    }
    balanced_json_end(&text[start..])
        .map(|len| start + len)
        .unwrap_or(line_end)
}

/// Length of the balanced JSON object at the start of `text`
fn balanced_json_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if idx > MAX_JSON_PAYLOAD_BYTES {
            return None;
        }

        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                // raw line breaks cannot occur inside a JSON string
                '\n' | '\r' => return None,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx + ch.len_utf8());
                }
            }
            _ => {}
        }
    }

    None
}
