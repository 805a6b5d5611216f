//! Locating the JSON object inside free-form model output.

use serde_json::{Map, Value};
use thiserror::Error;

/// The model response did not contain a parseable JSON object
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to parse model response: {reason}")]
pub struct ParseError {
    pub reason: String,
    /// The offending (trimmed, unfenced) text
    pub raw: String,
}

impl ParseError {
    pub fn new(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// A fresh model call may well produce a parseable answer.
    pub fn is_retryable(&self) -> bool {
        true
    }
}

/// Extract the JSON object embedded in `raw`.
///
/// Handles bare JSON, JSON wrapped in a code fence (with or without a
/// language tag) and JSON surrounded by prose.
pub fn extract_json_object(raw: &str) -> Result<Map<String, Value>, ParseError> {
    let text = strip_code_fence(raw.trim());

    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ParseError::new(
            format!("expected a JSON object, found {}", json_kind(&other)),
            text,
        )),
        Err(e) => Err(ParseError::new(e.to_string(), text)),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let mut body = text;
    if let Some(rest) = body.strip_prefix("```") {
        // Language tag (e.g. `json`) runs up to the first non-alphanumeric char
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
