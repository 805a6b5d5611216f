//! Field coercion helpers shared by the variant mappers.

use crate::analysis::{SCORE_MAX, SCORE_MIN};
use serde_json::{Map, Value};

/// Score used when a field is absent or not numeric
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Coerce a JSON value to text, falling back to `default`.
///
/// Arrays become their elements' text joined with single spaces; numbers
/// and booleans are rendered. Absent, null and blank values yield the default.
pub fn text_or(value: Option<&Value>, default: &str) -> String {
    match value.and_then(render_text) {
        Some(text) if !text.trim().is_empty() => text,
        _ => default.to_string(),
    }
}

/// Coerce a JSON value to a score within `[SCORE_MIN, SCORE_MAX]`.
///
/// Numeric strings are accepted; anything else is neutral.
pub fn score(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(x) if x.is_finite() => x.clamp(SCORE_MIN, SCORE_MAX),
        _ => NEUTRAL_SCORE,
    }
}

/// Coerce a JSON value to a list of non-empty strings.
///
/// A single string becomes a one-element list.
pub fn text_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(render_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(other) => render_text(other)
            .filter(|s| !s.trim().is_empty())
            .into_iter()
            .collect(),
        None => Vec::new(),
    }
}

/// Optional identifier: strings verbatim, numbers in decimal form.
pub fn identifier(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Borrow a nested object, treating anything else as empty.
pub fn object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    empty: &'a Map<String, Value>,
) -> &'a Map<String, Value> {
    match map.get(key) {
        Some(Value::Object(inner)) => inner,
        _ => empty,
    }
}

fn render_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(render_text)
                .filter(|s| !s.trim().is_empty())
                .collect();
            Some(parts.join(" "))
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
