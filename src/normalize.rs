//! Design content signatures
//!
//! Two design submissions are the same design when their signatures are
//! byte-for-byte equal. A signature is the canonical JSON text of the content
//! with the cosmetic `ruleColors` field removed from the top-level object.
//!
//! Canonical text means object keys sorted lexicographically at every depth,
//! arrays in their original order, and no insignificant whitespace.

use serde_json::{Map, Value};

use crate::constants::COSMETIC_KEY;
use crate::models::StatePayload;

/// Compute the duplicate-detection signature of a design payload
///
/// Returns `None` when the payload is raw text that does not parse as JSON.
/// Such content never collides with anything, so callers skip the
/// duplicate check for it.
pub fn signature(payload: &StatePayload) -> Option<String> {
    match payload {
        StatePayload::RawJsonText(text) => text_signature(text),
        StatePayload::Structured(value) => Some(value_signature(value)),
    }
}

/// Signature of stored or submitted JSON text
pub fn text_signature(text: &str) -> Option<String> {
    serde_json::from_str::<Value>(text)
        .ok()
        .map(|value| value_signature(&value))
}

/// Signature of an already-parsed value
pub fn value_signature(value: &Value) -> String {
    match value {
        Value::Object(map) if map.contains_key(COSMETIC_KEY) => {
            let mut stripped = map.clone();
            stripped.remove(COSMETIC_KEY);
            canonical_text(&Value::Object(stripped))
        }
        other => canonical_text(other),
    }
}

/// Serialize a value with sorted keys and minimal separators
pub fn canonical_text(value: &Value) -> String {
    canonicalize(value).to_string()
}

// Rebuild maps in sorted key order so the output does not depend on whether
// serde_json keeps insertion order.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let mut sorted = Map::new();
            for (key, inner) in entries {
                sorted.insert(key.clone(), canonicalize(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
