use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::canonical_text;

/// JSON content as received at the API edge
///
/// Clients send either a JSON-encoded string or a structured value. The
/// variant is decided once when the request is parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum StatePayload {
    RawJsonText(String),
    Structured(Value),
}

impl StatePayload {
    /// Classify a parsed request value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => StatePayload::RawJsonText(text),
            other => StatePayload::Structured(other),
        }
    }

    /// Text stored for an autosave blob
    ///
    /// Raw text is kept verbatim without being parsed; structured values are
    /// encoded to canonical JSON.
    pub fn into_blob_text(self) -> String {
        match self {
            StatePayload::RawJsonText(text) => text,
            StatePayload::Structured(value) => canonical_text(&value),
        }
    }

    /// Text stored for a design: the canonical encoding of the value as sent
    ///
    /// A raw-text design is stored as a JSON string literal.
    pub fn to_design_text(&self) -> String {
        match self {
            StatePayload::RawJsonText(text) => Value::String(text.clone()).to_string(),
            StatePayload::Structured(value) => canonical_text(value),
        }
    }
}

/// Autosave record stored in redb, one per user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub content: String,
    /// Last save (Unix microseconds)
    pub updated_at: i64,
}

/// Response body for GET /api/state
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_splits_strings_from_structured() {
        assert_eq!(
            StatePayload::from_value(json!("{\"a\":1}")),
            StatePayload::RawJsonText("{\"a\":1}".to_string())
        );
        assert_eq!(
            StatePayload::from_value(json!({"a": 1})),
            StatePayload::Structured(json!({"a": 1}))
        );
    }

    #[test]
    fn test_blob_text_keeps_raw_strings_verbatim() {
        let payload = StatePayload::RawJsonText("{ not parsed }".to_string());

        assert_eq!(payload.into_blob_text(), "{ not parsed }");
    }

    #[test]
    fn test_blob_text_encodes_structured_values_canonically() {
        let payload = StatePayload::Structured(json!({"rows": 4, "cols": 4}));

        assert_eq!(payload.into_blob_text(), r#"{"cols":4,"rows":4}"#);
    }

    #[test]
    fn test_design_text_keeps_rule_colors() {
        let payload = StatePayload::Structured(json!({"x": 1, "ruleColors": {"1": "red"}}));

        assert_eq!(payload.to_design_text(), r#"{"ruleColors":{"1":"red"},"x":1}"#);
    }

    #[test]
    fn test_design_text_stores_raw_text_as_string_literal() {
        let payload = StatePayload::RawJsonText("{\"x\":1}".to_string());

        assert_eq!(payload.to_design_text(), r#""{\"x\":1}""#);
    }
}
