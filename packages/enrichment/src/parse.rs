//! Multi-strategy parsing of model responses.
//!
//! Model output is expected to contain a JSON object but often arrives
//! wrapped in prose or markdown fences. The cascade tries, in order:
//!
//! 1. the first brace-delimited substring (greedy: first `{` to last `}`),
//! 2. the entire raw text as JSON,
//! 3. a null-filled fallback carrying the start of the raw text.
//!
//! Parsing never fails the pipeline: a malformed response must not abort
//! an otherwise-recoverable record, so degradation is returned as data.

use std::collections::BTreeMap;

use serde_json::Value;

/// Prefix of the fallback citation when no strategy decodes.
pub const UNPARSED_CITATION_PREFIX: &str = "Could not parse structured response: ";

/// Whether the cascade recovered a structured object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A JSON object was decoded; field values are real.
    Parsed,
    /// No strategy decoded; every field is null.
    Unparsed,
}

/// Fields recovered from a model response.
///
/// Every expected field is present in `values` even when null, so
/// downstream code never probes for missing keys.
#[derive(Debug, Clone)]
pub struct ParsedFields {
    pub values: BTreeMap<String, Value>,
    pub outcome: ParseOutcome,
    /// Fallback provenance note, set only when unparsed.
    pub citation: Option<String>,
}

impl ParsedFields {
    /// String value of a field, if present and non-null.
    pub fn string(&self, field: &str) -> Option<String> {
        match self.values.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value of a field; numeric strings are accepted.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.values.get(field) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Run the parsing cascade over `raw`, recovering `expected` fields.
pub fn parse_fields(raw: &str, expected: &[&str]) -> ParsedFields {
    if let Some(object) = decode_object(raw) {
        let values = expected
            .iter()
            .map(|&field| {
                (
                    field.to_string(),
                    coerce(object.get(field).cloned().unwrap_or(Value::Null)),
                )
            })
            .collect();
        return ParsedFields {
            values,
            outcome: ParseOutcome::Parsed,
            citation: None,
        };
    }

    tracing::warn!(
        preview = %truncate(raw, 80),
        "no parsing strategy decoded the model response"
    );

    ParsedFields {
        values: expected
            .iter()
            .map(|&field| (field.to_string(), Value::Null))
            .collect(),
        outcome: ParseOutcome::Unparsed,
        citation: Some(format!("{UNPARSED_CITATION_PREFIX}{}", truncate(raw, 200))),
    }
}

/// Strategies 1 and 2: brace-delimited substring, then the whole text.
fn decode_object(raw: &str) -> Option<serde_json::Map<String, Value>> {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            if let Ok(Value::Object(map)) = serde_json::from_str(&raw[start..=end]) {
                return Some(map);
            }
        }
    }

    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Coerce a decoded value to the expected scalar shapes
/// (string / number / null); anything else becomes null.
fn coerce(value: Value) -> Value {
    match value {
        Value::String(_) | Value::Number(_) | Value::Null => value,
        other => {
            tracing::debug!(?other, "discarding non-scalar field value");
            Value::Null
        }
    }
}

/// First `limit` characters, char-boundary safe.
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
