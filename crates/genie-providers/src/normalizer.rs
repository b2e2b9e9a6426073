//! Response normalizer — pulls the structured answer out of a provider
//! response and strips the values models use to say "I don't know".
//!
//! A model that ignores the schema is an expected outcome, so everything here
//! is infallible: bad content becomes [`Answer::Missing`], never an error.

use genie_core::NormalizedResult;
use serde_json::Value;
use tracing::debug;

/// Values treated as "field not answered". Compared case-sensitively.
pub const INVALID_VALUES: &[&str] = &[
    "not sure",
    "not clear",
    "not specified",
    "none",
    "null",
    "undefined",
];

/// Why a call produced no structured answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingReason {
    /// The provider answered with an empty body.
    EmptyBody,
    /// The response had no `choices[0].message.content` string.
    NoContent,
    /// The content was not a JSON object.
    Malformed,
}

/// Outcome of a structured-output call.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// Sanitized field mapping. Fields the model omitted are absent.
    Structured(NormalizedResult),
    Missing(MissingReason),
}

impl Answer {
    pub fn is_missing(&self) -> bool {
        matches!(self, Answer::Missing(_))
    }

    /// The field mapping, if there is one.
    pub fn fields(&self) -> Option<&NormalizedResult> {
        match self {
            Answer::Structured(fields) => Some(fields),
            Answer::Missing(_) => None,
        }
    }

    pub fn into_fields(self) -> Option<NormalizedResult> {
        match self {
            Answer::Structured(fields) => Some(fields),
            Answer::Missing(_) => None,
        }
    }

    /// Value of one field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().and_then(|fields| fields.get(field))
    }
}

/// Extract and sanitize the answer from a parsed provider response.
pub fn extract_answer(body: &Value) -> Answer {
    let Some(content) = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    else {
        debug!("Provider response has no message content");
        return Answer::Missing(MissingReason::NoContent);
    };

    match parse_content(content) {
        Some(fields) => Answer::Structured(sanitize(fields)),
        None => Answer::Missing(MissingReason::Malformed),
    }
}

/// Parse the model's content into a field mapping, unwrapping a `properties`
/// envelope when the model echoed the schema shape back.
fn parse_content(content: &str) -> Option<NormalizedResult> {
    let parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Model content is not valid JSON");
            return None;
        }
    };

    let Value::Object(mut fields) = parsed else {
        debug!("Model content is JSON but not an object");
        return None;
    };

    match fields.remove("properties") {
        Some(Value::Object(inner)) => Some(inner),
        Some(other) => {
            fields.insert("properties".to_string(), other);
            Some(fields)
        }
        None => Some(fields),
    }
}

/// Whether `value` is one of the [`INVALID_VALUES`] sentinels.
pub fn is_invalid_value(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| INVALID_VALUES.contains(&s))
}

/// Drop every field whose value is a sentinel, whatever the field's name.
pub fn sanitize(mut fields: NormalizedResult) -> NormalizedResult {
    fields.retain(|_, value| !is_invalid_value(value));
    fields
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
