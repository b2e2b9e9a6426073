//! Observability sink — where providers report each completed LLM call.
//!
//! One [`LlmCallRecord`] is emitted per successfully parsed provider response.
//! [`TracingSink`] forwards it to `tracing`; [`MemorySink`] keeps it in memory.

use std::sync::Mutex;

use genie_core::LogContext;
use serde::Serialize;
use tracing::info;

/// Category tag on every record.
pub const LLM_CATEGORY: &str = "llm";

/// Keys owned by the record itself; caller context may not shadow them.
const RESERVED_KEYS: &[&str] = &[
    "category",
    "trace",
    "total_tokens",
    "model",
    "request_duration",
    "raw_provider_response",
];

/// One completed provider call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LlmCallRecord {
    /// Caller-supplied metadata, flattened into the record.
    #[serde(flatten)]
    pub context: LogContext,
    pub category: &'static str,
    /// `<caller trace>/<component>`.
    pub trace: String,
    pub total_tokens: Option<u64>,
    pub model: Option<String>,
    /// Wall-clock request duration, in seconds.
    pub request_duration: f64,
    pub raw_provider_response: serde_json::Value,
}

impl LlmCallRecord {
    /// Build a record from a parsed provider response.
    ///
    /// `total_tokens` and `model` are read from the response when present.
    pub fn from_response(
        context: &LogContext,
        trace: String,
        request_duration: f64,
        response: &serde_json::Value,
    ) -> Self {
        let mut context = context.clone();
        context.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));

        LlmCallRecord {
            context,
            category: LLM_CATEGORY,
            trace,
            total_tokens: response
                .pointer("/usage/total_tokens")
                .and_then(|v| v.as_u64()),
            model: response
                .get("model")
                .and_then(|v| v.as_str())
                .map(String::from),
            request_duration,
            raw_provider_response: response.clone(),
        }
    }
}

/// Receives structured records. Implementations must tolerate concurrent calls.
pub trait ObservabilitySink: Send + Sync {
    fn record(&self, record: &LlmCallRecord);
}

// ─────────────────────────────────────────────
// TracingSink
// ─────────────────────────────────────────────

/// Emits each record as a `tracing` info event under the `genie::llm` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ObservabilitySink for TracingSink {
    fn record(&self, record: &LlmCallRecord) {
        let payload = serde_json::to_string(record).unwrap_or_default();
        info!(
            target: "genie::llm",
            category = record.category,
            trace = %record.trace,
            total_tokens = record.total_tokens,
            model = record.model.as_deref(),
            request_duration = record.request_duration,
            record = %payload,
            "LLM call completed"
        );
    }
}

// ─────────────────────────────────────────────
// MemorySink
// ─────────────────────────────────────────────

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LlmCallRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records collected so far.
    pub fn records(&self) -> Vec<LlmCallRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObservabilitySink for MemorySink {
    fn record(&self, record: &LlmCallRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> LogContext {
        let mut context = LogContext::new();
        context.insert("trace".to_string(), json!("reviews"));
        context.insert("request_id".to_string(), json!("r-1"));
        context
    }

    #[test]
    fn test_record_extracts_usage_and_model() {
        let response = json!({"usage": {"total_tokens": 12}, "model": "x-1", "choices": []});
        let record = LlmCallRecord::from_response(&context(), "reviews/Provider".into(), 0.25, &response);

        assert_eq!(record.category, "llm");
        assert_eq!(record.total_tokens, Some(12));
        assert_eq!(record.model.as_deref(), Some("x-1"));
        assert_eq!(record.raw_provider_response, response);
    }

    #[test]
    fn test_record_missing_usage() {
        let record = LlmCallRecord::from_response(&LogContext::new(), "/p".into(), 0.0, &json!({}));
        assert!(record.total_tokens.is_none());
        assert!(record.model.is_none());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = LlmCallRecord::from_response(
            &context(),
            "reviews/Provider".into(),
            1.5,
            &json!({"model": "x-1"}),
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["request_id"], "r-1");
        assert_eq!(json["category"], "llm");
        assert_eq!(json["trace"], "reviews/Provider");
        assert_eq!(json["request_duration"], 1.5);
        assert!(json["total_tokens"].is_null());
        assert_eq!(json["raw_provider_response"], json!({"model": "x-1"}));
        assert!(json.get("raw_response").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_context_cannot_shadow_record_fields() {
        let record = LlmCallRecord::from_response(&context(), "reviews/Provider".into(), 0.1, &json!({}));
        assert!(record.context.get("trace").is_none());
        assert_eq!(record.context["request_id"], "r-1");
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let record = LlmCallRecord::from_response(&LogContext::new(), "/p".into(), 0.1, &json!({}));
        sink.record(&record);
        sink.record(&record);

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[0], record);
    }

    #[test]
    fn test_tracing_sink_does_not_panic_without_subscriber() {
        let record = LlmCallRecord::from_response(&context(), "/p".into(), 0.1, &json!({"model": "m"}));
        TracingSink.record(&record);
    }
}
