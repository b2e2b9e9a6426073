//! Request dispatcher — the entry point for structured-output calls.
//!
//! Resolves the model/provider/credentials for the call, hands it to the
//! registered provider, and normalizes whatever comes back.

use std::sync::Arc;

use genie_core::{AppConfig, FunctionSchema, Message, RequestOptions};
use tracing::debug;

use crate::error::Result;
use crate::normalizer::{extract_answer, Answer, MissingReason};
use crate::observability::ObservabilitySink;
use crate::registry::ProviderRegistry;
use crate::resolver::resolve;

/// Dispatches structured-output requests. Cheap to share; holds no per-call state.
#[derive(Debug, Clone)]
pub struct Requester {
    config: Arc<AppConfig>,
    registry: ProviderRegistry,
}

impl Requester {
    pub fn new(config: Arc<AppConfig>, registry: ProviderRegistry) -> Self {
        Requester { config, registry }
    }

    /// Requester with every built-in provider reporting to `sink`.
    pub fn from_config(config: Arc<AppConfig>, sink: Arc<dyn ObservabilitySink>) -> Result<Self> {
        let registry = ProviderRegistry::with_defaults(config.clone(), sink)?;
        Ok(Self::new(config, registry))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Ask the resolved provider to fill `function` from `messages`.
    ///
    /// Errors are configuration (unknown provider) or transport failures.
    /// A response without a usable structured answer is `Answer::Missing`.
    pub async fn function_calling(
        &self,
        messages: &[Message],
        function: &FunctionSchema,
        options: &RequestOptions,
    ) -> Result<Answer> {
        let request = resolve(options, &self.config);
        let provider = self.registry.get(&request.provider)?;

        debug!(
            provider = provider.name(),
            model = %request.model,
            function = %function.name,
            "Dispatching structured-output request"
        );

        let answer = match provider.function_calling(messages, function, &request).await? {
            Some(body) => extract_answer(&body),
            None => Answer::Missing(MissingReason::EmptyBody),
        };

        if let Answer::Missing(reason) = &answer {
            debug!(provider = provider.name(), ?reason, "No structured answer");
        }

        Ok(answer)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenieError, TransportError};
    use crate::observability::MemorySink;
    use crate::resolver::ResolvedRequest;
    use crate::traits::ProviderCapability;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Replays a canned response and remembers what it was asked.
    struct CannedProvider {
        response: Option<serde_json::Value>,
        seen: Mutex<Vec<ResolvedRequest>>,
    }

    impl CannedProvider {
        fn new(response: Option<serde_json::Value>) -> Arc<Self> {
            Arc::new(CannedProvider {
                response,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ProviderCapability for CannedProvider {
        async fn function_calling(
            &self,
            _messages: &[Message],
            _function: &FunctionSchema,
            request: &ResolvedRequest,
        ) -> Result<Option<serde_json::Value>> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    fn requester_with(provider: Arc<CannedProvider>) -> Requester {
        let mut registry = ProviderRegistry::new();
        registry.register("openai", provider);
        Requester::new(Arc::new(AppConfig::default()), registry)
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_requester_is_send_sync() {
        assert_send_sync::<Requester>();
        assert_send_sync::<ProviderRegistry>();
    }

    fn greeting_schema() -> FunctionSchema {
        FunctionSchema::new(
            "greet",
            "Greet the user",
            json!({"type": "object", "properties": {"greeting": {"type": "string"}}}),
        )
    }

    fn content_response(content: &str) -> serde_json::Value {
        json!({"choices": [{"message": {"content": content}}]})
    }

    #[tokio::test]
    async fn test_properties_envelope_round_trip() {
        let provider = CannedProvider::new(Some(content_response(
            r#"{"properties":{"a":"x","b":"none"}}"#,
        )));
        let requester = requester_with(provider);

        let answer = requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap();

        let fields = answer.into_fields().unwrap();
        assert_eq!(serde_json::Value::Object(fields), json!({"a": "x"}));
    }

    #[tokio::test]
    async fn test_empty_body_is_missing_not_error() {
        let requester = requester_with(CannedProvider::new(None));
        let answer = requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(answer, Answer::Missing(MissingReason::EmptyBody));
    }

    #[tokio::test]
    async fn test_invalid_content_is_missing_not_error() {
        let requester = requester_with(CannedProvider::new(Some(content_response("not json"))));
        let answer = requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(answer, Answer::Missing(MissingReason::Malformed));
    }

    #[tokio::test]
    async fn test_unsupported_provider() {
        let requester = requester_with(CannedProvider::new(None));
        let options = RequestOptions::new().with_provider("acme");

        let err = requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &options)
            .await
            .unwrap_err();

        match err {
            GenieError::UnsupportedProvider(id) => assert_eq!(id, "acme"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_default_provider_from_config() {
        let mut registry = ProviderRegistry::new();
        registry.register("openai", CannedProvider::new(None));
        let config = AppConfig {
            provider: "nowhere".to_string(),
            ..Default::default()
        };
        let requester = Requester::new(Arc::new(config), registry);

        let err = requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenieError::UnsupportedProvider(ref id) if id == "nowhere"));
    }

    #[tokio::test]
    async fn test_provider_lookup_is_case_insensitive() {
        let provider = CannedProvider::new(None);
        let requester = requester_with(provider.clone());
        let options = RequestOptions::new().with_provider("OpenAI");

        requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &options)
            .await
            .unwrap();
        assert_eq!(provider.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resolved_request_reaches_provider() {
        let provider = CannedProvider::new(None);
        let requester = requester_with(provider.clone());
        let options = RequestOptions::new()
            .with_model_tier("higher")
            .with_api_key("sk-call")
            .with_log("trace", "t1");

        requester
            .function_calling(&[Message::user("q")], &greeting_schema(), &options)
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "o1");
        assert_eq!(seen[0].header("Authorization"), Some("Bearer sk-call"));
        assert_eq!(seen[0].trace(), "t1");
    }

    // ── End to end through the OpenAI provider ──

    #[tokio::test]
    async fn test_greeting_scenario() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{"role": "user", "content": "hello"}],
                "response_format": {"type": "json_schema"},
                "model": "gpt-4o-mini"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "{\"greeting\":\"hi\"}"}}],
                "usage": {"total_tokens": 12},
                "model": "x-1"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Arc::new(AppConfig {
            api_key: "sk-test".to_string(),
            api_url: mock_server.uri(),
            ..Default::default()
        });
        let sink = Arc::new(MemorySink::new());
        let requester = Requester::from_config(config, sink.clone()).unwrap();

        let answer = requester
            .function_calling(&[Message::user("hello")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(
            answer.fields().cloned().map(serde_json::Value::Object),
            Some(json!({"greeting": "hi"}))
        );

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_tokens, Some(12));
        assert_eq!(records[0].model.as_deref(), Some("x-1"));
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = Arc::new(AppConfig {
            api_url: mock_server.uri(),
            ..Default::default()
        });
        let sink = Arc::new(MemorySink::new());
        let requester = Requester::from_config(config, sink.clone()).unwrap();

        let err = requester
            .function_calling(&[Message::user("hello")], &greeting_schema(), &RequestOptions::new())
            .await
            .unwrap_err();

        match err {
            GenieError::Transport(TransportError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(sink.is_empty());
    }
}
