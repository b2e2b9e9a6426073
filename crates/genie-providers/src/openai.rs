//! OpenAI-compatible structured-output provider.
//!
//! Talks to any `/chat/completions` endpoint that understands
//! `response_format: {type: "json_schema"}`. One POST per call, no retries.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use genie_core::utils::truncate_string;
use genie_core::{AppConfig, FunctionSchema, Message};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{Result, TransportError};
use crate::observability::{LlmCallRecord, ObservabilitySink};
use crate::resolver::ResolvedRequest;
use crate::traits::ProviderCapability;

// ─────────────────────────────────────────────
// Wire payload
// ─────────────────────────────────────────────

/// Request body for a structured-output chat completion.
#[derive(Debug, Serialize)]
struct StructuredCompletionRequest<'a> {
    messages: &'a [Message],
    response_format: ResponseFormat<'a>,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: &'a FunctionSchema,
}

// ─────────────────────────────────────────────
// OpenAiProvider
// ─────────────────────────────────────────────

/// Structured-output client for OpenAI-compatible APIs.
pub struct OpenAiProvider {
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    sink: Arc<dyn ObservabilitySink>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenAiProvider {
    pub const DISPLAY_NAME: &'static str = "OpenAI";

    /// Create a provider using `config.api_url` and `config.timeout_secs`.
    pub fn new(config: Arc<AppConfig>, sink: Arc<dyn ObservabilitySink>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TransportError::from)?;

        Ok(OpenAiProvider {
            client,
            api_base: config.api_url.clone(),
            sink,
        })
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// `<caller trace>/<this component>`.
    fn trace(request: &ResolvedRequest) -> String {
        format!("{}/{}", request.trace(), std::any::type_name::<Self>())
    }

    /// Convert resolved headers, skipping any that are not valid HTTP.
    fn header_map(headers: &[(String, String)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            if value.is_empty() {
                continue;
            }
            if let (Ok(name), Ok(val)) = (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                map.insert(name, val);
            } else {
                warn!("Invalid header: {}", key);
            }
        }
        map
    }
}

#[async_trait]
impl ProviderCapability for OpenAiProvider {
    async fn function_calling(
        &self,
        messages: &[Message],
        function: &FunctionSchema,
        request: &ResolvedRequest,
    ) -> Result<Option<serde_json::Value>> {
        let payload = StructuredCompletionRequest {
            messages,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: function,
            },
            model: &request.model,
        };

        debug!(
            provider = Self::DISPLAY_NAME,
            model = %request.model,
            function = %function.name,
            messages = messages.len(),
            "Calling LLM"
        );

        let url = self.completions_url();
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .headers(Self::header_map(&request.headers))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(provider = Self::DISPLAY_NAME, error = %e, "HTTP request failed");
                TransportError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::from)?;

        if !status.is_success() {
            error!(
                provider = Self::DISPLAY_NAME,
                status = %status,
                body = %truncate_string(&body, 500),
                "API error"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        if body.is_empty() {
            debug!(provider = Self::DISPLAY_NAME, "Empty response body");
            return Ok(None);
        }

        let parsed: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(source) => {
                error!(
                    provider = Self::DISPLAY_NAME,
                    error = %source,
                    "Failed to parse LLM response"
                );
                return Err(TransportError::InvalidJson { body, source }.into());
            }
        };

        let record = LlmCallRecord::from_response(
            &request.log,
            Self::trace(request),
            start.elapsed().as_secs_f64(),
            &parsed,
        );
        self.sink.record(&record);

        Ok(Some(parsed))
    }

    fn name(&self) -> &str {
        Self::DISPLAY_NAME
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
