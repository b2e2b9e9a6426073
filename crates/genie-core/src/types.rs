//! Core request types for Genie.
//!
//! These model the inputs of a structured-output ("function calling") request
//! in the OpenAI chat completions shape, which every provider receives.

use serde::{Deserialize, Serialize};

/// Arbitrary caller metadata forwarded to the observability sink.
///
/// The `trace` key, when it holds a string, is the caller's trace identifier.
pub type LogContext = serde_json::Map<String, serde_json::Value>;

/// Field name → value mapping returned to the caller after sanitization.
pub type NormalizedResult = serde_json::Map<String, serde_json::Value>;

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// Who authored a message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message. A request carries them in conversation order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

// ─────────────────────────────────────────────
// Function schema
// ─────────────────────────────────────────────

/// The contract the provider must fill: a named JSON schema describing the
/// expected output fields.
///
/// Serialized as-is into `response_format.json_schema`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FunctionSchema {
    pub name: String,
    pub description: String,
    pub schema: serde_json::Value,
    /// Ask the provider to enforce the schema strictly (OpenAI `strict`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl FunctionSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        FunctionSchema {
            name: name.into(),
            description: description.into(),
            schema,
            strict: None,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }
}

// ─────────────────────────────────────────────
// Request options
// ─────────────────────────────────────────────

/// Per-call overrides. Anything left unset is resolved from [`crate::AppConfig`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestOptions {
    /// Exact model identifier; wins over `model_tier`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Tier hint such as `"lower"` or `"higher"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_tier: Option<String>,
    /// Provider identifier (case-insensitive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Contextual metadata copied into the observability record.
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub log: LogContext,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_model_tier(mut self, tier: impl Into<String>) -> Self {
        self.model_tier = Some(tier.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Add one entry to the log context.
    pub fn with_log(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.log.insert(key.into(), value.into());
        self
    }

    /// The caller's trace identifier, if one was given.
    pub fn trace(&self) -> Option<&str> {
        self.log.get("trace").and_then(|v| v.as_str())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
