//! Configuration schema.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.
//! We use `#[serde(rename_all = "camelCase")]` to handle the conversion.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tier used when a request names neither a model nor a known tier.
pub const LOWER_TIER: &str = "lower";

// ─────────────────────────────────────────────
// AppConfig
// ─────────────────────────────────────────────

/// Process-wide configuration — loaded from `~/.genie/config.json` + env vars.
///
/// Owned by the embedding application and handed to the dispatcher behind an
/// `Arc`. Nothing in the library mutates it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Provider identifier used when a request does not name one.
    pub provider: String,
    /// API key for Bearer authentication.
    pub api_key: String,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    pub api_url: String,
    /// The lower-tier model, used when nothing else applies.
    pub default_model: String,
    /// Tier name (lowercase) → model identifier.
    pub tiers: HashMap<String, String>,
    /// Extra HTTP headers sent with each request. Empty values are not sent.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extra_headers: HashMap<String, String>,
    /// HTTP client timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let tiers = [
            (LOWER_TIER, "gpt-4o-mini"),
            ("middle", "gpt-4o"),
            ("higher", "o1"),
        ]
        .into_iter()
        .map(|(tier, model)| (tier.to_string(), model.to_string()))
        .collect();

        Self {
            provider: "openai".to_string(),
            api_key: String::new(),
            api_url: "https://api.openai.com/v1".to_string(),
            default_model: "gpt-4o-mini".to_string(),
            tiers,
            extra_headers: HashMap::new(),
            timeout_secs: 120,
        }
    }
}

impl AppConfig {
    /// Model configured for `tier`. Both the requested tier and the configured
    /// tier names are matched case-insensitively.
    pub fn tier_to_model(&self, tier: &str) -> Option<&str> {
        self.tiers
            .iter()
            .find(|(name, model)| name.eq_ignore_ascii_case(tier) && !model.is_empty())
            .map(|(_, model)| model.as_str())
    }

    /// The fallback model.
    pub fn lower_tier_model(&self) -> &str {
        &self.default_model
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
