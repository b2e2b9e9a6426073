//! Config resolver — turns per-call options plus [`AppConfig`] into the
//! concrete model, provider, credentials and headers for one request.
//!
//! Pure and total: no I/O, and every input combination resolves to something.

use genie_core::{AppConfig, LogContext, RequestOptions};

/// Everything a provider needs for one call. Built fresh per call.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRequest {
    pub model: String,
    pub provider: String,
    pub api_key: String,
    /// Headers to send, in order. Never contains an empty value.
    pub headers: Vec<(String, String)>,
    pub log: LogContext,
}

impl ResolvedRequest {
    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The caller's trace identifier, or `""` when none was given.
    pub fn trace(&self) -> &str {
        self.log.get("trace").and_then(|v| v.as_str()).unwrap_or("")
    }
}

/// Pick the model: explicit model, then the tier's model, then the lower tier.
pub fn resolve_model(options: &RequestOptions, config: &AppConfig) -> String {
    options
        .model
        .as_deref()
        .or_else(|| {
            options
                .model_tier
                .as_deref()
                .and_then(|tier| config.tier_to_model(tier))
        })
        .unwrap_or_else(|| config.lower_tier_model())
        .to_string()
}

/// Per-call API key wins over the configured one.
pub fn resolve_api_key(options: &RequestOptions, config: &AppConfig) -> String {
    options
        .api_key
        .clone()
        .unwrap_or_else(|| config.api_key.clone())
}

/// Per-call provider wins over the configured default.
pub fn resolve_provider(options: &RequestOptions, config: &AppConfig) -> String {
    options
        .provider
        .clone()
        .unwrap_or_else(|| config.provider.clone())
}

/// Resolve everything for one call.
pub fn resolve(options: &RequestOptions, config: &AppConfig) -> ResolvedRequest {
    let api_key = resolve_api_key(options, config);

    let mut headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), bearer(&api_key)),
    ];
    let mut extra: Vec<_> = config
        .extra_headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    extra.sort();
    headers.extend(extra);
    headers.retain(|(_, value)| !value.is_empty());

    ResolvedRequest {
        model: resolve_model(options, config),
        provider: resolve_provider(options, config),
        api_key,
        headers,
        log: options.log.clone(),
    }
}

/// `Bearer <key>`, or an empty value (dropped later) when there is no key.
fn bearer(api_key: &str) -> String {
    if api_key.is_empty() {
        String::new()
    } else {
        format!("Bearer {}", api_key)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            api_key: "sk-config".to_string(),
            ..Default::default()
        }
    }

    // ── model ──

    #[test]
    fn test_no_model_no_tier_uses_default() {
        let config = config();
        let model = resolve_model(&RequestOptions::new(), &config);
        assert_eq!(model, config.lower_tier_model());
    }

    #[test]
    fn test_default_follows_config() {
        let mut config = config();
        config.default_model = "tiny-1".to_string();
        assert_eq!(resolve_model(&RequestOptions::new(), &config), "tiny-1");
    }

    #[test]
    fn test_tier_maps_to_model() {
        let options = RequestOptions::new().with_model_tier("higher");
        assert_eq!(resolve_model(&options, &config()), "o1");
    }

    #[test]
    fn test_model_wins_over_tier() {
        let options = RequestOptions::new()
            .with_model("pinned-model")
            .with_model_tier("higher");
        assert_eq!(resolve_model(&options, &config()), "pinned-model");
    }

    #[test]
    fn test_mixed_case_tier_from_json_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{"tiers":{"Higher":"large-1","lower":"small-1"},"defaultModel":"small-1"}"#,
        )
        .unwrap();
        let options = RequestOptions::new().with_model_tier("Higher");
        assert_eq!(resolve_model(&options, &config), "large-1");
    }

    #[test]
    fn test_unknown_tier_falls_back_to_default() {
        let options = RequestOptions::new().with_model_tier("galactic");
        assert_eq!(resolve_model(&options, &config()), "gpt-4o-mini");
    }

    // ── api key / provider ──

    #[test]
    fn test_api_key_override() {
        let options = RequestOptions::new().with_api_key("sk-call");
        assert_eq!(resolve_api_key(&options, &config()), "sk-call");
        assert_eq!(resolve_api_key(&RequestOptions::new(), &config()), "sk-config");
    }

    #[test]
    fn test_provider_override() {
        let options = RequestOptions::new().with_provider("Acme");
        assert_eq!(resolve_provider(&options, &config()), "Acme");
        assert_eq!(resolve_provider(&RequestOptions::new(), &config()), "openai");
    }

    // ── headers ──

    #[test]
    fn test_headers_with_key() {
        let resolved = resolve(&RequestOptions::new(), &config());
        assert_eq!(resolved.header("content-type"), Some("application/json"));
        assert_eq!(resolved.header("Authorization"), Some("Bearer sk-config"));
    }

    #[test]
    fn test_empty_key_omits_authorization() {
        let resolved = resolve(&RequestOptions::new(), &AppConfig::default());
        assert_eq!(resolved.header("Authorization"), None);
        assert_eq!(resolved.headers.len(), 1);
    }

    #[test]
    fn test_extra_headers_skip_empty_values() {
        let mut config = config();
        config
            .extra_headers
            .insert("X-Org".to_string(), "acme".to_string());
        config
            .extra_headers
            .insert("X-Blank".to_string(), String::new());

        let resolved = resolve(&RequestOptions::new(), &config);
        assert_eq!(resolved.header("x-org"), Some("acme"));
        assert_eq!(resolved.header("X-Blank"), None);
        assert!(resolved.headers.iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_resolve_carries_log_and_trace() {
        let options = RequestOptions::new().with_log("trace", "score/42");
        let resolved = resolve(&options, &config());
        assert_eq!(resolved.trace(), "score/42");
        assert_eq!(resolve(&RequestOptions::new(), &config()).trace(), "");
    }
}
