//! Provider registry — maps a provider identifier to its implementation.
//!
//! The built-in providers form the closed [`ProviderKind`] set. The registry
//! itself is a plain map so an embedding application can register extra
//! implementations at startup; after that it is only read.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use genie_core::AppConfig;
use tracing::debug;

use crate::error::{GenieError, Result};
use crate::observability::ObservabilitySink;
use crate::openai::OpenAiProvider;
use crate::traits::ProviderCapability;

// ─────────────────────────────────────────────
// ProviderKind — the built-in providers
// ─────────────────────────────────────────────

/// Providers that ship with Genie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
}

impl ProviderKind {
    pub const ALL: &'static [ProviderKind] = &[ProviderKind::OpenAi];

    /// Registry key (lowercase).
    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Human-readable name for logs.
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = GenieError;

    /// Case-insensitive; unknown ids carry the original spelling.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.to_lowercase();
        ProviderKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| GenieError::UnsupportedProvider(s.to_string()))
    }
}

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Provider implementations keyed by lowercase identifier.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ProviderCapability>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider, sharing `config` and `sink`.
    pub fn with_defaults(
        config: Arc<AppConfig>,
        sink: Arc<dyn ObservabilitySink>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            let provider: Arc<dyn ProviderCapability> = match kind {
                ProviderKind::OpenAi => {
                    Arc::new(OpenAiProvider::new(config.clone(), sink.clone())?)
                }
            };
            registry.register(kind.name(), provider);
        }
        Ok(registry)
    }

    /// Register a provider. Overwrites any previous provider with the same id.
    pub fn register(&mut self, id: &str, provider: Arc<dyn ProviderCapability>) {
        debug!(provider = id, "registered provider");
        self.providers.insert(id.to_lowercase(), provider);
    }

    /// Look up a provider by id (case-insensitive).
    pub fn get(&self, id: &str) -> Result<Arc<dyn ProviderCapability>> {
        self.providers
            .get(&id.to_lowercase())
            .cloned()
            .ok_or_else(|| GenieError::UnsupportedProvider(id.to_string()))
    }

    /// Check if a provider is registered.
    pub fn has(&self, id: &str) -> bool {
        self.providers.contains_key(&id.to_lowercase())
    }

    /// Ids of all registered providers, sorted for determinism.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
