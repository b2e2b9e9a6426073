//! Config loader — reads `~/.genie/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `AppConfig::default()`)
//! 2. JSON file at `~/.genie/config.json`
//! 3. Environment variables `GENIE_<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::AppConfig;

const ENV_PREFIX: &str = "GENIE_";
const TIER_PREFIX: &str = "GENIE_TIERS__";

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `AppConfig::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> AppConfig {
    let vars = std::env::vars_os()
        .filter_map(|(key, val)| Some((key.into_string().ok()?, val.into_string().ok()?)));
    apply_env_overrides(read_config_file(path), vars)
}

fn read_config_file(path: &Path) -> AppConfig {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return AppConfig::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return AppConfig::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            AppConfig::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &AppConfig, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `GENIE_PROVIDER` → `provider`
/// - `GENIE_API_KEY` → `api_key`
/// - `GENIE_API_URL` → `api_url`
/// - `GENIE_DEFAULT_MODEL` → `default_model`
/// - `GENIE_TIMEOUT_SECS` → `timeout_secs`
/// - `GENIE_TIERS__<TIER>` → `tiers.<tier>` (tier name lowercased)
fn apply_env_overrides<I>(mut config: AppConfig, vars: I) -> AppConfig
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, val) in vars {
        if let Some(tier) = key.strip_prefix(TIER_PREFIX) {
            config.tiers.insert(tier.to_lowercase(), val);
            continue;
        }

        let Some(field) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match field {
            "PROVIDER" => config.provider = val,
            "API_KEY" => config.api_key = val,
            "API_URL" => config.api_url = val,
            "DEFAULT_MODEL" => config.default_model = val,
            "TIMEOUT_SECS" => match val.parse::<u64>() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid GENIE_TIMEOUT_SECS={}", val),
            },
            _ => {}
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
