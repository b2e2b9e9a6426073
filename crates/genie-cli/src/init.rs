//! `genie init` — write a default configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use genie_core::config::{get_config_path, save_config, AppConfig};

/// Run the init command.
pub fn run(path: Option<&Path>, force: bool) -> Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    crate::output::print_header("Setup");

    if write_default_config(&config_path, force)? {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {} (use --force to overwrite)",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "{}",
        "Next: set \"apiKey\" in the config (or GENIE_API_KEY) and run `genie status`.".dimmed()
    );
    println!();

    Ok(())
}

/// Write defaults to `path`. Returns `false` if the file existed and `force` is off.
fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&AppConfig::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(write_default_config(&path, false).unwrap());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["provider"], "openai");
        assert_eq!(raw["defaultModel"], "gpt-4o-mini");
    }

    #[test]
    fn test_does_not_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"apiKey":"keep-me"}"#).unwrap();

        assert!(!write_default_config(&path, false).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("keep-me"));

        assert!(write_default_config(&path, true).unwrap());
        assert!(!std::fs::read_to_string(&path).unwrap().contains("keep-me"));
    }
}
