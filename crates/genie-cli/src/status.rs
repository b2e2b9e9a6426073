//! `genie status` — show configuration and provider status.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use genie_core::config::{get_config_path, load_config};
use genie_providers::{ProviderKind, ProviderRegistry, TracingSink};

use crate::output::{mask_key, print_field, print_header};

/// Run the status command.
pub fn run(path: Option<&Path>) -> Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    let config = Arc::new(load_config(Some(&config_path)));

    print_header("Status");

    print_field(
        "Config",
        format!(
            "{} {}",
            config_path.display(),
            if config_path.exists() {
                "✓".green().to_string()
            } else {
                "(not found, using defaults)".red().to_string()
            }
        ),
    );
    print_field("API URL", &config.api_url);
    print_field(
        "API key",
        if config.is_configured() {
            format!("{} ({})", "✓".green(), mask_key(&config.api_key))
        } else {
            format!("{}", "· not set".dimmed())
        },
    );
    print_field("Timeout", format!("{}s", config.timeout_secs));
    print_field("Default model", config.lower_tier_model());

    println!();
    println!("  {}", "Tiers:".bold());
    let mut tiers: Vec<_> = config.tiers.iter().collect();
    tiers.sort();
    for (tier, model) in tiers {
        println!("    {:<16} {}", tier, model);
    }

    println!();
    println!("  {}", "Providers:".bold());
    let registry = ProviderRegistry::with_defaults(config.clone(), Arc::new(TracingSink))
        .context("failed to build provider registry")?;
    let default_provider = config.provider.to_lowercase();
    for kind in ProviderKind::ALL {
        let marker = if kind.name() == default_provider {
            "(default)".green().to_string()
        } else {
            String::new()
        };
        println!("    {:<16} {} {}", kind.display_name(), kind.name().dimmed(), marker);
    }
    if !registry.has(&config.provider) {
        println!(
            "    {} default provider '{}' is not supported",
            "✗".red(),
            config.provider
        );
    }
    println!();

    Ok(())
}
