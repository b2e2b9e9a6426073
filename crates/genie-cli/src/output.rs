//! Shared CLI output helpers.

use colored::Colorize;

/// Print a `label: value` status line.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<18} {}", format!("{label}:").bold(), value);
}

/// Mask an API key for display, keeping only its first few characters.
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "not set".to_string();
    }
    let prefix: String = key.chars().take(4).collect();
    format!("{prefix}…")
}

/// Print a block headed by the Genie banner.
pub fn print_header(title: &str) {
    println!();
    println!("{}", format!("Genie {title}").cyan().bold());
    println!();
}
