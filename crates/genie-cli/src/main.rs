//! Genie CLI — entry point.
//!
//! # Commands
//!
//! - `genie init [--force]` — write a default config file
//! - `genie status` — show configuration and provider status
//! - `genie reviewers --text T --criteria C` — recommend reviewer roles

mod init;
mod output;
mod reviewers;
mod status;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Genie — structured answers from LLM providers
#[derive(Parser)]
#[command(name = "genie", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.genie/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Recommend three reviewer roles for scoring a text
    Reviewers(reviewers::ReviewersArgs),
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => {
            init_logging(false);
            init::run(config_path, force)
        }
        Commands::Status => {
            init_logging(false);
            status::run(config_path)
        }
        Commands::Reviewers(args) => {
            init_logging(args.logs);
            reviewers::run(config_path, args).await
        }
    }
}

/// Initialize tracing/logging. Warnings are always shown.
fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_target(false)
        .compact()
        .init();
}

fn log_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    if verbose {
        EnvFilter::new("genie=debug,info")
    } else {
        EnvFilter::new("warn")
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
