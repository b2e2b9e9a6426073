//! `genie reviewers` — recommend reviewer roles for a text.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use genie_core::config::load_config;
use genie_core::RequestOptions;
use genie_providers::{Requester, TracingSink};
use genie_scoring::{RecommendedReviews, ReviewerRecommendation};

use crate::output::print_header;

#[derive(Args, Debug)]
pub struct ReviewersArgs {
    /// Text to be scored
    #[arg(short, long)]
    pub text: String,

    /// Criteria the text will be scored against
    #[arg(short, long)]
    pub criteria: String,

    /// Exact model to use (overrides --tier)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model tier, e.g. "lower" or "higher"
    #[arg(long)]
    pub tier: Option<String>,

    /// Provider identifier (defaults to the configured provider)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub logs: bool,
}

impl ReviewersArgs {
    fn request_options(&self) -> RequestOptions {
        let mut options = RequestOptions::new().with_log("trace", "cli/reviewers");
        if let Some(model) = &self.model {
            options = options.with_model(model);
        }
        if let Some(tier) = &self.tier {
            options = options.with_model_tier(tier);
        }
        if let Some(provider) = &self.provider {
            options = options.with_provider(provider);
        }
        options
    }
}

/// Run the reviewers command.
pub async fn run(config_path: Option<&Path>, args: ReviewersArgs) -> Result<()> {
    let config = Arc::new(load_config(config_path));
    let requester = Requester::from_config(config, Arc::new(TracingSink))
        .context("failed to set up providers")?;

    info!(criteria = %args.criteria, "requesting reviewer recommendation");
    let result = RecommendedReviews::call(
        &requester,
        args.text.as_str(),
        args.criteria.as_str(),
        args.request_options(),
    )
    .await
    .context("reviewer recommendation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_recommendation(result.as_ref());
    }
    Ok(())
}

fn print_recommendation(result: Option<&ReviewerRecommendation>) {
    print_header("Reviewers");

    let Some(recommendation) = result else {
        println!("  {}", "(no structured answer from the model)".dimmed());
        println!();
        return;
    };

    let reviewers = recommendation.reviewers();
    if reviewers.is_empty() {
        println!("  {}", "(model could not name any reviewers)".dimmed());
    }
    for (i, reviewer) in reviewers.iter().enumerate() {
        println!("  {}. {}", i + 1, reviewer.bold());
    }
    if let Some(reasoning) = &recommendation.reasoning {
        println!();
        println!("  {}", reasoning.dimmed());
    }
    println!();
}
