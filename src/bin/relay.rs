//! Command-line client for the relay.
//!
//! Talks to the upstream directly with the same services the HTTP server
//! uses, so no running server is needed.
//!
//! # Usage
//!
//! ```bash
//! # Shorten one or more URLs (several run concurrently)
//! cargo run --bin relay -- short example.com https://rust-lang.org
//!
//! # Show upstream metadata for an alias
//! cargo run --bin relay -- read AbCd
//!
//! # Check whether a one-time link was opened
//! cargo run --bin relay -- verify https://ulvis.net/AbCd
//! ```
//!
//! # Environment Variables
//!
//! Reads the same `UPSTREAM_*`, `MAX_ALIAS_RETRIES`, `ALIAS_LENGTH` and
//! `SHORT_URL_BASE` variables as the server. A `.env` file is honoured.

use link_relay::config;
use link_relay::domain::entities::{LinkStatus, ShortenOutcome};
use link_relay::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for shortening and checking links.
#[derive(Parser)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten one or more URLs
    Short {
        /// Target URLs; a missing scheme defaults to https
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Show upstream metadata for an alias
    Read {
        /// Alias of the short link
        alias: String,
    },

    /// Check whether a one-time link was opened
    Verify {
        /// Short link or bare alias
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let state = AppState::from_config(&config).context("Failed to build upstream client")?;

    match cli.command {
        Commands::Short { urls } => shorten(&state, urls).await,
        Commands::Read { alias } => read(&state, &alias).await,
        Commands::Verify { link } => verify(&state, &link).await,
    }
}

/// Shortens the given URLs and prints one line per URL in input order.
///
/// Exits with an error if any URL failed.
async fn shorten(state: &AppState, urls: Vec<String>) -> Result<()> {
    let outcomes = if urls.len() == 1 {
        vec![state.link_service.shorten(&urls[0]).await]
    } else {
        state.link_service.create_links_batch(urls).await.results
    };

    println!("{}", "🔗 Short links".bright_blue().bold());
    println!();

    for outcome in &outcomes {
        print_outcome(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.success).count();

    println!();
    println!(
        "  Created: {}  Failed: {}",
        (outcomes.len() - failed).to_string().green().bold(),
        failed.to_string().red().bold()
    );
    println!();

    if failed > 0 {
        anyhow::bail!("{failed} of {} URLs could not be shortened", outcomes.len());
    }

    Ok(())
}

fn print_outcome(outcome: &ShortenOutcome) {
    match (&outcome.short_url, &outcome.error) {
        (Some(short_url), _) if outcome.success => {
            println!(
                "  {} {} {} {}",
                "✅".green(),
                short_url.bright_yellow().bold(),
                "←".bright_black(),
                outcome.original_url.cyan()
            );
        }
        (_, error) => {
            println!(
                "  {} {} {}",
                "❌".red(),
                outcome.original_url.cyan(),
                error.as_deref().unwrap_or("unknown error").red()
            );
            if let Some(preview) = &outcome.raw_preview {
                println!("     {}", preview.bright_black());
            }
        }
    }
}

/// Prints the upstream metadata for an alias as pretty JSON.
async fn read(state: &AppState, alias: &str) -> Result<()> {
    let value = state
        .lookup_service
        .read(alias)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", alias, e))?;

    println!("{}", format!("📋 Alias {alias}").bright_blue().bold());
    println!();
    println!("{}", serde_json::to_string_pretty(&value)?);
    println!();

    Ok(())
}

/// Prints a one-time link verification report.
async fn verify(state: &AppState, link: &str) -> Result<()> {
    let report = state
        .lookup_service
        .verify(link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to verify '{}': {}", link, e))?;

    let status = match report.link_status {
        LinkStatus::Fresh => "FRESH".green().bold(),
        LinkStatus::Used => "USED".red().bold(),
    };

    println!("{}", "🔍 Link verification".bright_blue().bold());
    println!();
    println!("  Alias:         {}", report.alias.cyan());
    println!("  Status:        {}", status);
    println!("  Verdict:       {}", report.verdict);
    println!(
        "  Hits:          {}",
        report.evidence.hits.to_string().bright_white()
    );
    println!(
        "  Last activity: {}",
        report.evidence.last_activity_ist.bright_black()
    );
    println!();

    Ok(())
}
