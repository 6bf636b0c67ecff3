//! CLI administration tool for multitest-shortener.
//!
//! Manages URL mappings and checks the database without going through the
//! HTTP surface, which only ever reads mappings.
//!
//! # Usage
//!
//! ```bash
//! # Register a mapping with an explicit or generated code
//! cargo run --bin admin -- mapping register https://www.digitalocean.com --code 123456789012
//! cargo run --bin admin -- mapping register https://www.rust-lang.org
//!
//! # Look a mapping up
//! cargo run --bin admin -- mapping expand 123456789012
//! cargo run --bin admin -- mapping show 123456789012 --json
//!
//! # Remove a mapping
//! cargo run --bin admin -- mapping clear 123456789012
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`multitest_shortener::config`].

use multitest_shortener::config::{self, mask_connection_string};
use multitest_shortener::domain::entities::ShortCode;
use multitest_shortener::domain::repositories::UrlMappingRepository;
use multitest_shortener::infrastructure::database::connect_repository;
use multitest_shortener::utils::code_generator::generate_code;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing multitest-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage URL mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Mapping management subcommands.
#[derive(Subcommand)]
enum MappingAction {
    /// Register a long URL under a short code
    Register {
        /// The URL to redirect to
        long_url: String,

        /// Short code (12 lowercase hex characters, generated if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Print the long URL for a short code
    Expand {
        /// Short code to resolve
        code: String,
    },

    /// Show the stored mapping row
    Show {
        /// Short code to look up
        code: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a mapping
    Clear {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let repo = connect_repository(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, repo).await?,
        Commands::Db { action } => handle_db_action(action, repo, &config.database_url).await?,
    }

    Ok(())
}

/// Dispatches mapping management commands.
async fn handle_mapping_action(
    action: MappingAction,
    repo: Arc<dyn UrlMappingRepository>,
) -> Result<()> {
    match action {
        MappingAction::Register { long_url, code } => {
            register_mapping(repo, long_url, code).await
        }
        MappingAction::Expand { code } => expand_mapping(repo, code).await,
        MappingAction::Show { code, json } => show_mapping(repo, code, json).await,
        MappingAction::Clear { code, yes } => clear_mapping(repo, code, yes).await,
    }
}

/// Registers a mapping after validating both halves.
///
/// The URL must parse as an absolute URL; the code must be a valid short code.
/// A fresh code is generated when none is given.
async fn register_mapping(
    repo: Arc<dyn UrlMappingRepository>,
    long_url: String,
    code: Option<String>,
) -> Result<()> {
    url::Url::parse(&long_url).with_context(|| format!("Invalid URL '{}'", long_url))?;

    let code = match code {
        Some(raw) => ShortCode::parse(&raw).with_context(|| format!("Invalid code '{}'", raw))?,
        None => {
            let generated = generate_code()
                .map_err(|e| anyhow::anyhow!("Failed to generate short code: {}", e))?;
            println!("{}", "✨ Generated new code".green());
            generated
        }
    };

    repo.register(&long_url, code.as_str())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register mapping: {}", e))?;

    println!("{}", "✅ Mapping registered".green().bold());
    println!("  Code: {}", code.as_str().bright_yellow().bold());
    println!("  URL:  {}", long_url.cyan());
    println!();
    println!("{}", "Try it:".bright_white());
    println!(
        "  curl -i http://localhost:8080/s/{}",
        code.as_str().bright_yellow()
    );

    Ok(())
}

async fn expand_mapping(repo: Arc<dyn UrlMappingRepository>, code: String) -> Result<()> {
    let long_url = repo
        .expand(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to expand '{}': {}", code, e))?;

    println!("{}", long_url);

    Ok(())
}

/// Prints a stored mapping, either as a table or as pretty JSON.
async fn show_mapping(
    repo: Arc<dyn UrlMappingRepository>,
    code: String,
    json: bool,
) -> Result<()> {
    let mapping = repo
        .find(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No mapping for '{}'", code))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&mapping)?);
        return Ok(());
    }

    println!("{}", "🔗 URL Mapping".bright_blue().bold());
    println!();
    println!("  ID:      {}", mapping.id.to_string().bright_black());
    println!("  Code:    {}", mapping.short_code.bright_yellow());
    println!("  URL:     {}", mapping.long_url.cyan());
    println!(
        "  Created: {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!(
        "  Updated: {}",
        mapping
            .updated_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a mapping with confirmation prompt (default: No).
async fn clear_mapping(
    repo: Arc<dyn UrlMappingRepository>,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete mapping '{}'?", code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let removed = repo
        .clear(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear mapping: {}", e))?;

    if removed {
        println!("{}", "✅ Mapping cleared".green().bold());
    } else {
        println!("{}", "⚠️  No mapping with that code".yellow());
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(
    action: DbAction,
    repo: Arc<dyn UrlMappingRepository>,
    database_url: &str,
) -> Result<()> {
    match action {
        DbAction::Check => {
            println!(
                "{} {}",
                "🔍 Checking".bright_blue(),
                mask_connection_string(database_url).bright_white()
            );

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Ping failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}
