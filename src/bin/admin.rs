//! CLI administration tool for quicklink.
//!
//! Inspects the store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the short code a URL maps to (no database needed)
//! cargo run --bin admin -- code https://example.com
//!
//! # List the most recent links
//! cargo run --bin admin -- recent --limit 20
//!
//! # List links created by one requester
//! cargo run --bin admin -- requester 203.0.113.7
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for every command except `code`): PostgreSQL connection string
//! - `MAX_URL_LENGTH` (optional, default 2048): used by `code` to validate input

use quicklink::domain::entities::UrlRecord;
use quicklink::domain::repositories::UrlRepository;
use quicklink::infrastructure::persistence::PgUrlRepository;
use quicklink::utils::code_generator::generate_code;
use quicklink::utils::url_validator::validate_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing quicklink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code a URL maps to
    Code {
        /// Destination URL
        url: String,
    },

    /// List the most recently created links
    Recent {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,
    },

    /// List links created by a requester
    Requester {
        /// Requester identifier (client IP for links created over HTTP)
        requester: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Code { url } => print_code(&url)?,
        Commands::Recent { limit } => {
            let records = connect_repository()
                .await?
                .list_recent(limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
            print_records("🕒 Recent Links", &records);
        }
        Commands::Requester { requester } => {
            let records = connect_repository()
                .await?
                .list_by_requester(&requester)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
            print_records(&format!("👤 Links from {requester}"), &records);
        }
        Commands::Stats => handle_stats(&connect_repository().await?).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn connect_repository() -> Result<PgUrlRepository> {
    Ok(PgUrlRepository::new(Arc::new(connect().await?)))
}

/// Validates a URL the way the service does and prints its code.
fn print_code(url: &str) -> Result<()> {
    let max_length = std::env::var("MAX_URL_LENGTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2048);

    let accepted = validate_url(url, max_length).context("URL would be rejected")?;

    println!("  URL:  {}", accepted.cyan());
    println!("  Code: {}", generate_code(&accepted).bright_yellow().bold());

    Ok(())
}

/// Prints records as a table.
///
/// # Output Format
///
/// ```text
/// 🕒 Recent Links
///
///   Code      Clicks  Created           URL
///   ──────────────────────────────────────────────────────────────
///   c984aed0  12      2025-01-15 10:30  https://example.com
/// ```
fn print_records(title: &str, records: &[UrlRecord]) {
    println!("{}", title.bright_blue().bold());
    println!();

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        return;
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in records {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            record.code.bright_yellow(),
            record.clicks,
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.url.cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();
}

/// Displays link and click totals.
async fn handle_stats(repo: &PgUrlRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let clicks_count = repo
        .total_clicks()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count clicks: {}", e))?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
