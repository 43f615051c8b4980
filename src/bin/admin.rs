//! CLI administration tool for the shortener.
//!
//! Works directly against the PostgreSQL store, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Load the built-in demo links
//! cargo run --bin admin -- seed
//!
//! # Load links from a file, one per line
//! cargo run --bin admin -- seed --file links.txt
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection and apply migrations
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`.

use shortener::application::services::LinkService;
use shortener::application::services::link_service::TOP_ENTRIES;
use shortener::config;
use shortener::error::AppError;
use shortener::infrastructure::persistence::PgShortUrlRepository;
use shortener::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Links loaded by `seed` when no file is given.
const DEMO_URLS: &[&str] = &[
    "hh.ru",
    "www.google.com",
    "money.yandex.ru",
    "https://www.google.ru/search?q=%D0%BC%D1%8B%D1%88%D0%B8+%D0%B8%D1%85+%D1%81%D1%82%D0%BE%D0%B8%D0%BC%D0%BE%D1%81%D1%82%D1%8C&ie=UTF-8",
    "http: // kaktam.ru /",
    "https://www.youtube.com/watch?v=lO9d-AJai8Q",
    "https://www.reddit.com/r/todayilearned/",
    "http://retailengineering.ru/normative-documentation/",
    "http://www.safestyle-windows.co.uk/secret-door/?dalek",
    "https://rutracker.org/forum/index.php",
    "https://www.duolingo.com/",
    "https://thepiratebay.org/",
    "https://en.wikipedia.org/wiki/Main_Page",
    "http://cs50.tv/2017/fall/",
    "http://waitbutwhy.com/",
    "https://github.com/serbernar/python_beginners_faq",
    "http://www.quickanddirtytips.com/",
    "http://neuralnet.info/",
    "http://www.pythonchallenge.com/pc/return/balloons.html",
    "http://cursivecole.fr/dico1.php",
    "http://flibusta.is/",
];

/// CLI tool for managing the shortener.
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
    /// Create short links in bulk
    Seed {
        /// File with one URL per line; blank lines and `#` comments are skipped
        #[arg(short, long)]
        file: Option<PathBuf>,
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
    /// Check database connection and apply pending migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Seed { file } => handle_seed(file.as_deref(), &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Reads URLs from `path`, skipping blank lines and `#` comments.
fn read_urls(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(parse_url_lines(&content))
}

fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Creates short links for every URL, reporting each one.
///
/// # Output Format
///
/// ```text
/// Seeding short links
///
///   +  1      http://hh.ru
///   =  1      http://hh.ru
///   x  http: // kaktam.ru /  URL must not contain whitespace
///
///   Created: 1  Existing: 1  Skipped: 1
/// ```
async fn handle_seed(file: Option<&Path>, pool: &PgPool) -> Result<()> {
    let urls = match file {
        Some(path) => read_urls(path)?,
        None => DEMO_URLS.iter().map(|u| u.to_string()).collect(),
    };

    let service = LinkService::new(Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone()))));

    println!("{}", "Seeding short links".bright_blue().bold());
    println!();

    let (mut created, mut existing, mut skipped) = (0usize, 0usize, 0usize);

    for url in &urls {
        match service.seed(url).await {
            Ok((entry, true)) => {
                created += 1;
                println!("  {}  {:<6} {}", "+".green(), entry.code().cyan(), entry.long_url);
            }
            Ok((entry, false)) => {
                existing += 1;
                println!(
                    "  {}  {:<6} {}",
                    "=".bright_black(),
                    entry.code().cyan(),
                    entry.long_url.bright_black()
                );
            }
            Err(AppError::Validation { message, .. }) => {
                skipped += 1;
                println!("  {}  {}  {}", "x".red(), url.yellow(), message.red());
            }
            Err(e) => return Err(anyhow::anyhow!("Failed to store {url}: {e}")),
        }
    }

    println!();
    println!(
        "  Created: {}  Existing: {}  Skipped: {}",
        created.to_string().bright_green().bold(),
        existing.to_string().bright_white().bold(),
        skipped.to_string().bright_red().bold()
    );
    println!();

    Ok(())
}

/// Displays link and click totals and the most clicked links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM short_urls")
        .fetch_one(pool)
        .await?;

    let never_clicked: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM short_urls WHERE clicks = 0")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:         {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:        {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Never clicked: {}",
        never_clicked.to_string().bright_green().bold()
    );
    println!();

    let service = LinkService::new(Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone()))));
    let top = service
        .top(TOP_ENTRIES)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load top links: {e}"))?;

    if top.is_empty() {
        println!("{}", "  No links yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<8} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(60).bright_black());

    for entry in &top {
        println!(
            "  {:<8} {:<8} {}",
            entry.code().cyan(),
            entry.clicks.to_string(),
            entry.long_url
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK, migrations applied".green().bold());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_lines_skips_blanks_and_comments() {
        let content = "hh.ru\n\n  # favourites\n  https://example.com/a  \n#x\n";
        assert_eq!(parse_url_lines(content), vec!["hh.ru", "https://example.com/a"]);
    }

    #[test]
    fn test_demo_urls_are_unique() {
        let mut urls = DEMO_URLS.to_vec();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), DEMO_URLS.len());
    }
}
