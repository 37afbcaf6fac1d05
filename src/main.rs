//! # Digest News
//!
//! Command-line front end over the digest pipeline: loads a lookback window
//! of daily Markdown digests, filters and groups the articles, and prints
//! them as Markdown or JSON. Favorites and flags are kept in a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! digest_news --digest-dir ./news-digests list --search gpt --range week
//! digest_news sources
//! digest_news parse ./news-digests/2024-01-15-digest.md
//! digest_news favorite "Some headline"
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level); stdout carries only
//! rendered output.

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use digest_news::cli::{Cli, Command, ListArgs};
use digest_news::clock::SystemClock;
use digest_news::config::AppConfig;
use digest_news::error::NewsError;
use digest_news::loader::DigestLoader;
use digest_news::marks::{JsonFileMarks, MarkStore};
use digest_news::models::{Article, DigestId};
use digest_news::outputs::{OutputFormat, json, markdown};
use digest_news::parser::parse_digest;
use digest_news::session::NewsSession;
use digest_news::store::{DigestStore, FsContentStore, HttpContentStore};

type Session = NewsSession<DigestStore, JsonFileMarks, SystemClock>;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.digest_dir, ?args.base_url, "Parsed CLI arguments");

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    match args.command {
        Command::List(list) => {
            let session = open_session(&config).await?;
            run_list(&session, &list, &config)?;
        }
        Command::Sources => {
            let session = open_session(&config).await?;
            print!("{}", markdown::render_sources(session.sources()));
        }
        Command::Parse { file, date, format } => {
            let marks = JsonFileMarks::open(&config.marks_path).await?;
            let articles = parse_file(&file, date).await?;
            match format {
                OutputFormat::Markdown => print!("{}", markdown::render_articles(&articles, &marks)),
                OutputFormat::Json => println!("{}", json::articles_to_json(&articles, &marks)?),
            }
        }
        Command::Favorite { title } => {
            let mut marks = JsonFileMarks::open(&config.marks_path).await?;
            let now_favorite = marks.toggle_favorite(&title);
            marks.save().await?;
            info!(%title, favorite = now_favorite, "Toggled favorite");
            println!("{}: {}", if now_favorite { "favorited" } else { "unfavorited" }, title);
        }
        Command::Flag { title, label } => {
            let mut marks = JsonFileMarks::open(&config.marks_path).await?;
            marks.set_flag(&title, &label);
            marks.save().await?;
            info!(%title, %label, "Flagged article");
            println!("flagged ({label}): {title}");
        }
        Command::Unflag { title } => {
            let mut marks = JsonFileMarks::open(&config.marks_path).await?;
            marks.clear_flag(&title);
            marks.save().await?;
            info!(%title, "Cleared flag");
            println!("unflagged: {title}");
        }
    }

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "digest_news finished"
    );
    Ok(())
}

/// Load the config file, then apply command-line overrides.
fn resolve_config(args: &Cli) -> Result<AppConfig, NewsError> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(dir) = &args.digest_dir {
        config.digest_dir = dir.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = Some(url.clone());
    }
    if let Some(path) = &args.marks {
        config.marks_path = path.clone();
    }
    if let Some(days) = args.lookback_days {
        config.lookback_days = days;
    }
    Ok(config)
}

/// Choose the HTTP store when a base URL is configured, else the directory.
fn build_store(config: &AppConfig) -> Result<DigestStore, NewsError> {
    match &config.base_url {
        Some(url) => {
            info!(%url, "Reading digests over HTTP");
            let timeout = Duration::from_secs(config.fetch_timeout_secs);
            Ok(DigestStore::Http(HttpContentStore::new(url, timeout)?))
        }
        None => {
            info!(dir = %config.digest_dir.display(), "Reading digests from directory");
            Ok(DigestStore::Fs(FsContentStore::new(&config.digest_dir)))
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn open_session(config: &AppConfig) -> Result<Session, NewsError> {
    let loader = DigestLoader::new(build_store(config)?)
        .with_lookback_days(config.lookback_days)
        .with_max_concurrent(config.max_concurrent_fetches);
    let marks = JsonFileMarks::open(&config.marks_path).await?;
    let mut session = NewsSession::new(loader, marks, SystemClock);
    session.reload().await;
    Ok(session)
}

fn run_list(session: &Session, list: &ListArgs, config: &AppConfig) -> Result<(), NewsError> {
    let range = list.range.unwrap_or(config.default_range);
    let query = list.apply_to(session.query_for_range(range));
    debug!(?query, ?range, "Applying filter");

    let outcome = session.filter(&query, list.group_by);
    info!(total = outcome.total, matched = outcome.matched, groups = outcome.groups.len(), "Filtered articles");

    match list.format {
        OutputFormat::Markdown => print!("{}", markdown::render_outcome(&outcome, session.marks())),
        OutputFormat::Json => println!("{}", json::outcome_to_json(&outcome, session.marks())?),
    }
    Ok(())
}

/// Parse one digest file, dating it from its name unless `date` is given.
#[instrument(level = "info", skip_all, fields(file = %file.display()))]
async fn parse_file(file: &Path, date: Option<chrono::NaiveDate>) -> Result<Vec<Article>, NewsError> {
    let digest_date = match date {
        Some(d) => d,
        None => DigestId::from_resource_name(&file.to_string_lossy())
            .map(|id| id.date())
            .ok_or_else(|| {
                NewsError::InvalidDate(format!(
                    "cannot infer a digest date from {}; pass --date YYYY-MM-DD",
                    file.display()
                ))
            })?,
    };
    let content = tokio::fs::read_to_string(file).await?;
    let articles: Vec<Article> = parse_digest(&content, digest_date).collect();
    info!(%digest_date, count = articles.len(), "Parsed digest file");
    Ok(articles)
}
