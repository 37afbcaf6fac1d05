//! Command-line interface definitions for Digest News.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Store selection flags can also be provided through environment
//! variables, and any of them override values from the config file.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::dates::parse_cli_date;
use crate::filter::QuickRange;
use crate::models::{FilterQuery, GroupBy};
use crate::outputs::OutputFormat;

/// Command-line arguments for the Digest News application.
///
/// # Examples
///
/// ```sh
/// # This week's articles from a local digest directory, grouped by day
/// digest_news --digest-dir ./news-digests list
///
/// # Search everything served from a web host, grouped by source, as JSON
/// digest_news --base-url https://example.com/news-digests/ \
///     list --search gpt --range all --group-by source --format json
///
/// # Favorite an article
/// digest_news favorite "OpenAI launches new agentic coding copilot"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, env = "DIGEST_NEWS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding YYYY-MM-DD-digest.md files
    #[arg(short, long, env = "DIGEST_NEWS_DIR", global = true)]
    pub digest_dir: Option<PathBuf>,

    /// Base URL serving the digest files; takes precedence over --digest-dir
    #[arg(short, long, env = "DIGEST_NEWS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Path of the JSON file holding favorites and flags
    #[arg(long, global = true)]
    pub marks: Option<PathBuf>,

    /// Number of days, today included, to search for digests
    #[arg(long, global = true)]
    pub lookback_days: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter and list articles from the lookback window
    List(ListArgs),
    /// List the distinct sources in the lookback window
    Sources,
    /// Parse a single digest file
    Parse {
        /// Digest file, normally named YYYY-MM-DD-digest.md
        file: PathBuf,
        /// Digest date when it cannot be taken from the file name
        #[arg(long, value_parser = parse_cli_date)]
        date: Option<NaiveDate>,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Toggle the favorite mark of an article
    Favorite {
        title: String,
    },
    /// Flag an article with a free-form label; favorites are kept
    Flag {
        title: String,
        label: String,
    },
    /// Clear the flag on an article; favorites are kept
    Unflag {
        title: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against title, summary and source
    #[arg(short, long)]
    pub search: Option<String>,

    /// Earliest day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub from: Option<NaiveDate>,

    /// Latest day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_cli_date)]
    pub to: Option<NaiveDate>,

    /// Only include this source; repeat for several
    #[arg(long = "source")]
    pub sources: Vec<String>,

    /// Preset date range; --from and --to override its bounds
    #[arg(short, long, value_enum)]
    pub range: Option<QuickRange>,

    #[arg(short, long, value_enum, default_value_t)]
    pub group_by: GroupBy,

    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl ListArgs {
    /// Layer these flags over `base`, typically a quick-range query.
    pub fn apply_to(&self, mut base: FilterQuery) -> FilterQuery {
        if let Some(search) = &self.search {
            base.search_text = search.clone();
        }
        if self.from.is_some() {
            base.from_date = self.from;
        }
        if self.to.is_some() {
            base.to_date = self.to;
        }
        base.allowed_sources.extend(self.sources.iter().cloned());
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "digest_news",
            "--digest-dir",
            "./digests",
            "list",
            "--search",
            "gpt",
            "--from",
            "2024-01-01",
            "--source",
            "Wired",
            "--source",
            "BBC",
            "--group-by",
            "source",
            "--format",
            "json",
        ]);

        assert_eq!(cli.digest_dir, Some(PathBuf::from("./digests")));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.search.as_deref(), Some("gpt"));
        assert_eq!(args.from, Some(ymd(2024, 1, 1)));
        assert_eq!(args.sources, vec!["Wired", "BBC"]);
        assert_eq!(args.group_by, GroupBy::Source);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.range, None);
    }

    #[test]
    fn test_cli_short_flags_and_globals_after_subcommand() {
        let cli = Cli::parse_from(["digest_news", "list", "-r", "day", "-b", "https://example.com/d/"]);
        assert_eq!(cli.base_url.as_deref(), Some("https://example.com/d/"));
        let Command::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.range, Some(QuickRange::Day));
        assert_eq!(args.group_by, GroupBy::Day);
        assert_eq!(args.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["digest_news", "list", "--from", "15/01/2024"]).is_err());
    }

    #[test]
    fn test_mark_commands() {
        let cli = Cli::parse_from(["digest_news", "flag", "Some title", "check later"]);
        match cli.command {
            Command::Flag { title, label } => {
                assert_eq!(title, "Some title");
                assert_eq!(label, "check later");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_command_with_date() {
        let cli = Cli::parse_from(["digest_news", "parse", "today.md", "--date", "2024-01-15"]);
        match cli.command {
            Command::Parse { file, date, format } => {
                assert_eq!(file, PathBuf::from("today.md"));
                assert_eq!(date, Some(ymd(2024, 1, 15)));
                assert_eq!(format, OutputFormat::Markdown);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_apply_to_overrides_range_bounds() {
        let base = FilterQuery {
            from_date: Some(ymd(2024, 1, 8)),
            to_date: Some(ymd(2024, 1, 15)),
            ..Default::default()
        };
        let args = ListArgs {
            search: Some("robot".to_string()),
            from: Some(ymd(2024, 1, 1)),
            sources: vec!["Wired".to_string()],
            ..Default::default()
        };
        let query = args.apply_to(base);
        assert_eq!(query.search_text, "robot");
        assert_eq!(query.from_date, Some(ymd(2024, 1, 1)));
        assert_eq!(query.to_date, Some(ymd(2024, 1, 15)));
        assert!(query.allowed_sources.contains("Wired"));
    }
}
