//! Data models for parsed digest articles and filter queries.
//!
//! This module defines the value types that flow through the pipeline:
//! - [`Article`]: one normalized news item extracted from a digest
//! - [`Category`]: rank-derived category of an article within its digest
//! - [`DigestId`]: the calendar date naming a digest, and its resource name
//! - [`FilterQuery`], [`GroupBy`], [`ArticleGroup`], [`FilterOutcome`]: the
//!   query side consumed and produced by [`crate::filter`]
//!
//! JSON output uses camelCase field names (`dateString`) to match what the
//! browser front end of the digests expects.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of leading matched items per digest that count as top stories.
pub const TOP_STORY_RANK: usize = 5;

static RESOURCE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})-digest\.md").unwrap());

/// Rank-derived category of an article within its source digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Top Stories")]
    TopStories,
    #[serde(rename = "News")]
    News,
}

impl Category {
    /// Category for the `rank`-th (1-based) matched item of a digest.
    pub fn from_rank(rank: usize) -> Self {
        if rank <= TOP_STORY_RANK {
            Category::TopStories
        } else {
            Category::News
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::TopStories => "Top Stories",
            Category::News => "News",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized news item parsed from a digest.
///
/// Articles are immutable once built by [`crate::parser`]; favorite and flag
/// status live in a separate [`crate::marks::MarkStore`] keyed by `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Trimmed headline; also the key for marks.
    pub title: String,
    /// Canonical publisher name.
    pub source: String,
    /// Trimmed link to the article.
    pub url: String,
    /// Continuation lines joined with single spaces. May be empty.
    pub summary: String,
    pub category: Category,
    /// Effective date used for filtering and sorting.
    pub date: NaiveDateTime,
    /// Long-form rendering of `date`, used as the by-day grouping key.
    pub date_string: String,
    /// One to four topic tags in classifier rule order.
    pub tags: Vec<String>,
}

/// The calendar date that names one digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DigestId(pub NaiveDate);

impl DigestId {
    /// The content-store resource name, e.g. `2024-01-15-digest.md`.
    pub fn resource_name(&self) -> String {
        format!("{}-digest.md", self.0.format("%Y-%m-%d"))
    }

    /// Recover the digest date from a resource or file name.
    ///
    /// Leading directories are allowed; anything without a valid
    /// `YYYY-MM-DD-digest.md` component yields `None`.
    pub fn from_resource_name(name: &str) -> Option<Self> {
        let caps = RESOURCE_NAME_RE.captures(name)?;
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(DigestId)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

/// Query applied by [`crate::filter::filter_articles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// Case-insensitive needle for title, summary or source. Empty matches everything.
    pub search_text: String,
    /// Inclusive lower bound, from the start of this day.
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound, through 23:59:59 of this day.
    pub to_date: Option<NaiveDate>,
    /// Sources allowed through. Empty allows all.
    pub allowed_sources: BTreeSet<String>,
}

/// How a filtered collection is partitioned for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GroupBy {
    #[default]
    Day,
    Source,
}

/// One group of a grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleGroup {
    /// Grouping key: a long-form date string or a source name.
    pub key: String,
    /// Display text for the key; `Today`/`Yesterday` for recent by-day groups.
    pub label: String,
    pub articles: Vec<Article>,
}

/// Result of filtering and grouping a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    /// Size of the collection before filtering.
    pub total: usize,
    /// Number of articles that passed the query.
    pub matched: usize,
    pub groups: Vec<ArticleGroup>,
}

impl FilterOutcome {
    /// `"Showing 3 of 10 articles"`.
    pub fn summary_line(&self) -> String {
        format!("Showing {} of {} articles", self.matched, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}
