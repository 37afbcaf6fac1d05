//! Filtering and grouping of a loaded article collection.
//!
//! Filtering never reorders: the output keeps the collection's newest-first
//! order. Grouping partitions the filtered articles either by their
//! long-form date string or by source, with a deterministic group order.

use std::cmp::Reverse;

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use itertools::Itertools;
use serde::Deserialize;

use crate::dates::{parse_long_date, relative_label};
use crate::models::{Article, ArticleGroup, FilterOutcome, FilterQuery, GroupBy};

/// Preset date ranges offered next to the explicit from/to bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickRange {
    /// Yesterday through today.
    Day,
    /// The last seven days through today.
    #[default]
    Week,
    /// No date bounds.
    All,
}

impl QuickRange {
    /// `(from, to)` bounds for this preset relative to `today`.
    pub fn bounds(self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            QuickRange::Day => (Some(today - Duration::days(1)), Some(today)),
            QuickRange::Week => (Some(today - Duration::days(7)), Some(today)),
            QuickRange::All => (None, None),
        }
    }
}

/// Whether a single article passes `query`.
///
/// `needle` is the query's search text already lowercased.
fn matches(article: &Article, query: &FilterQuery, needle: &str) -> bool {
    let matches_search = needle.is_empty()
        || article.title.to_lowercase().contains(needle)
        || article.summary.to_lowercase().contains(needle)
        || article.source.to_lowercase().contains(needle);

    let after_from = query
        .from_date
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .is_none_or(|from| article.date >= from);
    let before_to = query
        .to_date
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .is_none_or(|to| article.date <= to);

    let matches_source =
        query.allowed_sources.is_empty() || query.allowed_sources.contains(&article.source);

    matches_search && after_from && before_to && matches_source
}

/// Articles passing `query`, in collection order.
pub fn filter_articles<'a>(articles: &'a [Article], query: &FilterQuery) -> Vec<&'a Article> {
    let needle = query.search_text.to_lowercase();
    articles
        .iter()
        .filter(|a| matches(a, query, &needle))
        .collect()
}

/// Partition filtered articles into display groups.
///
/// By day, groups are ordered newest first by the date their key parses to
/// (keys that do not parse sort last), ties broken by key text. By source,
/// groups are ordered by name. Within a group the input order is kept.
/// `today` only drives the `Today`/`Yesterday` labels.
pub fn group_articles(articles: &[&Article], group_by: GroupBy, today: NaiveDate) -> Vec<ArticleGroup> {
    let key_of = |a: &&Article| match group_by {
        GroupBy::Day => a.date_string.clone(),
        GroupBy::Source => a.source.clone(),
    };
    let mut grouped = articles.iter().copied().into_group_map_by(key_of);

    let mut keys: Vec<String> = grouped.keys().cloned().collect();
    match group_by {
        GroupBy::Day => keys.sort_by(|a, b| {
            Reverse(parse_long_date(a))
                .cmp(&Reverse(parse_long_date(b)))
                .then_with(|| a.cmp(b))
        }),
        GroupBy::Source => keys.sort(),
    }

    keys.into_iter()
        .map(|key| {
            let articles: Vec<Article> = grouped
                .remove(&key)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect();
            let label = match group_by {
                GroupBy::Day => parse_long_date(&key)
                    .and_then(|d| relative_label(d, today))
                    .map_or_else(|| key.clone(), str::to_string),
                GroupBy::Source => key.clone(),
            };
            ArticleGroup { key, label, articles }
        })
        .collect()
}

/// Filter `articles` with `query` and group the result.
pub fn apply(articles: &[Article], query: &FilterQuery, group_by: GroupBy, today: NaiveDate) -> FilterOutcome {
    let filtered = filter_articles(articles, query);
    FilterOutcome {
        total: articles.len(),
        matched: filtered.len(),
        groups: group_articles(&filtered, group_by, today),
    }
}
