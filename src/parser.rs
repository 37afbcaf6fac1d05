//! Line-oriented parser for daily markdown digests.
//!
//! A digest is free text in which news items appear as single lines:
//!
//! ```text
//! - **OpenAI ships a thing** ([The Verge](https://www.theverge.com/x)) _2024-01-14_
//!   First line of the summary,
//!   second line of the summary.
//! ```
//!
//! The trailing italic date is optional. Lines indented by two or more
//! whitespace characters directly below an item are its summary. Everything
//! else in the digest (headings, prose, blank lines) is ignored.
//!
//! [`parse_digest`] returns a lazy iterator; nothing is allocated for a line
//! until the iterator reaches it.

use std::iter::Peekable;
use std::str::Lines;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::dates::{format_long_date, parse_item_date};
use crate::models::{Article, Category};
use crate::rules::{classify_title, is_noise, resolve_source};
use crate::utils::truncate_for_log;

/// `- **title** ([source](url))` with an optional ` _date_` suffix.
static ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-\s+\*\*(.+?)\*\*\s+\(\[(.+?)\]\((.+?)\)\)(?:\s+_(.+?)_)?$").unwrap()
});

/// Summary continuation lines start with at least two whitespace characters.
static CONTINUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{2,}").unwrap());

/// Parse one digest.
///
/// # Arguments
///
/// * `content` - Raw Markdown text of the digest
/// * `digest_date` - The calendar date naming the digest; it is the default
///   date of every item that does not carry a parseable date of its own
///
/// # Returns
///
/// A lazy iterator of [`Article`]s in document order. Lines that are not
/// items or summary continuations are skipped, so parsing never fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use digest_news::parser::parse_digest;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let md = "- **Robots at work** ([ ](https://www.wired.com/r))\n  Warehouse trials.\n";
/// let article = parse_digest(md, day).next().unwrap();
/// assert_eq!(article.source, "Wired");
/// assert_eq!(article.summary, "Warehouse trials.");
/// ```
pub fn parse_digest(content: &str, digest_date: NaiveDate) -> DigestItems<'_> {
    DigestItems {
        lines: content.lines().peekable(),
        rank: 0,
        digest_date,
        default_date: digest_date.and_time(chrono::NaiveTime::MIN),
        default_date_string: format_long_date(digest_date),
    }
}

/// Lazy sequence of [`Article`]s produced by [`parse_digest`].
///
/// The iterator keeps a running rank of every matched item line, noise
/// included, so the first five matched lines are top stories even if some
/// of them are discarded.
#[derive(Debug)]
pub struct DigestItems<'a> {
    lines: Peekable<Lines<'a>>,
    rank: usize,
    digest_date: NaiveDate,
    default_date: NaiveDateTime,
    default_date_string: String,
}

impl DigestItems<'_> {
    /// Number of item lines matched so far, noise included.
    pub fn matched(&self) -> usize {
        self.rank
    }

    pub fn digest_date(&self) -> NaiveDate {
        self.digest_date
    }

    fn take_summary(&mut self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        while let Some(line) = self.lines.next_if(|l| CONTINUATION_RE.is_match(l)) {
            // Whitespace-only lines keep their slot, leaving a double space.
            parts.push(line.trim());
        }
        parts.join(" ").trim().to_string()
    }

    fn effective_date(&self, item_date: Option<&str>) -> (NaiveDateTime, String) {
        match item_date.and_then(parse_item_date) {
            Some(dt) => (dt, format_long_date(dt.date())),
            None => {
                if let Some(raw) = item_date.filter(|s| !s.trim().is_empty()) {
                    debug!(item_date = %truncate_for_log(raw, 40), "Unparseable item date; using digest date");
                }
                (self.default_date, self.default_date_string.clone())
            }
        }
    }
}

impl Iterator for DigestItems<'_> {
    type Item = Article;

    fn next(&mut self) -> Option<Article> {
        while let Some(line) = self.lines.next() {
            let Some(caps) = ITEM_RE.captures(line) else {
                continue;
            };
            let title = caps.get(1).map_or("", |m| m.as_str()).trim();
            let source_name = caps.get(2).map_or("", |m| m.as_str()).trim();
            let url = caps.get(3).map_or("", |m| m.as_str()).trim();
            let item_date = caps.get(4).map(|m| m.as_str());

            self.rank += 1;
            let category = Category::from_rank(self.rank);
            let summary = self.take_summary();

            if is_noise(title, url) {
                debug!(rank = self.rank, title = %truncate_for_log(title, 80), %url, "Discarding noise item");
                continue;
            }

            let source = if source_name.is_empty() {
                resolve_source(url)
            } else {
                source_name.to_string()
            };
            let (date, date_string) = self.effective_date(item_date);

            return Some(Article {
                title: title.to_string(),
                source,
                url: url.to_string(),
                summary,
                category,
                date,
                date_string,
                tags: classify_title(title),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn jan15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn item(n: usize) -> String {
        format!("- **Story number {n}** ([Wired](https://www.wired.com/story/{n}))\n")
    }

    #[test]
    fn test_single_item_fields() {
        let digest = "# AI News\n\n- **OpenAI launches new agentic coding copilot** ([The Verge](https://www.theverge.com/2024/1/15/copilot))\n  It writes code.\n  Mostly.\n";
        let articles: Vec<Article> = parse_digest(digest, jan15()).collect();
        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title, "OpenAI launches new agentic coding copilot");
        assert_eq!(a.source, "The Verge");
        assert_eq!(a.url, "https://www.theverge.com/2024/1/15/copilot");
        assert_eq!(a.summary, "It writes code. Mostly.");
        assert_eq!(a.category, Category::TopStories);
        assert_eq!(a.date_string, "Monday, 15 January 2024");
        assert_eq!(a.date, jan15().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(a.tags, vec!["agents", "product", "coding"]);
    }

    #[test]
    fn test_six_items_five_top_stories() {
        let digest: String = (1..=6).map(item).collect();
        let cats: Vec<Category> = parse_digest(&digest, jan15()).map(|a| a.category).collect();
        assert_eq!(
            cats,
            vec![
                Category::TopStories,
                Category::TopStories,
                Category::TopStories,
                Category::TopStories,
                Category::TopStories,
                Category::News,
            ]
        );
    }

    #[test]
    fn test_rank_counts_noise_items() {
        let digest = format!(
            "{}- **Browse Business** ([Reuters](https://www.reuters.com/business/))\n{}{}{}{}{}",
            item(1),
            item(2),
            item(3),
            item(4),
            item(5),
            item(6)
        );
        let mut items = parse_digest(&digest, jan15());
        let articles: Vec<Article> = items.by_ref().collect();
        assert_eq!(items.matched(), 7);
        assert_eq!(articles.len(), 6);
        assert!(articles.iter().all(|a| a.title != "Browse Business"));
        // matched positions 1,3,4,5 are top stories; 6 and 7 are not
        let top: Vec<&str> = articles
            .iter()
            .filter(|a| a.category == Category::TopStories)
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(
            top,
            vec!["Story number 1", "Story number 2", "Story number 3", "Story number 4"]
        );
    }

    #[test]
    fn test_item_date_overrides_digest_date() {
        let digest = "- **Late story** ([Reuters](https://www.reuters.com/tech/x)) _2024-01-13T08:45:00_\n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.date_string, "Saturday, 13 January 2024");
        assert_eq!((a.date.hour(), a.date.minute()), (8, 45));
    }

    #[test]
    fn test_unparseable_or_blank_item_date_falls_back() {
        let digest = "- **A** ([Wired](https://www.wired.com/a)) _last tuesday_\n- **B** ([Wired](https://www.wired.com/b)) _ _\n";
        let articles: Vec<Article> = parse_digest(digest, jan15()).collect();
        assert_eq!(articles.len(), 2);
        for a in &articles {
            assert_eq!(a.date_string, "Monday, 15 January 2024");
        }
    }

    #[test]
    fn test_blank_source_name_resolves_from_url() {
        let digest = "- **Quiet launch** ([ ](https://www.bbc.co.uk/news/x))\n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.source, "BBC");
    }

    #[test]
    fn test_round_trip_of_title_source_url() {
        let cases = [
            ("Claude 3 tops benchmarks", "Anthropic", "https://www.anthropic.com/news/claude-3"),
            ("Funding: $40b round (reported)", "Bloomberg", "https://www.bloomberg.com/a?b=c"),
            ("Nested **bold** title", "Ars Technica", "https://arstechnica.com/x"),
        ];
        for (title, source, url) in cases {
            let line = format!("- **{title}** ([{source}]({url}))");
            let a = parse_digest(&line, jan15()).next().unwrap();
            assert_eq!(
                format!("- **{}** ([{}]({}))", a.title, a.source, a.url),
                line
            );
        }
    }

    #[test]
    fn test_continuation_rules() {
        let digest = "- **A** ([Wired](https://www.wired.com/a))\n    indented four\n\t\ttabbed\n   \n  after blank\nnot indented\n  orphan\n";
        let articles: Vec<Article> = parse_digest(digest, jan15()).collect();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].summary, "indented four tabbed  after blank");
    }

    #[test]
    fn test_whitespace_only_continuation_lines() {
        let digest = "- **A** ([Wired](https://www.wired.com/a))\n  \n  one\n    \n  two\n  \n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.summary, "one  two");
    }

    #[test]
    fn test_unindented_blank_line_ends_summary() {
        let digest = "- **A** ([Wired](https://www.wired.com/a))\n  first\n\n  second\n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.summary, "first");
    }

    #[test]
    fn test_single_space_indent_is_not_continuation() {
        let digest = "- **A** ([Wired](https://www.wired.com/a))\n not summary\n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.summary, "");
    }

    #[test]
    fn test_crlf_digest() {
        let digest = "- **A** ([Wired](https://www.wired.com/a)) _2024-01-10_\r\n  sum\r\n";
        let a = parse_digest(digest, jan15()).next().unwrap();
        assert_eq!(a.summary, "sum");
        assert_eq!(a.date_string, "Wednesday, 10 January 2024");
    }

    #[test]
    fn test_no_items_is_empty() {
        let digest = "# Nothing today\n\nJust prose. - **not** an item\n";
        assert_eq!(parse_digest(digest, jan15()).count(), 0);
        assert_eq!(parse_digest("", jan15()).count(), 0);
    }

    #[test]
    fn test_lines_that_almost_match_are_ignored() {
        let digest = "- **No link**\n* **Star bullet** ([Wired](https://www.wired.com/a))\n- **Trailing** ([Wired](https://www.wired.com/a)) extra\n";
        assert_eq!(parse_digest(digest, jan15()).count(), 0);
    }
}
