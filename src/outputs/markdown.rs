//! Markdown rendering of filter results.
//!
//! Each article is written back in the digest item grammar, so rendered
//! output can itself be read by [`crate::parser::parse_digest`]:
//!
//! ```text
//! Showing 2 of 14 articles
//!
//! ## Today
//!
//! - **Title** ([Source](https://example.com/a)) _2024-01-15 00:00:00_
//!   Summary, cut to 180 characters...
//! > Top Stories | agents, product | favorite
//! ```
//!
//! The metadata line is not indented, which ends the summary for a reader
//! of the digest grammar.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::marks::MarkStore;
use crate::models::{Article, FilterOutcome};
use crate::utils::truncate_summary;

/// Summaries longer than this many characters are cut for display.
pub const SUMMARY_DISPLAY_CHARS: usize = 180;

const ITEM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one article as a digest item plus its metadata line.
///
/// # Arguments
///
/// * `article` - The article to render
/// * `favorite` - Whether to mark the article as a favorite
/// * `flag` - Flag label to show, if any
///
/// # Returns
///
/// The item line, an indented summary line when there is a summary, and an
/// unindented `>` metadata line, each ending in a newline.
pub fn render_article(article: &Article, favorite: bool, flag: Option<&str>) -> String {
    let mut md = String::new();
    writeln!(
        md,
        "- **{}** ([{}]({})) _{}_",
        article.title,
        article.source,
        article.url,
        article.date.format(ITEM_DATE_FORMAT)
    )
    .unwrap();
    if !article.summary.is_empty() {
        writeln!(md, "  {}", truncate_summary(&article.summary, SUMMARY_DISPLAY_CHARS)).unwrap();
    }

    let mut meta = format!("> {} | {}", article.category, article.tags.join(", "));
    if favorite {
        meta.push_str(" | favorite");
    }
    if let Some(label) = flag {
        write!(meta, " | flagged: {label}").unwrap();
    }
    writeln!(md, "{meta}").unwrap();
    md
}

/// Render a grouped filter outcome, headed by its summary line.
pub fn render_outcome(outcome: &FilterOutcome, marks: &impl MarkStore) -> String {
    let mut md = String::new();
    writeln!(md, "{}", outcome.summary_line()).unwrap();

    if outcome.is_empty() {
        writeln!(md, "\nNo articles match the current filters.").unwrap();
        return md;
    }

    for group in &outcome.groups {
        writeln!(md, "\n## {}\n", group.label).unwrap();
        for (i, article) in group.articles.iter().enumerate() {
            if i > 0 {
                md.push('\n');
            }
            md.push_str(&render_marked(article, marks));
        }
    }
    md
}

fn render_marked(article: &Article, marks: &impl MarkStore) -> String {
    render_article(article, marks.is_favorite(&article.title), marks.flag(&article.title))
}

/// Render a flat article list, one item after another.
pub fn render_articles(articles: &[Article], marks: &impl MarkStore) -> String {
    articles
        .iter()
        .map(|a| render_marked(a, marks))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the known sources as a bullet list.
pub fn render_sources(sources: &BTreeSet<String>) -> String {
    let mut md = String::new();
    for source in sources {
        writeln!(md, "- {source}").unwrap();
    }
    md
}
