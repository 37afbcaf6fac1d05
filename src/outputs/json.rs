//! JSON output for scripting.
//!
//! Articles are serialized with camelCase field names (`dateString`) and
//! carry two extra fields: `favorite`, and `flag` when the article has one.
//!
//! ```json
//! {
//!   "total": 12,
//!   "matched": 2,
//!   "groups": [
//!     { "key": "Monday, 15 January 2024", "label": "Today", "articles": [ ... ] }
//!   ]
//! }
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::marks::MarkStore;
use crate::models::{Article, FilterOutcome};

#[derive(Debug, Serialize)]
struct MarkedArticle<'a> {
    #[serde(flatten)]
    article: &'a Article,
    favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct GroupView<'a> {
    key: &'a str,
    label: &'a str,
    articles: Vec<MarkedArticle<'a>>,
}

#[derive(Debug, Serialize)]
struct OutcomeView<'a> {
    total: usize,
    matched: usize,
    groups: Vec<GroupView<'a>>,
}

fn marked<'a>(articles: &'a [Article], marks: &'a impl MarkStore) -> Vec<MarkedArticle<'a>> {
    articles
        .iter()
        .map(|article| MarkedArticle {
            article,
            favorite: marks.is_favorite(&article.title),
            flag: marks.flag(&article.title),
        })
        .collect()
}

/// Serialize a filter outcome, annotating each article with its marks.
pub fn outcome_to_json(outcome: &FilterOutcome, marks: &impl MarkStore) -> Result<String> {
    let view = OutcomeView {
        total: outcome.total,
        matched: outcome.matched,
        groups: outcome
            .groups
            .iter()
            .map(|g| GroupView {
                key: &g.key,
                label: &g.label,
                articles: marked(&g.articles, marks),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

/// Serialize a flat article list, such as the output of a single-digest parse.
pub fn articles_to_json(articles: &[Article], marks: &impl MarkStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(&marked(articles, marks))?)
}
