//! The news session: one loaded collection plus the marks store.
//!
//! A [`NewsSession`] owns the current article collection and the set of
//! sources seen in it. [`NewsSession::reload`] rebuilds both from scratch
//! and swaps them in together; nothing patches the collection in place.

use std::collections::BTreeSet;

use tracing::{info, instrument};

use crate::clock::Clock;
use crate::filter::{self, QuickRange};
use crate::loader::DigestLoader;
use crate::marks::MarkStore;
use crate::models::{Article, FilterOutcome, FilterQuery, GroupBy};
use crate::store::ContentStore;

/// Loaded articles, known sources and marks for one run of the application.
#[derive(Debug)]
pub struct NewsSession<S, M, C> {
    loader: DigestLoader<S>,
    marks: M,
    clock: C,
    articles: Vec<Article>,
    sources: BTreeSet<String>,
}

impl<S, M, C> NewsSession<S, M, C>
where
    S: ContentStore,
    M: MarkStore,
    C: Clock,
{
    /// An empty session. Call [`reload`](Self::reload) to populate it.
    pub fn new(loader: DigestLoader<S>, marks: M, clock: C) -> Self {
        Self {
            loader,
            marks,
            clock,
            articles: Vec::new(),
            sources: BTreeSet::new(),
        }
    }

    /// Replace the collection with a fresh load of the lookback window.
    ///
    /// Returns the number of articles loaded.
    #[instrument(level = "info", skip_all)]
    pub async fn reload(&mut self) -> usize {
        let articles = self.loader.load(self.clock.today()).await;
        let sources: BTreeSet<String> = articles.iter().map(|a| a.source.clone()).collect();
        info!(articles = articles.len(), sources = sources.len(), "Session reloaded");
        self.articles = articles;
        self.sources = sources;
        self.articles.len()
    }

    /// The full collection, newest first.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Distinct sources of the current collection, sorted.
    pub fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    /// Filter and group the current collection.
    pub fn filter(&self, query: &FilterQuery, group_by: GroupBy) -> FilterOutcome {
        filter::apply(&self.articles, query, group_by, self.clock.today())
    }

    /// A query spanning `range` relative to the session clock.
    pub fn query_for_range(&self, range: QuickRange) -> FilterQuery {
        let (from_date, to_date) = range.bounds(self.clock.today());
        FilterQuery {
            from_date,
            to_date,
            ..Default::default()
        }
    }

    pub fn marks(&self) -> &M {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut M {
        &mut self.marks
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::marks::Marks;
    use crate::store::MemoryContentStore;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn store() -> MemoryContentStore {
        let mut store = MemoryContentStore::new();
        store.insert(
            "2024-01-15-digest.md",
            "- **GPT-5 rumours swirl** ([The Verge](https://www.theverge.com/a))\n  Nothing confirmed.\n\
             - **Humanoid robot demo** ([ ](https://techcrunch.com/b))\n",
        );
        store.insert(
            "2024-01-01-digest.md",
            "- **New year model roundup** ([Wired](https://www.wired.com/c))\n",
        );
        store
    }

    fn session() -> NewsSession<MemoryContentStore, Marks, FixedClock> {
        NewsSession::new(DigestLoader::new(store()), Marks::new(), FixedClock(today()))
    }

    #[tokio::test]
    async fn test_reload_populates_articles_and_sources() {
        let mut s = session();
        assert!(s.articles().is_empty());
        assert_eq!(s.reload().await, 3);
        let sources: Vec<&str> = s.sources().iter().map(String::as_str).collect();
        assert_eq!(sources, vec!["TechCrunch", "The Verge", "Wired"]);
    }

    #[tokio::test]
    async fn test_reload_replaces_rather_than_appends() {
        let mut s = session();
        s.reload().await;
        s.reload().await;
        assert_eq!(s.articles().len(), 3);
    }

    #[tokio::test]
    async fn test_filter_with_week_range() {
        let mut s = session();
        s.reload().await;
        let query = s.query_for_range(QuickRange::Week);
        let outcome = s.filter(&query, GroupBy::Day);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].label, "Today");
    }

    #[tokio::test]
    async fn test_marks_are_independent_of_articles() {
        let mut s = session();
        s.reload().await;
        assert!(s.marks_mut().toggle_favorite("Humanoid robot demo"));
        assert!(s.marks().is_favorite("Humanoid robot demo"));
        s.reload().await;
        assert!(s.marks().is_favorite("Humanoid robot demo"));
    }
}
