//! Loading a lookback window of digests into one sorted collection.
//!
//! # Retrieval
//!
//! One retrieval is issued per day in the window. Retrievals run
//! concurrently on the caller's task through a `futures` stream; each one
//! turns its own outcome into a `Vec<Article>` before the join, so an absent
//! or broken digest contributes nothing and can never fail the load.
//!
//! # Ordering
//!
//! Per-day results are concatenated in window order (newest digest first,
//! items in appearance order) and then stably sorted newest-first by
//! article date. Articles with equal dates keep that merge order.

use chrono::{Duration, NaiveDate};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::models::{Article, DigestId};
use crate::parser::parse_digest;
use crate::store::ContentStore;

/// Default number of days, today included, searched for digests.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// Digest identifiers for `days` days ending at `today`, newest first.
///
/// # Arguments
///
/// * `today` - The newest day in the window
/// * `days` - Window length, today included
///
/// # Returns
///
/// One [`DigestId`] per day. The window stops early at the oldest date
/// `chrono` can represent, so very large `days` values never panic.
pub fn lookback_window(today: NaiveDate, days: u32) -> Vec<DigestId> {
    (0..i64::from(days))
        .map_while(|offset| today.checked_sub_signed(Duration::days(offset)))
        .map(DigestId)
        .collect()
}

/// Stable newest-first sort by article date.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Retrieves and parses digests from a [`ContentStore`].
#[derive(Debug, Clone)]
pub struct DigestLoader<S> {
    store: S,
    lookback_days: u32,
    max_concurrent: usize,
}

impl<S: ContentStore> DigestLoader<S> {
    /// A loader over the default 90-day window with every retrieval in flight at once.
    pub fn new(store: S) -> Self {
        Self {
            store,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_concurrent: DEFAULT_LOOKBACK_DAYS as usize,
        }
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// Cap on simultaneous retrievals. Zero is treated as one.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Load every digest in the window ending at `today`.
    ///
    /// All retrievals up to the concurrency cap are in flight at once.
    ///
    /// # Arguments
    ///
    /// * `today` - The newest day of the lookback window
    ///
    /// # Returns
    ///
    /// Every parsed article of the window, newest first. Never fails:
    /// missing and unreadable digests are logged and skipped.
    #[instrument(level = "info", skip(self), fields(days = self.lookback_days))]
    pub async fn load(&self, today: NaiveDate) -> Vec<Article> {
        let start = std::time::Instant::now();
        let window = lookback_window(today, self.lookback_days);

        let per_day: Vec<(bool, Vec<Article>)> = stream::iter(window)
            .map(|id| self.load_one(id))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let digests = per_day.iter().filter(|(found, _)| *found).count();
        let mut articles: Vec<Article> = per_day
            .into_iter()
            .flat_map(|(_, articles)| articles)
            .collect();
        sort_newest_first(&mut articles);

        info!(
            digests,
            articles = articles.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded digest window"
        );
        articles
    }

    /// Retrieve and parse one digest. The flag says whether a digest was found.
    async fn load_one(&self, id: DigestId) -> (bool, Vec<Article>) {
        let resource = id.resource_name();
        match self.store.retrieve(&resource).await {
            Ok(Some(content)) => {
                let articles: Vec<Article> = parse_digest(&content, id.date()).collect();
                debug!(%resource, count = articles.len(), "Parsed digest");
                (true, articles)
            }
            Ok(None) => {
                debug!(%resource, "No digest for day");
                (false, Vec::new())
            }
            Err(e) => {
                warn!(%resource, error = %e, "Digest retrieval failed; skipping day");
                (false, Vec::new())
            }
        }
    }
}
