//! Detection of navigational and promotional digest entries.
//!
//! Digests scraped from publisher front pages pick up section headers,
//! "browse" links and sponsored blocks that look like items. They are
//! recognised by a title denylist or by URL shape.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that mark a title as noise. Matched case-sensitively anywhere in the title.
pub const NOISE_TITLES: &[&str] = &[
    "Browse Business",
    "Browse Sustainability",
    "Sponsored Content",
    "View All Latest",
    "Momentum AI",
    "Computer Vision",
    "Machine Learning",
];

/// URL shapes of category, index, event and sponsored pages.
pub static NOISE_URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"/business/?$",
        r"/sustainability/?$",
        r"/sponsored/?$",
        r"events\.reutersevents\.com",
        r"artificial-intelligence-news/?$",
        r"/categories/",
        r"/events/",
        r"/resources/on-demand",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Whether an item with this title and URL should be discarded.
pub fn is_noise(title: &str, url: &str) -> bool {
    NOISE_TITLES.iter().any(|phrase| title.contains(phrase))
        || NOISE_URL_PATTERNS.iter().any(|re| re.is_match(url))
}
