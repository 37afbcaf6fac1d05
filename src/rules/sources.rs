//! Canonical publisher names from article URLs.

use url::Url;

/// Name returned when a URL is missing, unparsable or has no host.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// `(host substring, canonical name)` pairs. The first match wins, so order
/// matters for overlapping substrings.
pub const SOURCE_TABLE: &[(&str, &str)] = &[
    ("techcrunch.com", "TechCrunch"),
    ("reuters.com", "Reuters"),
    ("theverge.com", "The Verge"),
    ("wired.com", "Wired"),
    ("arstechnica.com", "Ars Technica"),
    ("bbc.com", "BBC"),
    ("bbc.co.uk", "BBC"),
    ("nytimes.com", "New York Times"),
    ("theguardian.com", "The Guardian"),
    ("bloomberg.com", "Bloomberg"),
    ("technologyreview.com", "MIT Tech Review"),
    ("venturebeat.com", "VentureBeat"),
    ("anthropic.com", "Anthropic"),
    ("openai.com", "OpenAI"),
    ("deepmind.com", "DeepMind"),
    ("artificialintelligence-news.com", "AI News"),
];

/// Map a URL to a human-readable publisher name.
///
/// # Arguments
///
/// * `url` - Article link, absolute or not
///
/// # Returns
///
/// The publisher name, or `"Unknown"` when `url` has no host.
///
/// Hosts are matched against [`SOURCE_TABLE`]. Unknown hosts fall back to
/// the first label after an optional leading `www.`, so
/// `https://www.example.org/x` becomes `"example"`.
///
/// # Examples
///
/// ```
/// use digest_news::rules::resolve_source;
///
/// assert_eq!(resolve_source("https://www.bbc.co.uk/news/some-article"), "BBC");
/// assert_eq!(resolve_source("not a url"), "Unknown");
/// ```
pub fn resolve_source(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return UNKNOWN_SOURCE.to_string();
    }
    let host = match Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
    {
        Some(h) if !h.is_empty() => h,
        _ => return UNKNOWN_SOURCE.to_string(),
    };

    if let Some((_, name)) = SOURCE_TABLE.iter().find(|(domain, _)| host.contains(domain)) {
        return (*name).to_string();
    }

    let bare = host.strip_prefix("www.").unwrap_or(&host);
    bare.split('.').next().unwrap_or(bare).to_string()
}
