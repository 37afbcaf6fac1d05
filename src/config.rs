//! Application configuration.
//!
//! Settings come from an optional `config.yaml` and are then overridden by
//! command-line flags. Every field has a default, so an absent file or a
//! file that names only some keys is fine.
//!
//! ```yaml
//! digest_dir: news-digests
//! base_url: https://example.com/news-digests/
//! lookback_days: 90
//! max_concurrent_fetches: 90
//! fetch_timeout_secs: 30
//! marks_path: marks.json
//! default_range: week
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::Result;
use crate::filter::QuickRange;
use crate::loader::DEFAULT_LOOKBACK_DAYS;

fn default_digest_dir() -> PathBuf {
    PathBuf::from("news-digests")
}

fn default_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

fn default_max_concurrent_fetches() -> usize {
    DEFAULT_LOOKBACK_DAYS as usize
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_marks_path() -> PathBuf {
    PathBuf::from("marks.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `YYYY-MM-DD-digest.md` files.
    pub digest_dir: PathBuf,
    /// When set, digests are fetched from this URL instead of `digest_dir`.
    pub base_url: Option<String>,
    pub lookback_days: u32,
    pub max_concurrent_fetches: usize,
    /// Per-request timeout for the HTTP store.
    pub fetch_timeout_secs: u64,
    pub marks_path: PathBuf,
    pub default_range: QuickRange,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            digest_dir: default_digest_dir(),
            base_url: None,
            lookback_days: default_lookback_days(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            marks_path: default_marks_path(),
            default_range: QuickRange::default(),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load from `path`, or return defaults when no path is given or the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or is not valid YAML
    /// for this shape.
    #[instrument(level = "info", skip_all)]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            info!(path = %path.display(), "Config file not found; using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
