//! Content stores that hold the daily digest files.
//!
//! The loader only needs to fetch a digest by resource name, and must tell
//! "there is no digest for that day" apart from a successful read. Stores
//! answer `Ok(None)` for absent resources and `Err` for anything that went
//! wrong on the way.
//!
//! | Store | Backing | Absent when |
//! |-------|---------|-------------|
//! | [`FsContentStore`] | a local directory | the file does not exist |
//! | [`HttpContentStore`] | a base URL | the server answers 404 |
//! | [`MemoryContentStore`] | a map | the key is missing |

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{NewsError, Result};

/// Retrieves digest text by resource name.
pub trait ContentStore {
    /// `Ok(Some(text))` when present, `Ok(None)` when absent.
    async fn retrieve(&self, resource: &str) -> Result<Option<String>>;
}

/// Digests stored as files in one directory.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for FsContentStore {
    #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
    async fn retrieve(&self, resource: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.root.join(resource)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Digests served over HTTP below a base URL.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
    base: Url,
}

impl HttpContentStore {
    /// Build a store for `base_url`. A trailing slash is added when missing so
    /// resource names resolve below the base instead of replacing its last
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidUrl`] when `base_url` does not parse, or
    /// [`NewsError::Http`] when the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: Url::parse(&base)?,
        })
    }

    pub fn resource_url(&self, resource: &str) -> Result<Url> {
        Ok(self.base.join(resource)?)
    }
}

impl ContentStore for HttpContentStore {
    #[instrument(level = "debug", skip(self), fields(base = %self.base))]
    async fn retrieve(&self, resource: &str) -> Result<Option<String>> {
        let url = self.resource_url(resource)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%resource, "Digest not found on server");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(NewsError::Status {
                status: status.as_u16(),
                resource: resource.to_string(),
            });
        }
        Ok(Some(response.text().await?))
    }
}

/// Digests held in memory, keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    entries: HashMap<String, String>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(resource.into(), content.into());
    }
}

impl ContentStore for MemoryContentStore {
    async fn retrieve(&self, resource: &str) -> Result<Option<String>> {
        Ok(self.entries.get(resource).cloned())
    }
}

/// The store selected at start-up from configuration.
#[derive(Debug, Clone)]
pub enum DigestStore {
    Fs(FsContentStore),
    Http(HttpContentStore),
}

impl ContentStore for DigestStore {
    async fn retrieve(&self, resource: &str) -> Result<Option<String>> {
        match self {
            DigestStore::Fs(store) => store.retrieve(resource).await,
            DigestStore::Http(store) => store.retrieve(resource).await,
        }
    }
}
