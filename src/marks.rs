//! Favorite and flag status of articles, keyed by title.
//!
//! Marks are kept apart from [`Article`](crate::models::Article) records,
//! which never change after parsing. Favorites are a set of titles; flags
//! map a title to a free-form label. The two are independent, so flagging a
//! favorite keeps it a favorite.
//!
//! [`JsonFileMarks`] persists both in one JSON file:
//!
//! ```json
//! { "favorites": ["Some headline"], "flags": { "Other headline": "check source" } }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::error::Result;

/// Favorite and flag lookups by article title.
pub trait MarkStore {
    fn is_favorite(&self, title: &str) -> bool;
    fn set_favorite(&mut self, title: &str, favorite: bool);
    fn flag(&self, title: &str) -> Option<&str>;
    fn set_flag(&mut self, title: &str, label: &str);
    fn clear_flag(&mut self, title: &str);

    /// Flip favorite status, returning the new state. Flags are untouched.
    fn toggle_favorite(&mut self, title: &str) -> bool {
        let favorite = !self.is_favorite(title);
        self.set_favorite(title, favorite);
        favorite
    }
}

/// In-memory favorites and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marks {
    pub favorites: BTreeSet<String>,
    pub flags: BTreeMap<String, String>,
}

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles carrying a favorite or a flag.
    pub fn len(&self) -> usize {
        let flagged_only = self
            .flags
            .keys()
            .filter(|title| !self.favorites.contains(*title))
            .count();
        self.favorites.len() + flagged_only
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.flags.is_empty()
    }
}

impl MarkStore for Marks {
    fn is_favorite(&self, title: &str) -> bool {
        self.favorites.contains(title)
    }

    fn set_favorite(&mut self, title: &str, favorite: bool) {
        if favorite {
            self.favorites.insert(title.to_string());
        } else {
            self.favorites.remove(title);
        }
    }

    fn flag(&self, title: &str) -> Option<&str> {
        self.flags.get(title).map(String::as_str)
    }

    fn set_flag(&mut self, title: &str, label: &str) {
        self.flags.insert(title.to_string(), label.to_string());
    }

    fn clear_flag(&mut self, title: &str) {
        self.flags.remove(title);
    }
}

/// Marks persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileMarks {
    path: PathBuf,
    marks: Marks,
}

impl JsonFileMarks {
    /// Open the marks file at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the JSON file; it need not exist yet
    ///
    /// # Returns
    ///
    /// The loaded marks. A missing or blank file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Io`](crate::error::NewsError::Io) when the file
    /// cannot be read and [`NewsError::Json`](crate::error::NewsError::Json)
    /// when it is not a marks object.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let marks = match fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => Marks::default(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No marks file yet; starting empty");
                Marks::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, marks })
    }

    /// Write the current marks back to disk, creating parent directories.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.marks)?;
        fs::write(&self.path, json).await?;
        info!(
            favorites = self.marks.favorites.len(),
            flags = self.marks.flags.len(),
            "Saved marks"
        );
        Ok(())
    }

    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

impl MarkStore for JsonFileMarks {
    fn is_favorite(&self, title: &str) -> bool {
        self.marks.is_favorite(title)
    }

    fn set_favorite(&mut self, title: &str, favorite: bool) {
        self.marks.set_favorite(title, favorite);
    }

    fn flag(&self, title: &str) -> Option<&str> {
        self.marks.flag(title)
    }

    fn set_flag(&mut self, title: &str, label: &str) {
        self.marks.set_flag(title, label);
    }

    fn clear_flag(&mut self, title: &str) {
        self.marks.clear_flag(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_favorite() {
        let mut marks = Marks::new();
        assert!(!marks.is_favorite("A"));
        assert!(marks.toggle_favorite("A"));
        assert!(marks.is_favorite("A"));
        assert!(!marks.toggle_favorite("A"));
        assert!(marks.is_empty());
    }

    #[test]
    fn test_flag_keeps_favorite() {
        let mut marks = Marks::new();
        marks.toggle_favorite("A");
        marks.set_flag("A", "follow-up");
        assert!(marks.is_favorite("A"));
        assert_eq!(marks.flag("A"), Some("follow-up"));
        assert_eq!(marks.len(), 1);

        marks.clear_flag("A");
        assert!(marks.is_favorite("A"));
        assert_eq!(marks.flag("A"), None);
    }

    #[test]
    fn test_unfavorite_keeps_flag() {
        let mut marks = Marks::new();
        marks.set_flag("A", "verify");
        marks.toggle_favorite("A");
        marks.toggle_favorite("A");
        assert_eq!(marks.flag("A"), Some("verify"));
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/marks.json");

        let mut marks = JsonFileMarks::open(&path).await.unwrap();
        assert!(marks.is_empty());
        marks.toggle_favorite("Big launch");
        marks.set_flag("Big launch", "share");
        marks.set_flag("Odd story", "check source");
        marks.save().await.unwrap();

        let reopened = JsonFileMarks::open(&path).await.unwrap();
        assert_eq!(reopened.len(), 2);
        assert!(reopened.is_favorite("Big launch"));
        assert_eq!(reopened.flag("Big launch"), Some("share"));
        assert_eq!(reopened.flag("Odd story"), Some("check source"));
    }

    #[tokio::test]
    async fn test_partial_file_fills_missing_half() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.json");
        std::fs::write(&path, r#"{"favorites": ["A"]}"#).unwrap();
        let marks = JsonFileMarks::open(&path).await.unwrap();
        assert!(marks.is_favorite("A"));
        assert!(marks.marks().flags.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_marks_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.json");
        std::fs::write(&path, "[not, an, object").unwrap();
        assert!(JsonFileMarks::open(&path).await.is_err());
    }
}
