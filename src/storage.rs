//! Local persistent key-value fallback for bookmarks.
//!
//! Used when no identity or remote store is configured. The bookmark set is
//! serialized as an ordered list under a fixed key in a single JSON file in
//! the platform data directory.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    bookmarks::BookmarkStore,
    error::{ClientError, StorageError},
};

/// Fixed key the ordered id list is stored under.
pub const BOOKMARKS_KEY: &str = "bookmarkedNewsIds";

const STORE_FILE: &str = "bookmarks.json";

#[derive(Debug, Clone)]
pub struct LocalBookmarks {
    path: PathBuf,
}

impl LocalBookmarks {
    /// Store file under the platform data directory.
    pub fn new() -> Result<Self, StorageError> {
        let dir = dirs::data_dir()
            .ok_or(StorageError::NoDataDir)?
            .join("keyword-news");
        Ok(Self {
            path: dir.join(STORE_FILE),
        })
    }

    /// Store file at an explicit path; used by tests and embedders.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<HashSet<String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashSet::new());
            }
            Err(err) => return Err(err.into()),
        };
        let value: Value = serde_json::from_str(&raw)?;
        let ids = value
            .get(BOOKMARKS_KEY)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }

    fn write(&self, ids: &HashSet<String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut ordered: Vec<&String> = ids.iter().collect();
        ordered.sort();
        let payload = json!({ BOOKMARKS_KEY: ordered });
        std::fs::write(&self.path, serde_json::to_string_pretty(&payload)?)?;
        debug!(path = %self.path.display(), count = ids.len(), "Bookmarks persisted");
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for LocalBookmarks {
    async fn load(&self) -> Result<HashSet<String>, ClientError> {
        Ok(self.read()?)
    }

    async fn add(&self, news_id: &str) -> Result<(), ClientError> {
        let mut ids = self.read()?;
        ids.insert(news_id.to_string());
        Ok(self.write(&ids)?)
    }

    async fn remove(&self, news_id: &str) -> Result<(), ClientError> {
        let mut ids = self.read()?;
        ids.remove(news_id);
        Ok(self.write(&ids)?)
    }
}
