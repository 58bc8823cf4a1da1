//! Client-held bookmark set with optimistic toggle semantics.
//!
//! The in-memory set is a cache; whichever [`BookmarkStore`] backs it is the
//! source of truth, and every external change notification replaces the
//! cache wholesale via [`Bookmarks::replace`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use crate::{
    api::docstore::{str_field, Document},
    client::NewsDesk,
    error::ClientError,
    paths,
};

/// Backing store for the per-user bookmark id set.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    async fn load(&self) -> Result<HashSet<String>, ClientError>;
    async fn add(&self, news_id: &str) -> Result<(), ClientError>;
    async fn remove(&self, news_id: &str) -> Result<(), ClientError>;
}

/// Remote per-user bookmark collection; one document per bookmarked record,
/// stored at the record id so removal needs no query.
pub struct RemoteBookmarks {
    desk: NewsDesk,
    collection: String,
}

impl RemoteBookmarks {
    pub fn new(desk: NewsDesk, user_id: &str) -> Self {
        let collection = paths::bookmarks_collection(&desk.config.app_id, user_id);
        Self { desk, collection }
    }
}

#[async_trait]
impl BookmarkStore for RemoteBookmarks {
    async fn load(&self) -> Result<HashSet<String>, ClientError> {
        let docs = self.desk.list_documents(&self.collection).await?;
        Ok(bookmark_ids_from_documents(&docs))
    }

    async fn add(&self, news_id: &str) -> Result<(), ClientError> {
        let mut fields = serde_json::Map::new();
        fields.insert("newsId".to_string(), str_field(news_id));
        fields.insert("timestamp".to_string(), str_field(&Utc::now().to_rfc3339()));
        self.desk
            .set_document(&self.collection, news_id, fields)
            .await?;
        Ok(())
    }

    async fn remove(&self, news_id: &str) -> Result<(), ClientError> {
        self.desk.delete_document(&self.collection, news_id).await
    }
}

/// Extracts the id set from a collection snapshot.
pub fn bookmark_ids_from_documents(docs: &[Document]) -> HashSet<String> {
    docs.iter()
        .filter_map(|doc| doc.get_str("newsId"))
        .map(str::to_string)
        .collect()
}

/// The session's bookmark state: cached id set plus its backing store.
pub struct Bookmarks {
    ids: parking_lot::RwLock<HashSet<String>>,
    store: Arc<dyn BookmarkStore>,
}

impl Bookmarks {
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self {
            ids: parking_lot::RwLock::new(HashSet::new()),
            store,
        }
    }

    /// Pulls the store's current set into the cache.
    pub async fn sync(&self) -> Result<(), ClientError> {
        let ids = self.store.load().await?;
        self.replace(ids);
        Ok(())
    }

    /// Wholesale replacement from an external change notification.
    pub fn replace(&self, ids: HashSet<String>) {
        *self.ids.write() = ids;
    }

    pub fn contains(&self, news_id: &str) -> bool {
        self.ids.read().contains(news_id)
    }

    pub fn snapshot(&self) -> HashSet<String> {
        self.ids.read().clone()
    }

    /// Optimistic toggle: the cache flips first, then the store write runs;
    /// a failed write rolls the flip back and surfaces the error. Returns
    /// whether the id is bookmarked afterwards.
    pub async fn toggle(&self, news_id: &str) -> Result<bool, ClientError> {
        let was_bookmarked = {
            let mut ids = self.ids.write();
            if ids.remove(news_id) {
                true
            } else {
                ids.insert(news_id.to_string());
                false
            }
        };

        let write = if was_bookmarked {
            self.store.remove(news_id).await
        } else {
            self.store.add(news_id).await
        };

        if let Err(err) = write {
            warn!(news_id, error = %err, "Bookmark write failed, reverting");
            let mut ids = self.ids.write();
            if was_bookmarked {
                ids.insert(news_id.to_string());
            } else {
                ids.remove(news_id);
            }
            return Err(err);
        }
        Ok(!was_bookmarked)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        ids: parking_lot::Mutex<HashSet<String>>,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl BookmarkStore for MemoryStore {
        async fn load(&self) -> Result<HashSet<String>, ClientError> {
            Ok(self.ids.lock().clone())
        }

        async fn add(&self, news_id: &str) -> Result<(), ClientError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ClientError::RateLimited);
            }
            self.ids.lock().insert(news_id.to_string());
            Ok(())
        }

        async fn remove(&self, news_id: &str) -> Result<(), ClientError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ClientError::RateLimited);
            }
            self.ids.lock().remove(news_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn double_toggle_nets_to_the_original_state() {
        let store = Arc::new(MemoryStore::default());
        let bookmarks = Bookmarks::new(store.clone());

        assert!(bookmarks.toggle("x").await.unwrap());
        assert!(bookmarks.contains("x"));
        assert!(!bookmarks.toggle("x").await.unwrap());
        assert!(!bookmarks.contains("x"));
        assert!(store.ids.lock().is_empty());
    }

    #[tokio::test]
    async fn failed_write_rolls_back_the_optimistic_flip() {
        let store = Arc::new(MemoryStore::default());
        store.fail_writes.store(true, Ordering::SeqCst);
        let bookmarks = Bookmarks::new(store.clone());

        assert!(bookmarks.toggle("x").await.is_err());
        assert!(!bookmarks.contains("x"));
        assert!(store.ids.lock().is_empty());
    }

    #[tokio::test]
    async fn external_snapshot_replaces_the_cache_wholesale() {
        let store = Arc::new(MemoryStore::default());
        let bookmarks = Bookmarks::new(store);
        bookmarks.toggle("stale").await.unwrap();

        bookmarks.replace(["fresh".to_string()].into());
        assert!(bookmarks.contains("fresh"));
        assert!(!bookmarks.contains("stale"));
    }

    #[tokio::test]
    async fn sync_pulls_the_store_state() {
        let store = Arc::new(MemoryStore::default());
        store.ids.lock().insert("remote".to_string());
        let bookmarks = Bookmarks::new(store);

        bookmarks.sync().await.unwrap();
        assert!(bookmarks.contains("remote"));
    }

    #[test]
    fn snapshot_extraction_reads_news_ids() {
        let docs: Vec<Document> = serde_json::from_value(serde_json::json!([
            {"name": "c/doc1", "fields": {"newsId": {"stringValue": "a-2025"}}},
            {"name": "c/doc2", "fields": {"other": {"stringValue": "x"}}}
        ]))
        .unwrap();
        let ids = bookmark_ids_from_documents(&docs);
        assert_eq!(ids, ["a-2025".to_string()].into());
    }
}
