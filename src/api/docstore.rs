//! Document-collection store client.
//!
//! Collections live under the application namespace (see [`crate::paths`]).
//! Change notification is modelled as a polling subscription that emits the
//! full collection snapshot each tick; consumers replace their cached copy
//! wholesale rather than diffing.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    client::NewsDesk,
    error::ClientError,
    http::{HttpClient, HttpRequest},
};

/// One stored document: its full resource name plus typed field values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.get("stringValue")?.as_str()
    }

    /// Integer fields arrive as stringified integers; absent or malformed
    /// values read as zero, matching the defaulting used everywhere else.
    pub fn get_int(&self, key: &str) -> i64 {
        self.fields
            .get(key)
            .and_then(|v| v.get("integerValue"))
            .and_then(|v| v.as_str())
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }
}

pub(crate) fn str_field(value: &str) -> Value {
    json!({ "stringValue": value })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

impl NewsDesk {
    fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.endpoints.docstore, self.config.project_id
        )
    }

    fn document_resource(&self, collection: &str, doc_id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.config.project_id, collection, doc_id
        )
    }

    /// Full snapshot of one collection, following pagination to the end.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, ClientError> {
        let url = format!("{}/{}", self.documents_root(), collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = HttpRequest::get(url.clone())
                .query("key", &self.config.firebase_api_key)
                .query("pageSize", "300");
            if let Some(token) = &page_token {
                req = req.query("pageToken", token);
            }
            let page: ListResponse = self.request(req).await?;
            documents.extend(page.documents);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(documents)
    }

    pub async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> Result<Document, ClientError> {
        let url = format!("{}/{}/{}", self.documents_root(), collection, doc_id);
        let req = HttpRequest::get(url).query("key", &self.config.firebase_api_key);
        self.request(req).await
    }

    /// Creates a document with a store-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, ClientError> {
        let url = format!("{}/{}", self.documents_root(), collection);
        let req = HttpRequest::post(url)
            .query("key", &self.config.firebase_api_key)
            .json(&json!({ "fields": fields }))?;
        self.request(req).await
    }

    /// Creates or overwrites a document at a caller-chosen id.
    pub async fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, ClientError> {
        let url = format!("{}/{}/{}", self.documents_root(), collection, doc_id);
        let req = HttpRequest::patch(url)
            .query("key", &self.config.firebase_api_key)
            .json(&json!({ "fields": fields }))?;
        self.request(req).await
    }

    pub async fn delete_document(&self, collection: &str, doc_id: &str) -> Result<(), ClientError> {
        let url = format!("{}/{}/{}", self.documents_root(), collection, doc_id);
        let req = HttpRequest::delete(url).query("key", &self.config.firebase_api_key);
        self.request_empty(req).await
    }

    /// Server-side atomic counter increment. Two concurrent callers both
    /// land their increment, unlike a client-side read-modify-write.
    pub async fn increment_document_field(
        &self,
        collection: &str,
        doc_id: &str,
        field: &str,
    ) -> Result<(), ClientError> {
        let url = format!("{}:commit", self.documents_root());
        let body = json!({
            "writes": [{
                "transform": {
                    "document": self.document_resource(collection, doc_id),
                    "fieldTransforms": [{
                        "fieldPath": field,
                        "increment": { "integerValue": "1" }
                    }]
                }
            }]
        });
        let req = HttpRequest::post(url)
            .query("key", &self.config.firebase_api_key)
            .json(&body)?;
        self.request_empty(req).await
    }

    /// Polling change subscription: emits the full collection snapshot every
    /// `interval`. Ends when the receiver is dropped. Failed polls are
    /// logged and skipped; the previous snapshot stays current.
    pub fn watch_collection(
        &self,
        collection: String,
        interval: Duration,
    ) -> mpsc::Receiver<Vec<Document>> {
        let (tx, rx) = mpsc::channel(8);
        let desk = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match desk.list_documents(&collection).await {
                    Ok(snapshot) => {
                        debug!(collection = %collection, count = snapshot.len(), "Collection snapshot");
                        if tx.send(snapshot).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(collection = %collection, error = %err, "Collection poll failed");
                    }
                }
            }
        });
        rx
    }
}
