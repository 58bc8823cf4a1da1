//! Endpoint bases and document-store collection layout.

pub const SHEETS_URL: &str = "https://sheets.googleapis.com";
pub const DOCSTORE_URL: &str = "https://firestore.googleapis.com";
pub const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
pub const GENAI_URL: &str = "https://generativelanguage.googleapis.com";

/// Per-user bookmark collection.
pub fn bookmarks_collection(app_id: &str, user_id: &str) -> String {
    format!("apps/{app_id}/users/{user_id}/bookmarks")
}

/// Shared upvote/downvote counters, one document per record id.
pub fn metrics_collection(app_id: &str) -> String {
    format!("apps/{app_id}/public/insightMetrics")
}

/// Shared append-only comment log.
pub fn comments_collection(app_id: &str) -> String {
    format!("apps/{app_id}/public/insightComments")
}
