//! Insight votes, comments, and generated summaries/replies.
//!
//! Metrics and comments live in globally shared collections keyed by record
//! id. Votes use the store's server-side atomic increment, so concurrent
//! voters cannot lose increments the way a client-side read-modify-write
//! would.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::warn;

use crate::{
    api::docstore::{str_field, Document},
    client::NewsDesk,
    error::{ClientError, ResponseError},
    models::{CommentRole, InsightComment, InsightMetric, NewsRecord, VoteDirection, AI_AUTHOR_ID},
    paths,
};

/// Outcome of posting a comment. The user comment is always persisted when
/// this is returned; the generated reply is best-effort, with its failure
/// message surfaced instead of the reply.
#[derive(Debug)]
pub struct PostedComment {
    pub user: InsightComment,
    pub ai_reply: Option<InsightComment>,
    pub reply_error: Option<String>,
}

impl NewsDesk {
    /// Registers one vote via atomic increment on the shared counter pair.
    pub async fn vote(
        &self,
        news_id: &str,
        direction: VoteDirection,
    ) -> Result<(), ClientError> {
        let collection = paths::metrics_collection(&self.config.app_id);
        self.increment_document_field(&collection, news_id, direction.field())
            .await
    }

    /// Current counters for one record; absent documents read as zeroes.
    pub async fn fetch_metric(&self, news_id: &str) -> Result<InsightMetric, ClientError> {
        let collection = paths::metrics_collection(&self.config.app_id);
        match self.get_document(&collection, news_id).await {
            Ok(doc) => Ok(metric_from_document(&doc)),
            Err(ClientError::ResponseError(ResponseError::HttpStatus { status, .. }))
                if status == reqwest::StatusCode::NOT_FOUND =>
            {
                Ok(InsightMetric::default())
            }
            Err(err) => Err(err),
        }
    }

    /// Appends a user comment, then issues one generative call seeded with
    /// the article title and the comment text and appends the reply as an
    /// `ai` comment. A failed generation leaves the user comment persisted
    /// and surfaces the failure in the result.
    pub async fn add_comment(
        &self,
        record: &NewsRecord,
        text: &str,
        author_id: &str,
    ) -> Result<PostedComment, ClientError> {
        let user = self
            .append_comment(InsightComment::user(record.id.clone(), text, author_id))
            .await?;

        match self.generate_text(&reply_prompt(record, text)).await {
            Ok(reply) => {
                let ai = self
                    .append_comment(InsightComment::ai(record.id.clone(), reply))
                    .await?;
                Ok(PostedComment {
                    user,
                    ai_reply: Some(ai),
                    reply_error: None,
                })
            }
            Err(err) => {
                warn!(news_id = %record.id, error = %err, "Comment reply generation failed");
                Ok(PostedComment {
                    user,
                    ai_reply: None,
                    reply_error: Some(err.to_string()),
                })
            }
        }
    }

    /// One-off generated summary of a record for the insight panel.
    pub async fn generate_insight(&self, record: &NewsRecord) -> Result<String, ClientError> {
        self.generate_text(&insight_prompt(record)).await
    }

    async fn append_comment(
        &self,
        comment: InsightComment,
    ) -> Result<InsightComment, ClientError> {
        let collection = paths::comments_collection(&self.config.app_id);
        let doc = self
            .create_document(&collection, comment_fields(&comment))
            .await?;
        Ok(InsightComment {
            id: doc.id().to_string(),
            ..comment
        })
    }
}

fn insight_prompt(record: &NewsRecord) -> String {
    format!(
        "다음 뉴스 기사를 읽고 핵심 인사이트를 세 문장 이내로 요약해 주세요.\n\n제목: {}\n요약: {}\n내용: {}",
        record.title, record.summary, record.content
    )
}

fn reply_prompt(record: &NewsRecord, comment_text: &str) -> String {
    format!(
        "다음 뉴스 기사에 달린 댓글에 짧고 유용한 답글을 작성해 주세요.\n\n기사 제목: {}\n댓글: {}",
        record.title, comment_text
    )
}

fn comment_fields(comment: &InsightComment) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("newsId".to_string(), str_field(&comment.news_id));
    fields.insert("text".to_string(), str_field(&comment.text));
    fields.insert(
        "timestamp".to_string(),
        str_field(&comment.timestamp.to_rfc3339()),
    );
    fields.insert("authorId".to_string(), str_field(&comment.author_id));
    fields.insert("role".to_string(), str_field(&comment.role.to_string()));
    fields
}

fn metric_from_document(doc: &Document) -> InsightMetric {
    InsightMetric {
        upvotes: doc.get_int("upvotes").max(0) as u64,
        downvotes: doc.get_int("downvotes").max(0) as u64,
    }
}

/// Converts a metrics collection snapshot into the per-record counter map.
pub fn metrics_from_documents(docs: &[Document]) -> HashMap<String, InsightMetric> {
    docs.iter()
        .filter(|doc| !doc.id().is_empty())
        .map(|doc| (doc.id().to_string(), metric_from_document(doc)))
        .collect()
}

/// Converts a comments collection snapshot into the comment log.
pub fn comments_from_documents(docs: &[Document]) -> Vec<InsightComment> {
    docs.iter()
        .map(|doc| InsightComment {
            id: doc.id().to_string(),
            news_id: doc.get_str("newsId").unwrap_or_default().to_string(),
            text: doc.get_str("text").unwrap_or_default().to_string(),
            timestamp: doc
                .get_str("timestamp")
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or(DateTime::UNIX_EPOCH),
            author_id: doc.get_str("authorId").unwrap_or_default().to_string(),
            role: doc
                .get_str("role")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(CommentRole::User),
        })
        .collect()
}
