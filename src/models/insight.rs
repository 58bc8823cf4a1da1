use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Author id recorded on generated replies.
pub const AI_AUTHOR_ID: &str = "insight-ai";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn field(self) -> &'static str {
        match self {
            Self::Up => "upvotes",
            Self::Down => "downvotes",
        }
    }
}

/// Per-record vote counters from the shared metrics collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightMetric {
    pub upvotes: u64,
    pub downvotes: u64,
}

impl InsightMetric {
    pub fn record(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes += 1,
            VoteDirection::Down => self.downvotes += 1,
        }
    }

    /// Undo one optimistic [`record`](Self::record) after a failed write.
    pub fn revert(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes = self.upvotes.saturating_sub(1),
            VoteDirection::Down => self.downvotes = self.downvotes.saturating_sub(1),
        }
    }

    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommentRole {
    #[default]
    User,
    Ai,
}

/// One entry in the shared append-only comment log, keyed by record id and
/// ordered for display by `timestamp` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightComment {
    /// Document id in the backing store; empty until persisted.
    pub id: String,
    pub news_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub author_id: String,
    pub role: CommentRole,
}

impl InsightComment {
    pub fn user(news_id: impl Into<String>, text: impl Into<String>, author_id: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            news_id: news_id.into(),
            text: text.into(),
            timestamp: Utc::now(),
            author_id: author_id.into(),
            role: CommentRole::User,
        }
    }

    pub fn ai(news_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            news_id: news_id.into(),
            text: text.into(),
            timestamp: Utc::now(),
            author_id: AI_AUTHOR_ID.to_string(),
            role: CommentRole::Ai,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_records_and_reverts() {
        let mut metric = InsightMetric::default();
        metric.record(VoteDirection::Up);
        metric.record(VoteDirection::Up);
        metric.record(VoteDirection::Down);
        assert_eq!(metric.upvotes, 2);
        assert_eq!(metric.downvotes, 1);
        assert_eq!(metric.score(), 1);

        metric.revert(VoteDirection::Up);
        assert_eq!(metric.upvotes, 1);
        // Reverting past zero saturates instead of underflowing.
        metric.revert(VoteDirection::Down);
        metric.revert(VoteDirection::Down);
        assert_eq!(metric.downvotes, 0);
    }

    #[test]
    fn comment_role_round_trips_lowercase() {
        assert_eq!(CommentRole::Ai.to_string(), "ai");
        assert_eq!("user".parse::<CommentRole>().unwrap(), CommentRole::User);
    }
}
