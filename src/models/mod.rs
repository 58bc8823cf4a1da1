mod insight;
mod record;

pub use insight::{
    CommentRole, InsightComment, InsightMetric, VoteDirection, AI_AUTHOR_ID,
};
pub use record::{
    NewsRecord, MAX_LONG_FORM_PARAGRAPHS, PLACEHOLDER_IMAGE_URL, RECOMMENDED_MARKER,
};
