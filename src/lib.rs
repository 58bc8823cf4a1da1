pub mod api;
pub mod bookmarks;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod insights;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod sample;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
    pub use crate::bookmarks::{BookmarkStore, Bookmarks, RemoteBookmarks};
    pub use crate::client::{NewsBatch, NewsDesk, SheetShape};
    pub use crate::config::AppConfig;
    pub use crate::error::ClientError;
    pub use crate::models::{InsightComment, InsightMetric, NewsRecord, VoteDirection};
    pub use crate::pipeline::filter::ViewMode;
    pub use crate::pipeline::group::Granularity;
    pub use crate::state::{Action, AppState};
    pub use crate::storage::LocalBookmarks;
}
