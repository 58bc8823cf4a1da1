//! Application state as a pure reducer.
//!
//! All view data derives from one [`AppState`] value: the filtered list and
//! the grouped buckets are recomputed on demand rather than cached in
//! separate mutable fields. External snapshots (records, bookmarks, metrics,
//! comments) replace their slice of the state wholesale.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::{
    models::{InsightComment, InsightMetric, NewsRecord, VoteDirection},
    pipeline::{
        filter::{filter_records, FilterQuery, ViewMode},
        group::{group_records, latest_date, Granularity, NewsGroup},
    },
};

#[derive(Debug, Default)]
pub struct AppState {
    pub records: Vec<NewsRecord>,
    pub view_mode: ViewMode,
    pub search_term: String,
    pub selected_keyword: Option<String>,
    pub bookmarks: HashSet<String>,
    pub metrics: HashMap<String, InsightMetric>,
    pub comments: Vec<InsightComment>,
    fetch_epoch: u64,
}

#[derive(Debug)]
pub enum Action {
    /// Fetch result tagged with the epoch from [`AppState::begin_fetch`].
    RecordsLoaded {
        epoch: u64,
        records: Vec<NewsRecord>,
    },
    ViewModeChanged(ViewMode),
    SearchChanged(String),
    KeywordSelected(Option<String>),
    BookmarksReplaced(HashSet<String>),
    MetricsReplaced(HashMap<String, InsightMetric>),
    CommentsReplaced(Vec<InsightComment>),
    /// Optimistic local vote; reverted if the remote write fails.
    VoteRecorded {
        news_id: String,
        direction: VoteDirection,
    },
    VoteReverted {
        news_id: String,
        direction: VoteDirection,
    },
}

impl AppState {
    /// Marks the start of a fetch cycle. Responses from earlier cycles are
    /// stale and get discarded when applied.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_epoch += 1;
        self.fetch_epoch
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::RecordsLoaded { epoch, records } => {
                if epoch != self.fetch_epoch {
                    debug!(epoch, current = self.fetch_epoch, "Discarding stale fetch result");
                    return;
                }
                self.records = records;
            }
            Action::ViewModeChanged(mode) => self.view_mode = mode,
            Action::SearchChanged(term) => {
                // Search and keyword selection are mutually exclusive.
                if !term.trim().is_empty() {
                    self.selected_keyword = None;
                }
                self.search_term = term;
            }
            Action::KeywordSelected(keyword) => {
                if keyword.is_some() {
                    self.search_term.clear();
                }
                self.selected_keyword = keyword;
            }
            Action::BookmarksReplaced(ids) => self.bookmarks = ids,
            Action::MetricsReplaced(metrics) => self.metrics = metrics,
            Action::CommentsReplaced(comments) => self.comments = comments,
            Action::VoteRecorded { news_id, direction } => {
                self.metrics.entry(news_id).or_default().record(direction);
            }
            Action::VoteReverted { news_id, direction } => {
                if let Some(metric) = self.metrics.get_mut(&news_id) {
                    metric.revert(direction);
                }
            }
        }
    }

    fn filter_query(&self) -> FilterQuery<'_> {
        FilterQuery {
            mode: self.view_mode,
            bookmarks: &self.bookmarks,
            search: (!self.search_term.is_empty()).then_some(self.search_term.as_str()),
            keyword: self.selected_keyword.as_deref(),
        }
    }

    /// The filtered record list for the current view.
    pub fn visible_records(&self) -> Vec<NewsRecord> {
        filter_records(&self.records, &self.filter_query())
    }

    /// The filtered list bucketed for rendering.
    pub fn grouped(&self, granularity: Granularity) -> Vec<NewsGroup> {
        group_records(&self.visible_records(), granularity)
    }

    pub fn latest_date(&self) -> Option<String> {
        latest_date(&self.records)
    }

    pub fn metric(&self, news_id: &str) -> InsightMetric {
        self.metrics.get(news_id).copied().unwrap_or_default()
    }

    /// Comments for one record, oldest first.
    pub fn comments_for(&self, news_id: &str) -> Vec<&InsightComment> {
        self.comments
            .iter()
            .filter(|c| c.news_id == news_id)
            .sorted_by_key(|c| c.timestamp)
            .collect()
    }

    /// Distinct keywords in fetch order, for the keyword selector.
    pub fn available_keywords(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.keyword.clone())
            .filter(|kw| !kw.is_empty())
            .unique()
            .collect()
    }
}
