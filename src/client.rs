use std::{sync::Arc, time::Duration};

use arc_swap::ArcSwap;
use bon::Builder;
use chrono::Local;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::{ClientError, ResponseError},
    models::NewsRecord,
    paths,
    pipeline::{
        group,
        ident,
        parse::{parse_rows, ColumnMap},
    },
    sample,
};

/// Bounded retry-with-backoff shared by the sheet fetch and the
/// generative-text call: `base_delay * 2^attempt` between attempts, three
/// attempts total.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            max_attempts: 3,
        }
    }
}

/// Base URLs of the four external services, overridable for tests.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub sheets: String,
    pub docstore: String,
    pub identity: String,
    pub genai: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            sheets: paths::SHEETS_URL.to_string(),
            docstore: paths::DOCSTORE_URL.to_string(),
            identity: paths::IDENTITY_URL.to_string(),
            genai: paths::GENAI_URL.to_string(),
        }
    }
}

/// Which of the two source tabs a fetch cycle reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetShape {
    Standard,
    Deep,
}

impl SheetShape {
    fn column_map(self) -> ColumnMap {
        match self {
            Self::Standard => ColumnMap::standard(),
            Self::Deep => ColumnMap::deep(),
        }
    }
}

/// Result of one fetch cycle. `notice` carries the user-visible message when
/// the cycle degraded to the built-in sample dataset.
#[derive(Debug, Clone)]
pub struct NewsBatch {
    pub records: Vec<NewsRecord>,
    pub notice: Option<String>,
}

/// Client for the news feed and its side channels. Cheap to clone; all
/// clones share the HTTP connection pool and the current record snapshot.
#[derive(Clone, Builder)]
pub struct NewsDesk {
    pub(crate) config: AppConfig,
    #[builder(default)]
    pub(crate) endpoints: Endpoints,
    #[builder(default)]
    pub(crate) retry_policy: RetryPolicy,
    #[builder(default = reqwest::Client::new())]
    pub(crate) http_client: reqwest::Client,
    #[builder(skip = Arc::new(ArcSwap::from_pointee(Vec::new())))]
    records: Arc<ArcSwap<Vec<NewsRecord>>>,
    #[builder(skip)]
    user_id: Arc<parking_lot::RwLock<Option<String>>>,
}

impl NewsDesk {
    pub fn from_config(config: AppConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// The record set from the most recent successful fetch (or fallback).
    pub fn records(&self) -> Arc<Vec<NewsRecord>> {
        self.records.load_full()
    }

    pub fn user_id(&self) -> Option<String> {
        self.user_id.read().clone()
    }

    pub(crate) fn set_user_id(&self, user_id: String) {
        *self.user_id.write() = Some(user_id);
    }

    pub fn latest_date(&self) -> Option<String> {
        group::latest_date(&self.records())
    }

    /// One fetch cycle: rows → parse → assign ids → replace the snapshot
    /// wholesale. An empty or header-only sheet is fatal for the cycle.
    pub async fn refresh_news(&self, shape: SheetShape) -> Result<Vec<NewsRecord>, ClientError> {
        let tab = match shape {
            SheetShape::Standard => &self.config.news_tab,
            SheetShape::Deep => &self.config.deep_tab,
        };
        let rows = self.fetch_sheet_values(tab).await?;

        let today = Local::now().date_naive();
        let mut records = parse_rows(&rows, &shape.column_map(), today);
        ident::assign_ids(&mut records);
        if records.is_empty() {
            return Err(ResponseError::EmptyResponse.into());
        }

        info!(count = records.len(), tab = %tab, "News fetch completed");
        self.records.store(Arc::new(records.clone()));
        Ok(records)
    }

    /// Fetch cycle that degrades instead of failing: on any fetch-fatal
    /// condition the built-in sample dataset is installed and the error
    /// message is surfaced alongside it.
    pub async fn load_news(&self, shape: SheetShape) -> NewsBatch {
        match self.refresh_news(shape).await {
            Ok(records) => NewsBatch {
                records,
                notice: None,
            },
            Err(err) => {
                warn!(error = %err, "News fetch failed, falling back to sample dataset");
                let records = sample::fallback_records();
                self.records.store(Arc::new(records.clone()));
                NewsBatch {
                    records,
                    notice: Some(err.to_string()),
                }
            }
        }
    }
}
