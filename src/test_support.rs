use std::time::Duration;

use crate::client::{Endpoints, NewsDesk, RetryPolicy};
use crate::config::AppConfig;

pub(crate) fn test_config() -> AppConfig {
    AppConfig::from_json(
        r#"{
            "appId": "keyword-news",
            "sheetId": "sheet-1",
            "sheetsApiKey": "sheets-key",
            "firebaseApiKey": "firebase-key",
            "projectId": "proj",
            "genaiApiKey": "genai-key"
        }"#,
    )
    .unwrap()
}

/// Client with every endpoint pointed at one mock server and near-zero
/// backoff so retry tests stay fast.
pub(crate) fn desk_for(base: &str) -> NewsDesk {
    NewsDesk::builder()
        .config(test_config())
        .endpoints(Endpoints {
            sheets: base.to_string(),
            docstore: base.to_string(),
            identity: base.to_string(),
            genai: base.to_string(),
        })
        .retry_policy(RetryPolicy {
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            max_attempts: 3,
        })
        .build()
}
