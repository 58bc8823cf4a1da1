use serde::Deserialize;

use crate::error::ConfigError;

fn default_news_tab() -> String {
    "news".to_string()
}

fn default_deep_tab() -> String {
    "deepnews".to_string()
}

fn default_genai_model() -> String {
    "gemini-2.0-flash".to_string()
}

/// Startup configuration for [`crate::client::NewsDesk`].
///
/// An unparsable configuration aborts startup; nothing else in the client
/// treats a failure as fatal to the process.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Namespace for all document-store collections.
    pub app_id: String,
    /// Spreadsheet identifier holding both news tabs.
    pub sheet_id: String,
    #[serde(default = "default_news_tab")]
    pub news_tab: String,
    #[serde(default = "default_deep_tab")]
    pub deep_tab: String,
    pub sheets_api_key: String,
    /// Key shared by the identity provider and the document store.
    pub firebase_api_key: String,
    pub project_id: String,
    pub genai_api_key: String,
    #[serde(default = "default_genai_model")]
    pub genai_model: String,
    /// Optional custom sign-in token; anonymous sign-in is used without it.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app_id: require("KEYWORD_NEWS_APP_ID")?,
            sheet_id: require("KEYWORD_NEWS_SHEET_ID")?,
            news_tab: std::env::var("KEYWORD_NEWS_NEWS_TAB").unwrap_or_else(|_| default_news_tab()),
            deep_tab: std::env::var("KEYWORD_NEWS_DEEP_TAB").unwrap_or_else(|_| default_deep_tab()),
            sheets_api_key: require("KEYWORD_NEWS_SHEETS_API_KEY")?,
            firebase_api_key: require("KEYWORD_NEWS_FIREBASE_API_KEY")?,
            project_id: require("KEYWORD_NEWS_PROJECT_ID")?,
            genai_api_key: require("KEYWORD_NEWS_GENAI_API_KEY")?,
            genai_model: std::env::var("KEYWORD_NEWS_GENAI_MODEL")
                .unwrap_or_else(|_| default_genai_model()),
            auth_token: std::env::var("KEYWORD_NEWS_AUTH_TOKEN").ok(),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar { name })
}
