use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Upstream service is rate limiting requests")]
    RateLimited,

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Response format error: {0}")]
    ResponseError(#[from] ResponseError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Rate limits and transport-level failures may be retried with backoff.
    /// Every other failure class is terminal on first occurrence.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::RequestError(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Custom token rejected by identity provider: {0}")]
    TokenRejected(String),

    #[error("Sign-in failed: {0}")]
    SignInFailed(String),
}

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Unexpected response structure: {0}")]
    UnexpectedStructure(String),

    #[error("Empty response when data was expected")]
    EmptyResponse,

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
}

impl ResponseError {
    pub fn unexpected_structure(description: impl Into<String>) -> Self {
        Self::UnexpectedStructure(description.into())
    }

    pub fn http_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Missing configuration variable '{name}'")]
    MissingVar { name: &'static str },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize bookmark list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No writable data directory available")]
    NoDataDir,
}
