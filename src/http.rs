use backon::{ExponentialBuilder, Retryable};
use reqwest::{header, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, instrument, warn};

use crate::{
    client::NewsDesk,
    error::{ClientError, ResponseError},
};

pub struct HttpRequest {
    method: Method,
    url: String,
    query_params: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query_params: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Request execution surface shared by all api modules.
#[async_trait::async_trait]
pub(crate) trait HttpClient {
    async fn request<T: DeserializeOwned + Send>(&self, req: HttpRequest) -> Result<T, ClientError>;
    async fn request_json(&self, req: HttpRequest) -> Result<serde_json::Value, ClientError>;
    async fn request_empty(&self, req: HttpRequest) -> Result<(), ClientError>;
}

#[async_trait::async_trait]
impl HttpClient for NewsDesk {
    async fn request<T: DeserializeOwned + Send>(&self, req: HttpRequest) -> Result<T, ClientError> {
        let res = self.execute_request(req).await?;
        Ok(res.json::<T>().await?)
    }

    async fn request_json(&self, req: HttpRequest) -> Result<serde_json::Value, ClientError> {
        let res = self.execute_request(req).await?;
        Ok(res.json::<serde_json::Value>().await?)
    }

    async fn request_empty(&self, req: HttpRequest) -> Result<(), ClientError> {
        self.execute_request(req).await?;
        Ok(())
    }
}

impl NewsDesk {
    /// Executes a request under the shared bounded-retry contract: a 429 or a
    /// transport failure waits an exponentially growing delay and retries up
    /// to the attempt limit; any other failure is terminal immediately.
    #[instrument(skip(self, req), fields(method = %req.method, url = %req.url))]
    pub(crate) async fn execute_request(&self, req: HttpRequest) -> Result<Response, ClientError> {
        let policy = self.retry_policy;
        let backoff = ExponentialBuilder::default()
            .with_min_delay(policy.base_delay)
            .with_max_delay(policy.max_delay)
            .with_factor(2.0)
            .with_max_times(policy.max_attempts.saturating_sub(1));

        match (|| self.execute_single(&req))
            .retry(&backoff)
            .when(ClientError::is_retryable)
            .await
        {
            Ok(response) => {
                debug!("Request completed with status {}", response.status());
                Ok(response)
            }
            Err(err) => {
                error!("Request failed after retries: {err}");
                Err(err)
            }
        }
    }

    async fn execute_single(&self, req: &HttpRequest) -> Result<Response, ClientError> {
        let url = if req.query_params.is_empty() {
            req.url.clone()
        } else {
            let params: Vec<String> = req
                .query_params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            format!("{}?{}", req.url, params.join("&"))
        };

        let mut builder = match req.method {
            Method::GET => self.http_client.get(&url),
            Method::POST => self.http_client.post(&url),
            Method::PATCH => self.http_client.patch(&url),
            Method::DELETE => self.http_client.delete(&url),
            _ => {
                return Err(ClientError::InvalidRequest(format!(
                    "Unsupported HTTP method: {:?}",
                    req.method
                )))
            }
        };

        if let Some(body) = &req.body {
            builder = builder
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())
                .json(body);
        }

        let res = builder.send().await.map_err(|e| {
            warn!("Network error: {e}");
            ClientError::RequestError(e)
        })?;

        let status = res.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Upstream rate limit hit");
            return Err(ClientError::RateLimited);
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Non-retryable HTTP error: {} {body}", status.as_u16());
            return Err(ResponseError::http_status(status, body).into());
        }

        Ok(res)
    }
}
