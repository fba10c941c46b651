//! Authenticated JSON client for the REST backend
//!
//! Wraps [`HttpClient`] with base-URL joining, bearer authentication, an
//! overall per-call deadline and status classification.

use std::sync::Arc;
use std::time::Duration;

use bomwright_domain::ApiConfig;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for [`ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Base URL the resource paths are appended to, e.g.
    /// `https://erp.example.com/api`
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub max_attempts: usize,
    pub base_backoff: Duration,
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            max_attempts: config.max_attempts.max(1),
            base_backoff: config.base_backoff(),
        }
    }
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl ApiClientConfig {
    /// Deadline for one call including its retries.
    fn call_deadline(&self) -> Duration {
        let attempts = u32::try_from(self.max_attempts.max(1)).unwrap_or(u32::MAX);
        self.timeout.saturating_add(self.base_backoff).saturating_mul(attempts)
    }
}

/// REST client with retries and optional bearer auth
pub struct ApiClient {
    http: Arc<HttpClient>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a client. Without an `auth` provider no `Authorization` header
    /// is sent.
    ///
    /// # Errors
    /// `ApiError::Config` when the base URL is empty or the HTTP client
    /// cannot be built.
    pub fn new(
        config: ApiClientConfig,
        auth: Option<Arc<dyn AccessTokenProvider>>,
    ) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("API base URL must not be empty".into()));
        }

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .base_backoff(config.base_backoff)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http: Arc::new(http), auth, config })
    }

    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET {base_url}/{path}` and decode the JSON body.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, None).await?;
        Self::decode(response).await
    }

    /// `PUT {base_url}/{path}` with a JSON body and decode the JSON reply.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))?;
        let response = self.execute(Method::PUT, path, Some(body)).await?;
        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!(%method, url = %url, "API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(auth) = &self.auth {
            let token = auth.access_token().await?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let deadline = self.config.call_deadline();
        let response = match tokio::time::timeout(deadline, self.http.send(request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => {
                warn!(%method, url = %url, ?deadline, "API call deadline exceeded");
                return Err(ApiError::Timeout(deadline));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::map_status_error(status, &url, &body);
            warn!(%method, url = %url, %status, error = %err, "API call failed");
            return Err(err);
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {e}")))?;

        // 204/205 and empty bodies decode as JSON null
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || text.trim().is_empty()
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Schema(format!("empty response body ({})", status.as_u16()))
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Schema(format!("Failed to parse response: {e}")))
    }

    /// Classify a non-2xx response. A JSON `message` in the body is
    /// preferred over the raw body text.
    fn map_status_error(status: StatusCode, url: &str, body: &str) -> ApiError {
        let backend_message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|message| !message.trim().is_empty());

        let message = match (&backend_message, body.trim().is_empty()) {
            (Some(message), _) => format!("{url} returned status {status}: {message}"),
            (None, true) => format!("{url} returned status {status}"),
            (None, false) => format!("{url} returned status {status}: {body}"),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit(message),
            s if s.is_server_error() => ApiError::Server(message),
            s if s.is_client_error() => match backend_message {
                Some(reason) => ApiError::Rejected(reason),
                None => ApiError::Client(message),
            },
            _ => ApiError::Network(message),
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClientBuilder {
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        ApiClient::new(self.config.unwrap_or_default(), self.auth)
    }
}
