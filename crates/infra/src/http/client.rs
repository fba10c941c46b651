use std::time::Duration;

use bomwright_domain::constants::{
    DEFAULT_API_BACKOFF_MS, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS,
};
use bomwright_domain::{ApiConfig, BomwrightError};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// HTTP client with bounded retries and exponential backoff.
///
/// Server errors (5xx), connect failures and timeouts are retried; any other
/// response is handed back to the caller untouched.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client configured from the `api` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, BomwrightError> {
        Self::builder()
            .timeout(config.timeout())
            .max_attempts(config.max_attempts)
            .base_backoff(config.base_backoff())
            .build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, retrying transient failures.
    ///
    /// The body must be clonable (buffered JSON is) for retries to work.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, BomwrightError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 1..=attempts {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    BomwrightError::Internal("request body is a stream and cannot be retried".into())
                })?
                .build()
                .map_err(|err| BomwrightError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            let last_attempt = attempt == attempts;
            debug!(attempt, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) if response.status().is_server_error() && !last_attempt => {
                    warn!(attempt, %method, %url, status = %response.status(), "server error, retrying");
                    self.sleep_with_backoff(attempt).await;
                }
                Ok(response) => {
                    debug!(attempt, %method, %url, status = %response.status(), "received HTTP response");
                    return Ok(response);
                }
                Err(err) if !last_attempt && is_transient(&err) => {
                    warn!(attempt, %method, %url, error = %err, "HTTP request failed, retrying");
                    self.sleep_with_backoff(attempt).await;
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(BomwrightError::Internal("HTTP retry loop ended without a response".into()))
    }

    /// Delay before retry number `retry` (1-based): base, 2×base, 4×base, ...
    fn backoff_delay(&self, retry: usize) -> Duration {
        let shift = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry: usize) {
        let delay = self.backoff_delay(retry);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_API_BACKOFF_MS),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts (initial try + retries), at least 1.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, BomwrightError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("bomwright/{}", env!("CARGO_PKG_VERSION")));

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .no_proxy()
            .build()
            .map_err(|err| BomwrightError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
