//! Bearer credentials for the REST backend

use std::fmt;

use async_trait::async_trait;

use super::errors::ApiError;

/// Supplies the bearer token attached to every API call
///
/// Fetched per request so implementations can refresh.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Fixed token, typically read from `BOMWRIGHT_API_TOKEN`
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Returns `None` for a blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        (!token.is_empty()).then_some(Self { token })
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_trimmed_token() {
        let provider = StaticTokenProvider::new("  abc123\n").unwrap();
        assert_eq!(provider.access_token().await.unwrap(), "abc123");
    }

    #[test]
    fn blank_token_is_rejected() {
        assert!(StaticTokenProvider::new("   ").is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let provider = StaticTokenProvider::new("super-secret").unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
