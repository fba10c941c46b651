//! API-specific error types
//!
//! Classifies REST failures and maps them onto [`BomwrightError`] at the
//! store boundary.

use std::time::Duration;

use bomwright_domain::BomwrightError;
use thiserror::Error;

/// REST operation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The backend refused the request and said why.
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected payload: {0}")]
    Schema(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl From<ApiError> for BomwrightError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::NotFound(message) => Self::NotFound(message),
            ApiError::Rejected(message) => Self::Rejected(message),
            ApiError::Schema(message) => Self::Schema(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::RateLimit(message) | ApiError::Server(message) | ApiError::Network(message) => {
                Self::Network(message)
            }
            ApiError::Timeout(after) => Self::Network(format!("request timed out after {after:?}")),
        }
    }
}

/// Lift a transport-level domain error back into the API taxonomy.
impl From<BomwrightError> for ApiError {
    fn from(err: BomwrightError) -> Self {
        match err {
            BomwrightError::Network(message) => Self::Network(message),
            BomwrightError::Auth(message) => Self::Auth(message),
            BomwrightError::Config(message) => Self::Config(message),
            BomwrightError::Schema(message) => Self::Schema(message),
            BomwrightError::NotFound(message) => Self::NotFound(message),
            BomwrightError::Rejected(message) => Self::Rejected(message),
            BomwrightError::InvalidInput(message) => Self::Client(message),
            BomwrightError::Internal(message) => Self::Server(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_and_client_failures_keep_their_kind() {
        assert!(matches!(BomwrightError::from(ApiError::Auth("t".into())), BomwrightError::Auth(_)));
        assert!(matches!(
            BomwrightError::from(ApiError::Client("bad qty".into())),
            BomwrightError::InvalidInput(_)
        ));
        assert_eq!(
            ApiError::from(BomwrightError::NotFound("bom X".into())),
            ApiError::NotFound("bom X".into())
        );
    }

    #[test]
    fn rejection_keeps_backend_message() {
        let err = BomwrightError::from(ApiError::Rejected("BOM is locked".into()));
        assert_eq!(err, BomwrightError::Rejected("BOM is locked".into()));
        assert_eq!(ApiError::Rejected("BOM is locked".into()).to_string(), "BOM is locked");
    }

    #[test]
    fn transient_failures_become_network_errors() {
        for err in [
            ApiError::Server("502".into()),
            ApiError::RateLimit("429".into()),
            ApiError::Timeout(Duration::from_secs(30)),
        ] {
            assert!(matches!(BomwrightError::from(err), BomwrightError::Network(_)));
        }
    }
}
