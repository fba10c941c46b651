//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Bomwright
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BomwrightError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload did not match the expected entity schema.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered but refused the request (`success: false`).
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BomwrightError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Config(_) => "config",
            Self::Schema(_) => "schema",
            Self::NotFound(_) => "not_found",
            Self::Rejected(_) => "rejected",
            Self::InvalidInput(_) => "invalid_input",
            Self::Internal(_) => "internal",
        }
    }

    /// Message carried by the error, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Network(message)
            | Self::Auth(message)
            | Self::Config(message)
            | Self::Schema(message)
            | Self::NotFound(message)
            | Self::Rejected(message)
            | Self::InvalidInput(message)
            | Self::Internal(message) => message,
        }
    }
}

/// Result type alias for Bomwright operations
pub type Result<T> = std::result::Result<T, BomwrightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = BomwrightError::NotFound("bom X".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "bom X");
    }

    #[test]
    fn label_and_message() {
        let err = BomwrightError::Rejected("BOM is locked".to_string());
        assert_eq!(err.label(), "rejected");
        assert_eq!(err.message(), "BOM is locked");
        assert_eq!(err.to_string(), "Rejected by backend: BOM is locked");
    }
}
