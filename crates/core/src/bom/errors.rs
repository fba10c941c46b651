//! Rescale operation errors

use bomwright_domain::constants::{MSG_INVALID_QUANTITY, MSG_UPDATE_FAILED};
use bomwright_domain::BomwrightError;
use thiserror::Error;

/// Failure of a rescale as seen by the caller
///
/// Per-line scrap reconciliation problems are not errors; they are reported
/// in [`bomwright_domain::ScrapSyncReport`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RescaleError {
    /// Rejected before any store call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("BOM {bom_id} not found")]
    NotFound { bom_id: String },

    #[error("Failed to fetch BOM {bom_id}: {source}")]
    FetchFailed {
        bom_id: String,
        #[source]
        source: BomwrightError,
    },

    /// The final BOM write was refused. Scrap updates already applied stay
    /// applied.
    #[error("Failed to persist BOM {bom_id}: {source}")]
    PersistFailed {
        bom_id: String,
        #[source]
        source: BomwrightError,
    },
}

impl RescaleError {
    /// Classify a store error raised while fetching the BOM.
    pub(crate) fn from_fetch(bom_id: &str, source: BomwrightError) -> Self {
        match source {
            BomwrightError::NotFound(_) => Self::NotFound { bom_id: bom_id.to_string() },
            source => Self::FetchFailed { bom_id: bom_id.to_string(), source },
        }
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::PersistFailed { .. } => "persist_failed",
        }
    }

    /// The single notification shown to the end user.
    ///
    /// A backend rejection carries its own message, which is shown as is.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => MSG_INVALID_QUANTITY.to_string(),
            Self::FetchFailed { source: BomwrightError::Rejected(message), .. }
            | Self::PersistFailed { source: BomwrightError::Rejected(message), .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => MSG_UPDATE_FAILED.to_string(),
        }
    }
}
