//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Remote API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8085/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_API_BACKOFF_MS: u64 = 200;

// Scrap catalog snapshot (first page is enough for the fallback lookup)
pub const DEFAULT_SCRAP_CATALOG_LIMIT: u32 = 500;
pub const DEFAULT_SCRAP_CATALOG_PAGE: u32 = 1;

// Recost
/// Quantity used when a BOM records no finished-good quantity.
pub const FALLBACK_ORIGINAL_QUANTITY: f64 = 1.0;
/// Relative distance to an integer below which a product snaps before `ceil`.
pub const CEIL_SNAP_EPSILON: f64 = 1e-9;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

// User-facing messages
pub const MSG_INVALID_QUANTITY: &str = "Please enter a valid quantity";
pub const MSG_UPDATE_FAILED: &str = "Failed to update quantity";
pub const MSG_UPDATE_SUCCEEDED: &str = "Finished good quantity updated successfully!";
