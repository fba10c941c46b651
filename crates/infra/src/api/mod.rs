//! REST API client for the BOM / scrap backend
//!
//! - Built on [`crate::http::HttpClient`] (retries, backoff)
//! - Optional bearer authentication via [`AccessTokenProvider`]
//! - Status classification into [`ApiError`]

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::ApiError;
