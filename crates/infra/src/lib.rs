//! # Bomwright Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - Authenticated REST API client
//! - `BomStore` / `ScrapInventoryStore` adapters and their wire schemas
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `bomwright-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod stores;

// Re-export commonly used items
pub use api::{AccessTokenProvider, ApiClient, ApiClientConfig, ApiError, StaticTokenProvider};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use stores::{HttpBomStore, HttpScrapStore};
