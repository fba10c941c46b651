//! # Bomwright Domain
//!
//! Business domain types and models for Bomwright.
//!
//! This crate contains:
//! - Bill-of-materials and scrap inventory types
//! - Recost summaries and scrap reconciliation reports
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Bomwright crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
