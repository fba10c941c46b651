//! # Bomwright Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the BOM and scrap inventory stores
//! - The rescale-and-recost algorithm
//! - Scrap stock reconciliation
//! - The `RescaleService` use case
//!
//! ## Architecture Principles
//! - Only depends on `bomwright-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod bom;

pub use bom::ports::{BomStore, ScrapInventoryStore};
pub use bom::{
    plan_rescale, RecostPlan, RescaleError, RescaleService, ScrapCatalogCache, ScrapDelta,
    ScrapReconciler, TargetQuantity,
};
