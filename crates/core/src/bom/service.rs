//! Rescale service - core business logic
//!
//! Orchestrates the "update finished good quantity" workflow:
//! fetch BOM → recompute → reconcile scrap stock → persist BOM.
//!
//! The workflow is not atomic. Scrap stock written during reconciliation is
//! not rolled back when the final BOM write fails.

use std::sync::Arc;

use bomwright_domain::{MissingStockPolicy, RecostSummary, Result};
use chrono::Utc;
use tracing::{error, info, instrument, warn};

use super::catalog::ScrapCatalogCache;
use super::errors::RescaleError;
use super::ports::{BomStore, ScrapInventoryStore};
use super::recost::{plan_rescale, RecostPlan, TargetQuantity};
use super::scrap_sync::ScrapReconciler;

/// BOM rescale and recost service
pub struct RescaleService {
    boms: Arc<dyn BomStore>,
    scrap: Arc<dyn ScrapInventoryStore>,
    catalog: Option<Arc<ScrapCatalogCache>>,
    missing_stock_policy: MissingStockPolicy,
}

impl RescaleService {
    /// Create a new rescale service
    pub fn new(boms: Arc<dyn BomStore>, scrap: Arc<dyn ScrapInventoryStore>) -> Self {
        Self { boms, scrap, catalog: None, missing_stock_policy: MissingStockPolicy::default() }
    }

    /// Use a scrap catalog snapshot as fallback when a stock read fails
    pub fn with_catalog(mut self, catalog: Arc<ScrapCatalogCache>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Decide what happens to a line whose stock read failed and which has
    /// no snapshot entry
    pub fn with_missing_stock_policy(mut self, policy: MissingStockPolicy) -> Self {
        self.missing_stock_policy = policy;
        self
    }

    /// Reload the scrap catalog snapshot, if one is attached.
    ///
    /// Returns the number of records loaded, `0` without a catalog.
    pub async fn refresh_catalog(&self, limit: u32) -> Result<usize> {
        match &self.catalog {
            Some(catalog) => catalog.refresh(self.scrap.as_ref(), limit).await,
            None => Ok(0),
        }
    }

    /// Rescale a BOM to a new finished-good quantity and persist it
    ///
    /// # Errors
    /// - `InvalidInput` when `target_quantity` is not a finite number > 0 or
    ///   `bom_id` is blank (no store is called)
    /// - `NotFound` / `FetchFailed` when the BOM cannot be read (nothing is
    ///   written)
    /// - `PersistFailed` when the BOM write is refused (scrap stock already
    ///   updated stays updated)
    #[instrument(skip(self), fields(bom_id = %bom_id))]
    pub async fn rescale(
        &self,
        bom_id: &str,
        target_quantity: f64,
    ) -> std::result::Result<RecostSummary, RescaleError> {
        let plan = self.preview(bom_id, target_quantity).await?;

        let mut reconciler =
            ScrapReconciler::new(self.scrap.as_ref()).with_policy(self.missing_stock_policy);
        if let Some(catalog) = self.catalog.as_deref() {
            reconciler = reconciler.with_catalog(catalog);
        }
        let scrap_sync = reconciler.reconcile(&plan.scrap_deltas).await;
        if !scrap_sync.is_clean() {
            warn!(
                failed_lines = scrap_sync.failures.len(),
                "some scrap records were not updated, persisting BOM anyway"
            );
        }

        if let Err(source) = self.boms.put_bom(bom_id, &plan.bom).await {
            error!(
                error = %source,
                error_type = source.label(),
                scrap_records_updated = scrap_sync.updated,
                "BOM write failed after scrap reconciliation"
            );
            return Err(RescaleError::PersistFailed { bom_id: bom_id.to_string(), source });
        }

        let summary = plan.summarize(scrap_sync, Utc::now());
        info!(
            multiplier = summary.multiplier,
            total_cost = summary.total_cost,
            updated_lines = summary.updated_lines,
            "BOM rescaled"
        );
        Ok(summary)
    }

    /// Fetch a BOM and compute its rescale without writing anything
    ///
    /// # Errors
    /// Same as [`Self::rescale`] minus `PersistFailed`.
    #[instrument(skip(self), fields(bom_id = %bom_id))]
    pub async fn preview(
        &self,
        bom_id: &str,
        target_quantity: f64,
    ) -> std::result::Result<RecostPlan, RescaleError> {
        let target = TargetQuantity::new(target_quantity)?;
        if bom_id.trim().is_empty() {
            return Err(RescaleError::InvalidInput("BOM id must not be empty".to_string()));
        }

        let bom = self.boms.get_bom(bom_id).await.map_err(|source| {
            warn!(error = %source, error_type = source.label(), "BOM fetch failed");
            RescaleError::from_fetch(bom_id, source)
        })?;

        let plan = plan_rescale(&bom, target);
        info!(
            original_quantity = plan.original_quantity,
            multiplier = plan.multiplier,
            raw_lines = plan.bom.raw_materials.len(),
            scrap_lines = plan.bom.scrap_materials.len(),
            "BOM recost computed"
        );
        Ok(plan)
    }
}
