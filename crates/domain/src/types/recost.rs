//! Results of a rescale: the recost summary and the scrap reconciliation
//! report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bom::BomId;

/// Outcome of a successful rescale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecostSummary {
    pub bom_id: BomId,
    pub multiplier: f64,
    pub finished_good_quantity: f64,
    pub finished_good_cost: f64,
    /// Raw materials plus other charges. Scrap is not included.
    pub total_cost: f64,
    pub raw_materials_cost: f64,
    pub other_charges_total: f64,
    /// Reported for reference only; see `total_cost`.
    pub scrap_materials_cost: f64,
    /// Raw and scrap lines rewritten by the rescale.
    pub updated_lines: usize,
    pub scrap_sync: ScrapSyncReport,
    pub completed_at: DateTime<Utc>,
}

/// Result of reconciling scrap stock for every scrap line of a BOM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapSyncReport {
    /// Scrap records whose stock was written.
    pub updated: usize,
    /// Lines without a resolvable scrap reference.
    pub skipped: usize,
    pub failures: Vec<ScrapSyncFailure>,
}

impl ScrapSyncReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A scrap line whose stock could not be reconciled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapSyncFailure {
    /// Position of the line in the BOM's scrap list.
    pub line_index: usize,
    pub scrap_ref: String,
    pub reason: String,
}
