//! Rescale arithmetic
//!
//! Everything here is pure: given a BOM and a target quantity it produces the
//! rewritten document plus the scrap stock deltas. Rounding is always upward
//! so a rescaled BOM never under-provisions material.

use bomwright_domain::constants::{CEIL_SNAP_EPSILON, FALLBACK_ORIGINAL_QUANTITY};
use bomwright_domain::{
    BillOfMaterials, FinishedGood, RawMaterialLine, RecostSummary, ScrapMaterialLine,
    ScrapSyncReport,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::errors::RescaleError;

/// Finished-good quantity a caller asked for, validated to be finite and > 0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct TargetQuantity(f64);

impl TargetQuantity {
    /// Reject zero, negative and non-finite quantities.
    pub fn new(value: f64) -> Result<Self, RescaleError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(RescaleError::InvalidInput(format!(
                "target quantity must be a finite number greater than zero, got {value}"
            )))
        }
    }

    /// The validated quantity.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Round up to a whole unit.
///
/// Products that land within a relative `1e-9` of an integer snap to it
/// first, so `3.0000000000000004` stays `3` instead of becoming `4`.
pub fn ceil_units(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= CEIL_SNAP_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        value.ceil()
    }
}

/// Stock increment owed to one scrap inventory record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapDelta {
    /// Position of the line in the BOM's scrap list.
    pub line_index: usize,
    /// `None` when the line references no inventory record.
    pub scrap_ref: Option<String>,
    /// The rescaled scrap quantity, added on top of current stock.
    pub quantity: f64,
}

/// Fully recomputed BOM, ready to be persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecostPlan {
    pub original_quantity: f64,
    /// The BOM carried no usable finished-good quantity and `1` was assumed.
    pub used_fallback_quantity: bool,
    pub target_quantity: f64,
    pub multiplier: f64,
    pub raw_materials_cost: f64,
    pub scrap_materials_cost: f64,
    pub other_charges_total: f64,
    pub total_cost: f64,
    pub scrap_deltas: Vec<ScrapDelta>,
    /// The replacement document.
    pub bom: BillOfMaterials,
}

impl RecostPlan {
    /// Summarize the plan once it has been applied.
    pub fn summarize(&self, scrap_sync: ScrapSyncReport, completed_at: DateTime<Utc>) -> RecostSummary {
        RecostSummary {
            bom_id: self.bom.id.clone(),
            multiplier: self.multiplier,
            finished_good_quantity: self.target_quantity,
            finished_good_cost: self.bom.finished_good.cost,
            total_cost: self.total_cost,
            raw_materials_cost: self.raw_materials_cost,
            other_charges_total: self.other_charges_total,
            scrap_materials_cost: self.scrap_materials_cost,
            updated_lines: self.bom.line_count(),
            scrap_sync,
            completed_at,
        }
    }
}

/// Quantity the BOM is currently scaled to.
///
/// Absent, zero, negative or non-finite quantities fall back to `1`, which
/// makes the multiplier equal to the raw target.
fn original_quantity(finished_good: &FinishedGood) -> (f64, bool) {
    match finished_good.quantity {
        Some(qty) if qty.is_finite() && qty > 0.0 => (qty, false),
        _ => (FALLBACK_ORIGINAL_QUANTITY, true),
    }
}

fn rescale_raw_line(line: &RawMaterialLine, multiplier: f64) -> RawMaterialLine {
    let quantity = ceil_units(line.quantity * multiplier);
    RawMaterialLine {
        quantity,
        total_part_cost: ceil_units(quantity * line.unit_cost),
        ..line.clone()
    }
}

fn rescale_scrap_line(line: &ScrapMaterialLine, multiplier: f64) -> ScrapMaterialLine {
    let quantity = ceil_units(line.quantity * multiplier);
    ScrapMaterialLine {
        quantity,
        total_part_cost: ceil_units(quantity * line.unit_cost),
        ..line.clone()
    }
}

/// Rescale `bom` to `target` and recompute every derived cost.
///
/// The returned document is unapproved, carries `target` as its finished-good
/// quantity and has `total_cost = raw materials + other charges`. Scrap line
/// costs are recomputed but stay out of `total_cost`.
pub fn plan_rescale(bom: &BillOfMaterials, target: TargetQuantity) -> RecostPlan {
    let (original_quantity, used_fallback_quantity) = original_quantity(&bom.finished_good);
    if used_fallback_quantity {
        warn!(
            bom_id = %bom.id,
            recorded_quantity = ?bom.finished_good.quantity,
            "BOM has no usable finished-good quantity, assuming 1"
        );
    }

    let target_quantity = target.get();
    let multiplier = target_quantity / original_quantity;

    let raw_materials: Vec<RawMaterialLine> =
        bom.raw_materials.iter().map(|line| rescale_raw_line(line, multiplier)).collect();
    let scrap_materials: Vec<ScrapMaterialLine> =
        bom.scrap_materials.iter().map(|line| rescale_scrap_line(line, multiplier)).collect();

    let scrap_deltas = scrap_materials
        .iter()
        .enumerate()
        .map(|(line_index, line)| ScrapDelta {
            line_index,
            scrap_ref: line.inventory_ref().map(str::to_string),
            quantity: line.quantity,
        })
        .collect();

    let finished_good = FinishedGood {
        quantity: Some(target_quantity),
        cost: bom.finished_good.item.unit_price * target_quantity,
        ..bom.finished_good.clone()
    };

    let mut updated = BillOfMaterials {
        finished_good,
        raw_materials,
        scrap_materials,
        approved: false,
        ..bom.clone()
    };

    let total_cost = updated.derived_total_cost();
    updated.total_cost = total_cost;

    RecostPlan {
        original_quantity,
        used_fallback_quantity,
        target_quantity,
        multiplier,
        raw_materials_cost: updated.raw_materials_cost(),
        scrap_materials_cost: updated.scrap_materials_cost(),
        other_charges_total: updated.other_charges.total(),
        total_cost,
        scrap_deltas,
        bom: updated,
    }
}
