//! Scrap inventory types

use serde::{Deserialize, Serialize};

/// Opaque scrap inventory identifier
pub type ScrapId = String;

/// Stock level of one scrap item as held by the scrap inventory store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapRecord {
    pub id: ScrapId,
    /// Absent when the backend has never recorded stock for the item.
    pub quantity_on_hand: Option<f64>,
}

impl ScrapRecord {
    /// Quantity on hand, counting a missing value as zero.
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity_on_hand.filter(|qty| qty.is_finite()).unwrap_or(0.0)
    }
}
