//! Bill-of-materials types
//!
//! A BOM is always rewritten as a whole document, so every field the backend
//! sends is modelled here, including the descriptive ones the recost never
//! touches (they travel in [`BomDetails`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque BOM identifier assigned by the backend
pub type BomId = String;

/// Bill of materials for one finished good
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    pub id: BomId,
    pub name: String,
    pub finished_good: FinishedGood,
    #[serde(default)]
    pub raw_materials: Vec<RawMaterialLine>,
    #[serde(default)]
    pub scrap_materials: Vec<ScrapMaterialLine>,
    #[serde(default)]
    pub other_charges: OtherCharges,
    pub total_cost: f64,
    pub approved: bool,
    #[serde(default)]
    pub details: BomDetails,
}

impl BillOfMaterials {
    /// Sum of the raw-material line costs.
    pub fn raw_materials_cost(&self) -> f64 {
        self.raw_materials.iter().map(|line| line.total_part_cost).sum()
    }

    /// Sum of the scrap line costs. Informational: not part of `total_cost`.
    pub fn scrap_materials_cost(&self) -> f64 {
        self.scrap_materials.iter().map(|line| line.total_part_cost).sum()
    }

    /// `total_cost` as derived from the current lines and charges.
    pub fn derived_total_cost(&self) -> f64 {
        self.raw_materials_cost() + self.other_charges.total()
    }

    /// Number of material lines (raw + scrap).
    pub fn line_count(&self) -> usize {
        self.raw_materials.len() + self.scrap_materials.len()
    }
}

/// The product a BOM produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishedGood {
    pub item: CatalogItem,
    pub description: Option<String>,
    /// Batch size the BOM is currently scaled to. Absent on some legacy
    /// documents.
    pub quantity: Option<f64>,
    pub supporting_doc: Option<String>,
    pub comments: Option<String>,
    pub cost: f64,
}

/// Catalog item a finished good refers to
///
/// Unit of measure, category and unit price live on the catalog item, not on
/// the BOM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    #[serde(default)]
    pub unit_price: f64,
    pub uom: Option<String>,
    pub category: Option<String>,
}

/// One raw material consumed by the finished good
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterialLine {
    pub line_id: Option<String>,
    pub item_id: Option<String>,
    pub description: Option<String>,
    pub quantity: f64,
    pub uom: Option<String>,
    pub unit_cost: f64,
    pub category: Option<String>,
    pub assembly_phase: Option<String>,
    pub supplier_id: Option<String>,
    pub supporting_doc: Option<String>,
    pub comments: Option<String>,
    pub total_part_cost: f64,
}

/// Scrap produced as a byproduct of the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapMaterialLine {
    pub item_id: Option<String>,
    pub scrap_id: Option<String>,
    pub scrap_name: Option<String>,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_part_cost: f64,
}

impl ScrapMaterialLine {
    /// Identifier of the scrap inventory record this line feeds.
    ///
    /// The item reference wins over the scrap id; blank strings count as
    /// missing.
    pub fn inventory_ref(&self) -> Option<&str> {
        [self.item_id.as_deref(), self.scrap_id.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|id| !id.is_empty())
    }
}

/// Charges on top of materials; rescaling never changes them
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherCharges {
    pub labour: f64,
    pub machinery: f64,
    pub electricity: f64,
    pub misc: f64,
}

impl OtherCharges {
    /// Sum of all charge heads.
    pub fn total(&self) -> f64 {
        self.labour + self.machinery + self.electricity + self.misc
    }
}

/// Descriptive parts of a BOM carried through a rewrite unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomDetails {
    pub parts_count: Option<Value>,
    #[serde(default)]
    pub processes: Vec<Value>,
    pub remarks: Option<String>,
    pub manpower: Option<Value>,
    #[serde(default)]
    pub resources: Vec<BomResource>,
}

/// Machine or tool assigned to a BOM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomResource {
    pub resource_id: Option<String>,
    pub kind: Option<String>,
    pub specification: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub custom_id: Option<String>,
}
