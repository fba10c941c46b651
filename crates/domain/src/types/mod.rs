//! Domain types and models

pub mod bom;
pub mod recost;
pub mod scrap;

pub use bom::{
    BillOfMaterials, BomDetails, BomId, BomResource, CatalogItem, FinishedGood, OtherCharges,
    RawMaterialLine, ScrapMaterialLine,
};
pub use recost::{RecostSummary, ScrapSyncFailure, ScrapSyncReport};
pub use scrap::{ScrapId, ScrapRecord};
