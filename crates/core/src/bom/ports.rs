//! Port interfaces for the remote BOM and scrap inventory stores
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use bomwright_domain::{BillOfMaterials, Result, ScrapRecord};

/// Document store holding bills of materials
#[async_trait]
pub trait BomStore: Send + Sync {
    /// Fetch a BOM by id
    ///
    /// Returns `BomwrightError::NotFound` when the store has no such document.
    async fn get_bom(&self, id: &str) -> Result<BillOfMaterials>;

    /// Replace the stored BOM with `bom` as a whole document
    ///
    /// There is no conflict detection: concurrent writers are
    /// last-writer-wins.
    async fn put_bom(&self, id: &str, bom: &BillOfMaterials) -> Result<()>;
}

/// Store owning scrap stock levels
///
/// Stock is updated by reading the current quantity and writing back the
/// sum. The store offers no compare-and-swap, so two rescales touching the
/// same scrap item at the same time can lose one increment.
#[async_trait]
pub trait ScrapInventoryStore: Send + Sync {
    /// Read the current stock record for a scrap item
    async fn get_record(&self, id: &str) -> Result<ScrapRecord>;

    /// Overwrite the quantity on hand for a scrap item
    async fn put_quantity(&self, id: &str, quantity_on_hand: f64) -> Result<()>;

    /// List one page of scrap records (used to build the catalog snapshot)
    async fn list_records(&self, limit: u32, page: u32) -> Result<Vec<ScrapRecord>>;
}
