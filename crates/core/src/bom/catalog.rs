//! Snapshot of the scrap catalog
//!
//! Used as a fallback when a per-item stock read fails during
//! reconciliation. The snapshot is only as fresh as its last refresh.

use std::collections::HashMap;

use bomwright_domain::constants::DEFAULT_SCRAP_CATALOG_PAGE;
use bomwright_domain::{Result, ScrapId, ScrapRecord};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

use super::ports::ScrapInventoryStore;

#[derive(Debug, Default)]
struct Snapshot {
    quantities: HashMap<ScrapId, f64>,
    loaded_at: Option<DateTime<Utc>>,
}

/// Thread-safe, refreshable map of scrap id to quantity on hand
#[derive(Debug, Default)]
pub struct ScrapCatalogCache {
    inner: RwLock<Snapshot>,
}

impl ScrapCatalogCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with the given records
    pub fn from_records(records: impl IntoIterator<Item = ScrapRecord>) -> Self {
        let cache = Self::new();
        cache.replace(records);
        cache
    }

    /// Reload the first catalog page from the store, replacing the snapshot.
    ///
    /// On error the previous snapshot is kept.
    pub async fn refresh(&self, store: &dyn ScrapInventoryStore, limit: u32) -> Result<usize> {
        let records = store.list_records(limit, DEFAULT_SCRAP_CATALOG_PAGE).await?;
        let count = self.replace(records);
        info!(records = count, "scrap catalog snapshot refreshed");
        Ok(count)
    }

    /// Last known quantity on hand for a scrap item
    pub fn quantity_of(&self, id: &str) -> Option<f64> {
        let quantity = self.inner.read().quantities.get(id).copied();
        debug!(scrap_id = id, hit = quantity.is_some(), "scrap catalog lookup");
        quantity
    }

    /// Number of records in the snapshot
    pub fn len(&self) -> usize {
        self.inner.read().quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().quantities.is_empty()
    }

    /// When the snapshot was last replaced, if ever
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().loaded_at
    }

    fn replace(&self, records: impl IntoIterator<Item = ScrapRecord>) -> usize {
        let quantities: HashMap<ScrapId, f64> = records
            .into_iter()
            .map(|record| {
                let quantity = record.quantity_or_zero();
                (record.id, quantity)
            })
            .collect();
        let count = quantities.len();

        let mut snapshot = self.inner.write();
        snapshot.quantities = quantities;
        snapshot.loaded_at = Some(Utc::now());
        count
    }
}
