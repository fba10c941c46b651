//! In-memory mock implementations of the store ports
//!
//! Every call is counted so tests can assert which network calls a rescale
//! would have made.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bomwright_core::{BomStore, ScrapInventoryStore};
use bomwright_domain::{BillOfMaterials, BomwrightError, Result as DomainResult, ScrapRecord};
use parking_lot::Mutex;

/// Call counters shared between a mock and the test holding it.
#[derive(Debug, Default)]
pub struct CallLog {
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub lists: AtomicUsize,
}

impl CallLog {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.reads() + self.writes() + self.lists()
    }
}

/// In-memory `BomStore`.
#[derive(Default)]
pub struct MockBomStore {
    documents: Mutex<HashMap<String, BillOfMaterials>>,
    reject_writes: Option<BomwrightError>,
    fail_reads: Option<BomwrightError>,
    pub calls: Arc<CallLog>,
    pub written: Mutex<Vec<BillOfMaterials>>,
}

impl MockBomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bom(self, bom: BillOfMaterials) -> Self {
        self.documents.lock().insert(bom.id.clone(), bom);
        self
    }

    /// Every `put_bom` fails with `err`.
    pub fn rejecting_writes(mut self, err: BomwrightError) -> Self {
        self.reject_writes = Some(err);
        self
    }

    /// Every `get_bom` fails with `err`.
    pub fn failing_reads(mut self, err: BomwrightError) -> Self {
        self.fail_reads = Some(err);
        self
    }

    pub fn stored(&self, id: &str) -> Option<BillOfMaterials> {
        self.documents.lock().get(id).cloned()
    }
}

#[async_trait]
impl BomStore for MockBomStore {
    async fn get_bom(&self, id: &str) -> DomainResult<BillOfMaterials> {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_reads {
            return Err(err.clone());
        }
        self.documents
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| BomwrightError::NotFound(format!("BOM {id} not found")))
    }

    async fn put_bom(&self, id: &str, bom: &BillOfMaterials) -> DomainResult<()> {
        self.calls.writes.fetch_add(1, Ordering::SeqCst);
        self.written.lock().push(bom.clone());
        if let Some(err) = &self.reject_writes {
            return Err(err.clone());
        }
        self.documents.lock().insert(id.to_string(), bom.clone());
        Ok(())
    }
}

/// In-memory `ScrapInventoryStore`.
#[derive(Default)]
pub struct MockScrapStore {
    stock: Mutex<HashMap<String, f64>>,
    unreadable: Mutex<HashSet<String>>,
    unwritable: Mutex<HashSet<String>>,
    pub calls: Arc<CallLog>,
    pub writes: Mutex<Vec<(String, f64)>>,
}

impl MockScrapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(self, id: &str, quantity: f64) -> Self {
        self.stock.lock().insert(id.to_string(), quantity);
        self
    }

    /// Reads of `id` fail with a network error.
    pub fn unreadable(self, id: &str) -> Self {
        self.unreadable.lock().insert(id.to_string());
        self
    }

    /// Writes to `id` are rejected.
    pub fn unwritable(self, id: &str) -> Self {
        self.unwritable.lock().insert(id.to_string());
        self
    }

    pub fn stock_of(&self, id: &str) -> Option<f64> {
        self.stock.lock().get(id).copied()
    }
}

#[async_trait]
impl ScrapInventoryStore for MockScrapStore {
    async fn get_record(&self, id: &str) -> DomainResult<ScrapRecord> {
        self.calls.reads.fetch_add(1, Ordering::SeqCst);
        if self.unreadable.lock().contains(id) {
            return Err(BomwrightError::Network(format!("GET scrap/get/{id} failed")));
        }
        Ok(ScrapRecord { id: id.to_string(), quantity_on_hand: self.stock_of(id) })
    }

    async fn put_quantity(&self, id: &str, quantity_on_hand: f64) -> DomainResult<()> {
        self.calls.writes.fetch_add(1, Ordering::SeqCst);
        if self.unwritable.lock().contains(id) {
            return Err(BomwrightError::Rejected(format!("scrap {id} is locked")));
        }
        self.stock.lock().insert(id.to_string(), quantity_on_hand);
        self.writes.lock().push((id.to_string(), quantity_on_hand));
        Ok(())
    }

    async fn list_records(&self, limit: u32, _page: u32) -> DomainResult<Vec<ScrapRecord>> {
        self.calls.lists.fetch_add(1, Ordering::SeqCst);
        let mut records: Vec<ScrapRecord> = self
            .stock
            .lock()
            .iter()
            .map(|(id, qty)| ScrapRecord { id: id.clone(), quantity_on_hand: Some(*qty) })
            .collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records.truncate(limit as usize);
        Ok(records)
    }
}
