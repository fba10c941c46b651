//! Scrap stock reconciliation
//!
//! Each scrap line becomes one read-then-write against the scrap inventory
//! store. Lines run concurrently and fail independently: a failed line is
//! logged and reported, never propagated.

use bomwright_domain::{MissingStockPolicy, ScrapSyncFailure, ScrapSyncReport};
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::catalog::ScrapCatalogCache;
use super::ports::ScrapInventoryStore;
use super::recost::ScrapDelta;

enum LineOutcome {
    Updated,
    Skipped,
    Failed(ScrapSyncFailure),
}

/// Applies scrap deltas to the scrap inventory store
pub struct ScrapReconciler<'a> {
    store: &'a dyn ScrapInventoryStore,
    catalog: Option<&'a ScrapCatalogCache>,
    policy: MissingStockPolicy,
}

impl<'a> ScrapReconciler<'a> {
    /// Reconciler with no snapshot and the default policy.
    pub fn new(store: &'a dyn ScrapInventoryStore) -> Self {
        Self { store, catalog: None, policy: MissingStockPolicy::default() }
    }

    /// Fall back on this snapshot when a stock read fails
    pub fn with_catalog(mut self, catalog: &'a ScrapCatalogCache) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// What to do when a read fails and the snapshot has no entry
    pub fn with_policy(mut self, policy: MissingStockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add every delta to its scrap record's stock.
    ///
    /// All read/write pairs are issued at once and awaited together.
    pub async fn reconcile(&self, deltas: &[ScrapDelta]) -> ScrapSyncReport {
        let outcomes = join_all(deltas.iter().map(|delta| self.reconcile_line(delta))).await;

        let mut report = ScrapSyncReport::default();
        for outcome in outcomes {
            match outcome {
                LineOutcome::Updated => report.updated += 1,
                LineOutcome::Skipped => report.skipped += 1,
                LineOutcome::Failed(failure) => report.failures.push(failure),
            }
        }

        info!(
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failures.len(),
            "scrap reconciliation finished"
        );
        report
    }

    async fn reconcile_line(&self, delta: &ScrapDelta) -> LineOutcome {
        let Some(scrap_ref) = delta.scrap_ref.as_deref() else {
            debug!(line_index = delta.line_index, "scrap line has no inventory reference, skipping");
            return LineOutcome::Skipped;
        };

        let current = match self.store.get_record(scrap_ref).await {
            Ok(record) => record.quantity_or_zero(),
            Err(err) => {
                let cached = self.catalog.and_then(|catalog| catalog.quantity_of(scrap_ref));
                match (cached, self.policy) {
                    (Some(quantity), _) => {
                        warn!(
                            scrap_id = scrap_ref,
                            error = %err,
                            cached_quantity = quantity,
                            "scrap stock read failed, using catalog snapshot"
                        );
                        quantity
                    }
                    (None, MissingStockPolicy::AssumeZero) => {
                        warn!(
                            scrap_id = scrap_ref,
                            error = %err,
                            "scrap stock read failed and no snapshot entry, assuming zero"
                        );
                        0.0
                    }
                    (None, MissingStockPolicy::Skip) => {
                        warn!(
                            scrap_id = scrap_ref,
                            error = %err,
                            "scrap stock read failed and no snapshot entry, skipping write"
                        );
                        return Self::failed(delta, scrap_ref, format!("stock read failed: {err}"));
                    }
                }
            }
        };

        let new_quantity = current + delta.quantity;
        match self.store.put_quantity(scrap_ref, new_quantity).await {
            Ok(()) => {
                debug!(
                    scrap_id = scrap_ref,
                    previous = current,
                    added = delta.quantity,
                    new_quantity,
                    "scrap stock updated"
                );
                LineOutcome::Updated
            }
            Err(err) => {
                warn!(scrap_id = scrap_ref, error = %err, "scrap stock write failed");
                Self::failed(delta, scrap_ref, format!("stock write failed: {err}"))
            }
        }
    }

    fn failed(delta: &ScrapDelta, scrap_ref: &str, reason: String) -> LineOutcome {
        LineOutcome::Failed(ScrapSyncFailure {
            line_index: delta.line_index,
            scrap_ref: scrap_ref.to_string(),
            reason,
        })
    }
}
