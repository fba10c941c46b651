//! REST-backed [`ScrapInventoryStore`]

use std::sync::Arc;

use async_trait::async_trait;
use bomwright_core::ScrapInventoryStore;
use bomwright_domain::{BomwrightError, Result, ScrapRecord};
use tracing::{debug, instrument, warn};

use super::wire::{Envelope, ScrapListResponse, ScrapQuantityUpdate, ScrapResponse};
use crate::api::ApiClient;

/// Scrap inventory endpoints of the backend
///
/// `put_quantity` overwrites the stock level; the backend has no increment
/// operation, so concurrent read-then-write cycles can lose updates.
pub struct HttpScrapStore {
    client: Arc<ApiClient>,
}

impl HttpScrapStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ScrapInventoryStore for HttpScrapStore {
    #[instrument(skip(self), fields(scrap_id = %id))]
    async fn get_record(&self, id: &str) -> Result<ScrapRecord> {
        let path = format!("scrap/get/{}", urlencoding::encode(id));
        let response: ScrapResponse = self.client.get(&path).await?;
        response.envelope.into_result("load scrap record")?;

        // An accepted read without a payload means no stock on hand yet.
        let record = match response.data {
            Some(dto) => dto.into_record(Some(id))?,
            None => {
                debug!("scrap record has no data, treating stock as empty");
                ScrapRecord { id: id.to_string(), quantity_on_hand: None }
            }
        };

        debug!(quantity_on_hand = ?record.quantity_on_hand, "scrap record loaded");
        Ok(record)
    }

    #[instrument(skip(self), fields(scrap_id = %id))]
    async fn put_quantity(&self, id: &str, quantity_on_hand: f64) -> Result<()> {
        if !quantity_on_hand.is_finite() {
            return Err(BomwrightError::InvalidInput(format!(
                "scrap {id}: refusing to write non-finite quantity"
            )));
        }

        let path = format!("scrap/update/{}", urlencoding::encode(id));
        let envelope: Option<Envelope> =
            self.client.put(&path, &ScrapQuantityUpdate { qty: quantity_on_hand }).await?;
        envelope.unwrap_or_default().into_result("update scrap record")?;

        debug!(quantity_on_hand, "scrap record written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_records(&self, limit: u32, page: u32) -> Result<Vec<ScrapRecord>> {
        let path = format!("scrap/get?limit={limit}&page={page}");
        let response: ScrapListResponse = self.client.get(&path).await?;
        response.envelope.into_result("list scrap records")?;

        let mut records = Vec::with_capacity(response.data.len());
        for dto in response.data {
            match dto.into_record(None) {
                Ok(record) => records.push(record),
                Err(err) => warn!(error = %err, "skipping malformed scrap catalog entry"),
            }
        }

        debug!(records = records.len(), "scrap catalog page loaded");
        Ok(records)
    }
}
