//! REST-backed [`BomStore`]

use std::sync::Arc;

use async_trait::async_trait;
use bomwright_core::BomStore;
use bomwright_domain::{BillOfMaterials, BomwrightError, Result};
use tracing::{debug, instrument};

use super::wire::{BomResponse, BomUpdate, Envelope};
use crate::api::ApiClient;
use crate::errors::InfraError;

/// `GET bom/{id}` / `PUT bom/{id}` against the backend
pub struct HttpBomStore {
    client: Arc<ApiClient>,
}

impl HttpBomStore {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn path(id: &str) -> String {
        format!("bom/{}", urlencoding::encode(id))
    }
}

#[async_trait]
impl BomStore for HttpBomStore {
    #[instrument(skip(self), fields(bom_id = %id))]
    async fn get_bom(&self, id: &str) -> Result<BillOfMaterials> {
        let response: BomResponse = self.client.get(&Self::path(id)).await?;
        response.envelope.into_result("load BOM")?;

        let dto = response
            .bom
            .ok_or_else(|| BomwrightError::NotFound(format!("BOM {id} missing from response")))?;
        let bom = BillOfMaterials::try_from(dto)?;

        debug!(
            raw_lines = bom.raw_materials.len(),
            scrap_lines = bom.scrap_materials.len(),
            "BOM loaded"
        );
        Ok(bom)
    }

    #[instrument(skip(self, bom), fields(bom_id = %id))]
    async fn put_bom(&self, id: &str, bom: &BillOfMaterials) -> Result<()> {
        let body = serde_json::to_value(BomUpdate::from(bom))
            .map_err(|err| BomwrightError::from(InfraError::from(err)))?;
        let envelope: Option<Envelope> = self.client.put(&Self::path(id), &body).await?;
        envelope.unwrap_or_default().into_result("update BOM")?;

        debug!(total_cost = bom.total_cost, "BOM written");
        Ok(())
    }
}
