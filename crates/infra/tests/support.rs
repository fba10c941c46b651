#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use bomwright_infra::{
    AccessTokenProvider, ApiClient, ApiClientConfig, HttpBomStore, HttpScrapStore,
    StaticTokenProvider,
};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TOKEN: &str = "integration-token";

/// API client pointed at `server` with a single attempt per request.
pub fn api_client(server: &MockServer) -> Arc<ApiClient> {
    let config = ApiClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout: Duration::from_secs(5),
        max_attempts: 1,
        base_backoff: Duration::from_millis(1),
    };
    let auth = StaticTokenProvider::new(TOKEN)
        .map(|provider| Arc::new(provider) as Arc<dyn AccessTokenProvider>);
    Arc::new(ApiClient::new(config, auth).expect("api client"))
}

pub fn stores(server: &MockServer) -> (Arc<HttpBomStore>, Arc<HttpScrapStore>) {
    let client = api_client(server);
    (Arc::new(HttpBomStore::new(client.clone())), Arc::new(HttpScrapStore::new(client)))
}

/// BOM for 10 units: one raw line (4 × 12.5), one scrap line (2 × 3),
/// 175 of other charges, finished good priced at 120.
pub fn bom_document(id: &str) -> Value {
    json!({
        "_id": id,
        "bom_name": "Gearbox housing",
        "parts_count": 1,
        "total_cost": 225,
        "approved": true,
        "processes": [{ "process": "casting" }],
        "remarks": "rev B",
        "finished_good": {
            "item": { "_id": "fg-1", "uom": "pcs", "category": "finished", "price": 120 },
            "description": "Cast housing",
            "quantity": "10",
            "cost": 1200
        },
        "raw_materials": [{
            "_id": "line-1",
            "item": { "_id": "al-ingot", "name": "Aluminium ingot" },
            "quantity": 4,
            "uom": "kg",
            "unit_cost": 12.5,
            "supplier": { "_id": "supplier-7", "name": "Foundry Ltd" },
            "total_part_cost": 50
        }],
        "scrap_materials": [{
            "item": { "_id": "scrap-al", "name": "Aluminium swarf" },
            "scrap_name": "Aluminium swarf",
            "quantity": 2,
            "unit_cost": 3,
            "total_part_cost": 6
        }],
        "other_charges": {
            "labour_charges": 100,
            "machinery_charges": 50,
            "electricity_charges": 20,
            "other_charges": 5
        },
        "resources": [{ "resource_id": { "_id": "cnc-3" }, "type": "machine", "customId": "RES-003" }]
    })
}

pub fn bom_response(id: &str) -> Value {
    json!({ "success": true, "message": "BOM found", "bom": bom_document(id) })
}

pub fn scrap_response(id: &str, qty: Value) -> Value {
    json!({ "success": true, "data": { "_id": id, "qty": qty } })
}

pub fn ok_response() -> Value {
    json!({ "success": true, "message": "Updated" })
}

/// JSON bodies of every request received with `method` on `path`.
pub async fn bodies(server: &MockServer, method: &str, path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == method && request.url.path() == path)
        .map(|request| serde_json::from_slice(&request.body).expect("json body"))
        .collect()
}
