//! BOM fixtures

use bomwright_domain::{
    BillOfMaterials, BomDetails, BomResource, CatalogItem, FinishedGood, OtherCharges,
    RawMaterialLine, ScrapMaterialLine,
};

pub fn raw_line(item_id: &str, quantity: f64, unit_cost: f64) -> RawMaterialLine {
    RawMaterialLine {
        line_id: Some(format!("line-{item_id}")),
        item_id: Some(item_id.to_string()),
        description: Some(format!("{item_id} stock")),
        quantity,
        uom: Some("pcs".to_string()),
        unit_cost,
        category: Some("raw-material".to_string()),
        assembly_phase: None,
        supplier_id: Some("supplier-7".to_string()),
        supporting_doc: None,
        comments: None,
        total_part_cost: (quantity * unit_cost).ceil(),
    }
}

pub fn scrap_line(scrap_ref: Option<&str>, quantity: f64, unit_cost: f64) -> ScrapMaterialLine {
    ScrapMaterialLine {
        item_id: scrap_ref.map(str::to_string),
        scrap_id: None,
        scrap_name: Some("swarf".to_string()),
        quantity,
        unit_cost,
        total_part_cost: (quantity * unit_cost).ceil(),
    }
}

/// BOM for 10 units: two raw lines, two scrap lines, 175 of other charges.
pub fn sample_bom(id: &str) -> BillOfMaterials {
    BillOfMaterials {
        id: id.to_string(),
        name: "Gearbox housing".to_string(),
        finished_good: FinishedGood {
            item: CatalogItem {
                id: "gearbox-housing".to_string(),
                unit_price: 120.0,
                uom: Some("pcs".to_string()),
                category: Some("finished-goods".to_string()),
            },
            description: Some("Cast housing".to_string()),
            quantity: Some(10.0),
            supporting_doc: None,
            comments: None,
            cost: 1200.0,
        },
        raw_materials: vec![raw_line("aluminium-ingot", 4.0, 12.5), raw_line("bolt-m8", 40.0, 0.3)],
        scrap_materials: vec![scrap_line(Some("scrap-al"), 2.0, 3.0), scrap_line(Some("scrap-steel"), 1.0, 1.5)],
        other_charges: OtherCharges { labour: 100.0, machinery: 50.0, electricity: 20.0, misc: 5.0 },
        total_cost: 237.0,
        approved: true,
        details: BomDetails {
            parts_count: Some(serde_json::json!(2)),
            processes: vec![serde_json::json!("casting"), serde_json::json!("machining")],
            remarks: Some("rev B".to_string()),
            manpower: None,
            resources: vec![BomResource {
                resource_id: Some("cnc-3".to_string()),
                kind: Some("machine".to_string()),
                specification: None,
                comment: String::new(),
                custom_id: Some("RES-003".to_string()),
            }],
        },
    }
}
