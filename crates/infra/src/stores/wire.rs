//! Wire schemas of the REST backend
//!
//! The backend is loosely typed: numbers sometimes arrive as strings,
//! references arrive either populated (`{ "_id": .., ... }`) or as bare ids,
//! and optional arrays arrive as `null`. Everything is normalized here and
//! validated once, so the domain types never see those variations.
//!
//! On write the document goes back whole, with populated references
//! flattened to their ids.

use bomwright_domain::{
    BillOfMaterials, BomDetails, BomResource, BomwrightError, CatalogItem, FinishedGood,
    OtherCharges, RawMaterialLine, Result, ScrapMaterialLine, ScrapRecord,
};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/* -------------------------------------------------------------------------- */
/* Lenient field decoding */
/* -------------------------------------------------------------------------- */

/// Decode a number sent as a JSON number, a numeric string, `""` or `null`.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}"))),
        Some(other) => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// `null` decodes as the type's default (used for arrays).
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A reference that may be populated or a bare id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl Reference {
    fn into_id(self) -> Option<String> {
        let id = match self {
            Self::Id(id) | Self::Populated { id } => id,
        };
        let id = id.trim();
        (!id.is_empty()).then(|| id.to_string())
    }
}

fn reference_id(reference: Option<Reference>) -> Option<String> {
    reference.and_then(Reference::into_id)
}

/* -------------------------------------------------------------------------- */
/* Response envelope */
/* -------------------------------------------------------------------------- */

/// `{ success, message }` carried by every backend reply
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// `success: false` is a rejection carrying the backend's message.
    /// An absent flag counts as success.
    pub fn into_result(self, action: &str) -> Result<()> {
        match self.success {
            Some(false) => Err(BomwrightError::Rejected(
                self.message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| format!("backend refused to {action}")),
            )),
            _ => Ok(()),
        }
    }
}

/// `GET bom/{id}` reply
#[derive(Debug, Deserialize)]
pub struct BomResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub bom: Option<BomDto>,
}

/// `GET scrap/get/{id}` reply
#[derive(Debug, Deserialize)]
pub struct ScrapResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default)]
    pub data: Option<ScrapDto>,
}

/// `GET scrap/get?limit=..&page=..` reply
#[derive(Debug, Deserialize)]
pub struct ScrapListResponse {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ScrapDto>,
}

/* -------------------------------------------------------------------------- */
/* Scrap */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub qty: Option<f64>,
}

impl ScrapDto {
    /// `fallback_id` names the record when the payload omits `_id`.
    pub fn into_record(self, fallback_id: Option<&str>) -> Result<ScrapRecord> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .or_else(|| fallback_id.map(str::to_string))
            .ok_or_else(|| BomwrightError::Schema("scrap record without _id".into()))?;

        if let Some(qty) = self.qty {
            if !qty.is_finite() {
                return Err(BomwrightError::Schema(format!("scrap {id} has non-finite qty")));
            }
        }

        Ok(ScrapRecord { id, quantity_on_hand: self.qty })
    }
}

/// `PUT scrap/update/{id}` body
#[derive(Debug, Serialize)]
pub struct ScrapQuantityUpdate {
    pub qty: f64,
}

/* -------------------------------------------------------------------------- */
/* BOM (read side) */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Deserialize)]
pub struct BomDto {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub bom_name: Option<String>,
    #[serde(default)]
    pub parts_count: Option<Value>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub processes: Vec<Value>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub manpower: Option<Value>,
    #[serde(default)]
    pub finished_good: Option<FinishedGoodDto>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub raw_materials: Vec<RawMaterialDto>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scrap_materials: Vec<ScrapMaterialDto>,
    #[serde(default)]
    pub other_charges: Option<OtherChargesDto>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<ResourceDto>,
}

/// Finished-good catalog item; must be populated to carry its price.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FinishedGoodItemDto {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        uom: Option<String>,
        #[serde(default)]
        category: Option<String>,
        #[serde(default, deserialize_with = "lenient_f64")]
        price: Option<f64>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinishedGoodDto {
    pub item: Option<FinishedGoodItemDto>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub supporting_doc: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMaterialDto {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub item: Option<Reference>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub uom: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub assembly_phase: Option<String>,
    #[serde(default)]
    pub supplier: Option<Reference>,
    #[serde(default)]
    pub supporting_doc: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_part_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapMaterialDto {
    #[serde(default)]
    pub item: Option<Reference>,
    #[serde(default)]
    pub scrap_id: Option<Reference>,
    #[serde(default)]
    pub scrap_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub unit_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_part_cost: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherChargesDto {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub labour_charges: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub machinery_charges: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub electricity_charges: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub other_charges: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceDto {
    #[serde(default)]
    pub resource_id: Option<Reference>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub specification: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "customId", default)]
    pub custom_id: Option<String>,
}

/// Checks numeric fields of one BOM while converting it.
struct Validator<'a> {
    bom_id: &'a str,
}

impl Validator<'_> {
    fn error(&self, detail: impl std::fmt::Display) -> BomwrightError {
        BomwrightError::Schema(format!("BOM {}: {detail}", self.bom_id))
    }

    /// Present, finite and not negative.
    fn required(&self, value: Option<f64>, field: &str) -> Result<f64> {
        let value = value.ok_or_else(|| self.error(format_args!("{field} is missing")))?;
        self.non_negative(value, field)
    }

    /// Absent counts as zero; present must be finite and not negative.
    fn or_zero(&self, value: Option<f64>, field: &str) -> Result<f64> {
        value.map_or(Ok(0.0), |value| self.non_negative(value, field))
    }

    fn non_negative(&self, value: f64, field: &str) -> Result<f64> {
        if !value.is_finite() {
            return Err(self.error(format_args!("{field} is not a finite number")));
        }
        if value < 0.0 {
            return Err(self.error(format_args!("{field} is negative ({value})")));
        }
        Ok(value)
    }
}

impl TryFrom<BomDto> for BillOfMaterials {
    type Error = BomwrightError;

    fn try_from(dto: BomDto) -> Result<Self> {
        let check = Validator { bom_id: &dto.id };

        let finished_good = dto
            .finished_good
            .ok_or_else(|| check.error("finished_good is missing"))?;
        let item = match finished_good.item {
            Some(FinishedGoodItemDto::Populated { id, uom, category, price }) => {
                if price.is_none() {
                    warn!(bom_id = %dto.id, item_id = %id, "finished good item has no price, costing at 0");
                }
                CatalogItem {
                    unit_price: check.or_zero(price, "finished_good.item.price")?,
                    id,
                    uom,
                    category,
                }
            }
            Some(FinishedGoodItemDto::Id(id)) => {
                return Err(check.error(format_args!(
                    "finished good item {id} is not populated, its price is unknown"
                )))
            }
            None => return Err(check.error("finished_good.item is missing")),
        };
        let finished_good = FinishedGood {
            item,
            description: finished_good.description,
            quantity: finished_good
                .quantity
                .map(|qty| check.non_negative(qty, "finished_good.quantity"))
                .transpose()?,
            supporting_doc: finished_good.supporting_doc,
            comments: finished_good.comments,
            cost: check.or_zero(finished_good.cost, "finished_good.cost")?,
        };

        let raw_materials = dto
            .raw_materials
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                Ok::<_, BomwrightError>(RawMaterialLine {
                    line_id: line.id,
                    item_id: reference_id(line.item),
                    description: line.description,
                    quantity: check
                        .required(line.quantity, &format!("raw_materials[{index}].quantity"))?,
                    uom: line.uom,
                    unit_cost: check
                        .required(line.unit_cost, &format!("raw_materials[{index}].unit_cost"))?,
                    category: line.category,
                    assembly_phase: line.assembly_phase,
                    supplier_id: reference_id(line.supplier),
                    supporting_doc: line.supporting_doc,
                    comments: line.comments,
                    total_part_cost: check.or_zero(
                        line.total_part_cost,
                        &format!("raw_materials[{index}].total_part_cost"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let scrap_materials = dto
            .scrap_materials
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                Ok::<_, BomwrightError>(ScrapMaterialLine {
                    item_id: reference_id(line.item),
                    scrap_id: reference_id(line.scrap_id),
                    scrap_name: line.scrap_name,
                    quantity: check
                        .required(line.quantity, &format!("scrap_materials[{index}].quantity"))?,
                    unit_cost: check
                        .or_zero(line.unit_cost, &format!("scrap_materials[{index}].unit_cost"))?,
                    total_part_cost: check.or_zero(
                        line.total_part_cost,
                        &format!("scrap_materials[{index}].total_part_cost"),
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let charges = dto.other_charges.unwrap_or_default();
        let other_charges = OtherCharges {
            labour: check.or_zero(charges.labour_charges, "other_charges.labour_charges")?,
            machinery: check
                .or_zero(charges.machinery_charges, "other_charges.machinery_charges")?,
            electricity: check
                .or_zero(charges.electricity_charges, "other_charges.electricity_charges")?,
            misc: check.or_zero(charges.other_charges, "other_charges.other_charges")?,
        };

        let total_cost = check.or_zero(dto.total_cost, "total_cost")?;

        let resources = dto
            .resources
            .into_iter()
            .map(|resource| BomResource {
                resource_id: reference_id(resource.resource_id),
                kind: resource.kind,
                specification: resource.specification,
                comment: resource.comment.unwrap_or_default(),
                custom_id: resource.custom_id,
            })
            .collect();

        Ok(BillOfMaterials {
            name: dto.bom_name.unwrap_or_default(),
            finished_good,
            raw_materials,
            scrap_materials,
            other_charges,
            total_cost,
            approved: dto.approved.unwrap_or(false),
            details: BomDetails {
                parts_count: dto.parts_count,
                processes: dto.processes,
                remarks: dto.remarks,
                manpower: dto.manpower,
                resources,
            },
            id: dto.id,
        })
    }
}

/* -------------------------------------------------------------------------- */
/* BOM (write side) */
/* -------------------------------------------------------------------------- */

/// `PUT bom/{id}` body: the whole document with references as ids
#[derive(Debug, Serialize)]
pub struct BomUpdate<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub bom_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts_count: Option<&'a Value>,
    pub total_cost: f64,
    pub approved: bool,
    pub processes: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manpower: Option<&'a Value>,
    pub finished_good: FinishedGoodUpdate<'a>,
    pub raw_materials: Vec<RawMaterialUpdate<'a>>,
    pub scrap_materials: Vec<ScrapMaterialUpdate<'a>>,
    pub other_charges: OtherChargesUpdate,
    pub resources: Vec<ResourceUpdate<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FinishedGoodUpdate<'a> {
    pub item: &'a str,
    pub uom: Option<&'a str>,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
    pub quantity: Option<f64>,
    pub supporting_doc: Option<&'a str>,
    pub comments: Option<&'a str>,
    pub cost: f64,
}

#[derive(Debug, Serialize)]
pub struct RawMaterialUpdate<'a> {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub item: Option<&'a str>,
    pub description: Option<&'a str>,
    pub quantity: f64,
    pub uom: Option<&'a str>,
    pub unit_cost: f64,
    pub category: Option<&'a str>,
    pub assembly_phase: Option<&'a str>,
    pub supplier: Option<&'a str>,
    pub supporting_doc: Option<&'a str>,
    pub comments: Option<&'a str>,
    pub total_part_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct ScrapMaterialUpdate<'a> {
    pub item: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrap_id: Option<&'a str>,
    pub scrap_name: Option<&'a str>,
    pub quantity: f64,
    pub unit_cost: f64,
    pub total_part_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct OtherChargesUpdate {
    pub labour_charges: f64,
    pub machinery_charges: f64,
    pub electricity_charges: f64,
    pub other_charges: f64,
}

#[derive(Debug, Serialize)]
pub struct ResourceUpdate<'a> {
    pub resource_id: Option<&'a str>,
    #[serde(rename = "type")]
    pub kind: Option<&'a str>,
    pub specification: Option<&'a str>,
    pub comment: &'a str,
    #[serde(rename = "customId")]
    pub custom_id: Option<&'a str>,
}

impl<'a> From<&'a BillOfMaterials> for BomUpdate<'a> {
    fn from(bom: &'a BillOfMaterials) -> Self {
        let fg = &bom.finished_good;
        Self {
            id: &bom.id,
            bom_name: &bom.name,
            parts_count: bom.details.parts_count.as_ref(),
            total_cost: bom.total_cost,
            approved: bom.approved,
            processes: &bom.details.processes,
            remarks: bom.details.remarks.as_deref(),
            manpower: bom.details.manpower.as_ref(),
            finished_good: FinishedGoodUpdate {
                item: &fg.item.id,
                uom: fg.item.uom.as_deref(),
                category: fg.item.category.as_deref(),
                description: fg.description.as_deref(),
                quantity: fg.quantity,
                supporting_doc: fg.supporting_doc.as_deref(),
                comments: fg.comments.as_deref(),
                cost: fg.cost,
            },
            raw_materials: bom
                .raw_materials
                .iter()
                .map(|line| RawMaterialUpdate {
                    id: line.line_id.as_deref(),
                    item: line.item_id.as_deref(),
                    description: line.description.as_deref(),
                    quantity: line.quantity,
                    uom: line.uom.as_deref(),
                    unit_cost: line.unit_cost,
                    category: line.category.as_deref(),
                    assembly_phase: line.assembly_phase.as_deref(),
                    supplier: line.supplier_id.as_deref(),
                    supporting_doc: line.supporting_doc.as_deref(),
                    comments: line.comments.as_deref(),
                    total_part_cost: line.total_part_cost,
                })
                .collect(),
            scrap_materials: bom
                .scrap_materials
                .iter()
                .map(|line| ScrapMaterialUpdate {
                    item: line.item_id.as_deref(),
                    scrap_id: line.scrap_id.as_deref(),
                    scrap_name: line.scrap_name.as_deref(),
                    quantity: line.quantity,
                    unit_cost: line.unit_cost,
                    total_part_cost: line.total_part_cost,
                })
                .collect(),
            other_charges: OtherChargesUpdate {
                labour_charges: bom.other_charges.labour,
                machinery_charges: bom.other_charges.machinery,
                electricity_charges: bom.other_charges.electricity,
                other_charges: bom.other_charges.misc,
            },
            resources: bom
                .details
                .resources
                .iter()
                .map(|resource| ResourceUpdate {
                    resource_id: resource.resource_id.as_deref(),
                    kind: resource.kind.as_deref(),
                    specification: resource.specification.as_deref(),
                    comment: &resource.comment,
                    custom_id: resource.custom_id.as_deref(),
                })
                .collect(),
        }
    }
}
