//! Bill-of-materials rescaling and recosting

pub mod catalog;
pub mod errors;
pub mod ports;
pub mod recost;
pub mod scrap_sync;
pub mod service;

pub use catalog::ScrapCatalogCache;
pub use errors::RescaleError;
pub use recost::{ceil_units, plan_rescale, RecostPlan, ScrapDelta, TargetQuantity};
pub use scrap_sync::ScrapReconciler;
pub use service::RescaleService;
