//! HTTP adapters for the core store ports

pub mod bom_store;
pub mod scrap_store;
pub mod wire;

pub use bom_store::HttpBomStore;
pub use scrap_store::HttpScrapStore;
