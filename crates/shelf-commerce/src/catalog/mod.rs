//! Catalog module.
//!
//! Contains the product record and the per-render catalog snapshot.

mod product;
mod snapshot;

pub use product::{Price, Product};
pub use snapshot::{CatalogSnapshot, LoadReport, Resolution, CATALOG_KEYS};
