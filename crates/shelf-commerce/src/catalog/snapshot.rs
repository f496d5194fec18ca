//! Immutable catalog snapshot for one render cycle.

use std::collections::HashSet;

use serde_json::Value;
use shelf_observability::StructuredLogger;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::CommerceError;

/// Keys of the tool output that may carry the product list, in lookup order.
pub const CATALOG_KEYS: [&str; 2] = ["places", "items"];

/// What was dropped while building a snapshot.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries rejected as malformed.
    pub rejected: Vec<CommerceError>,
    /// Ids that appeared more than once (later copies were dropped).
    pub duplicates: Vec<ProductId>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.duplicates.is_empty()
    }

    /// Log dropped entries as warnings.
    pub fn log_to(&self, logger: &StructuredLogger) {
        for err in &self.rejected {
            logger
                .warn_builder("catalog entry dropped")
                .field("reason", err.to_string())
                .emit();
        }
        if !self.duplicates.is_empty() {
            logger
                .warn_builder("duplicate catalog ids dropped")
                .field_list("ids", self.duplicates.iter().map(|id| id.to_string()))
                .emit();
        }
    }
}

/// Result of resolving selected ids against a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Products found, in the order the ids were given.
    pub products: Vec<Product>,
    /// Ids that did not resolve.
    pub missing: Vec<ProductId>,
}

/// Read-only, ordered set of products for the current render cycle.
///
/// Ids are unique within a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
}

impl CatalogSnapshot {
    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from products, keeping the first of repeated ids.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self::collect(products.into_iter(), &mut LoadReport::default())
    }

    /// Build a snapshot from a JSON array of catalog entries.
    ///
    /// Anything that is not an array yields an empty snapshot.
    pub fn from_entries(value: &Value) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let Some(entries) = value.as_array() else {
            return (Self::empty(), report);
        };

        let mut parsed = Vec::with_capacity(entries.len());
        for entry in entries {
            match Product::from_value(entry) {
                Ok(product) => parsed.push(product),
                Err(err) => report.rejected.push(err),
            }
        }

        let snapshot = Self::collect(parsed.into_iter(), &mut report);
        (snapshot, report)
    }

    /// Build a snapshot from a tool output (`places`, else `items`).
    pub fn from_tool_output(tool_output: Option<&Value>) -> (Self, LoadReport) {
        let entries = tool_output.and_then(|output| {
            CATALOG_KEYS
                .iter()
                .find_map(|key| output.get(*key).filter(|v| v.is_array()))
        });

        match entries {
            Some(entries) => Self::from_entries(entries),
            None => (Self::empty(), LoadReport::default()),
        }
    }

    fn collect(products: impl Iterator<Item = Product>, report: &mut LoadReport) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for product in products {
            if seen.insert(product.id.clone()) {
                kept.push(product);
            } else {
                report.duplicates.push(product.id);
            }
        }
        Self { products: kept }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Resolve ids, in order, to owned product snapshots.
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a ProductId>) -> Resolution {
        let mut products = Vec::new();
        let mut missing = Vec::new();
        for id in ids {
            match self.get(id) {
                Some(product) => products.push(product.clone()),
                None => missing.push(id.clone()),
            }
        }
        Resolution { products, missing }
    }
}

impl<'a> IntoIterator for &'a CatalogSnapshot {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
