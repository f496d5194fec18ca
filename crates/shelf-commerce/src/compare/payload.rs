//! The value handed from a browsing surface to the compare widget.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{CatalogSnapshot, LoadReport, Product};
use crate::compare::MAX_COMPARE_ITEMS;

/// Full product snapshots chosen for comparison, in selection order.
///
/// Products are owned copies, so later changes to the catalog that
/// produced them are not visible through a published payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedComparePayload {
    pub items: Vec<Product>,
}

impl SharedComparePayload {
    pub fn new(items: Vec<Product>) -> Self {
        Self { items }
    }

    /// Parse a JSON array of products leniently.
    ///
    /// Malformed entries are dropped and reported; the result is
    /// truncated to `MAX_COMPARE_ITEMS`.
    pub fn from_items_value(items: &Value) -> (Self, LoadReport) {
        let (snapshot, report) = CatalogSnapshot::from_entries(items);
        let payload = Self::new(snapshot.iter().take(MAX_COMPARE_ITEMS).cloned().collect());
        (payload, report)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
