//! Cart entries.

use serde::{Deserialize, Serialize};

use crate::catalog::{Price, Product};
use crate::ids::ProductId;

/// A product as it was when it went into the cart.
///
/// Entries are copies: later changes to the catalog do not reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Image reference captured at insertion (`image`, else `thumbnail`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl CartEntry {
    /// Snapshot a product into a cart entry.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.clone(),
            description: product.description.clone(),
            thumbnail: product.image_ref().map(str::to_string),
        }
    }
}

impl From<&Product> for CartEntry {
    fn from(product: &Product) -> Self {
        Self::from_product(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_is_a_snapshot() {
        let mut product = Product::new("p1")
            .with_name("Trapano")
            .with_price(Price::Amount(49.9))
            .with_image("img.png");
        let entry = CartEntry::from_product(&product);

        product.name = Some("Renamed".into());
        product.price = Some(Price::Amount(1.0));

        assert_eq!(entry.name.as_deref(), Some("Trapano"));
        assert_eq!(entry.price, Some(Price::Amount(49.9)));
        assert_eq!(entry.thumbnail.as_deref(), Some("img.png"));
    }

    #[test]
    fn test_thumbnail_fallback() {
        let mut product = Product::new("p2");
        product.thumbnail = Some("thumb.png".into());
        assert_eq!(
            CartEntry::from(&product).thumbnail.as_deref(),
            Some("thumb.png")
        );
    }
}
