//! Product records as they arrive in tool output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::parse_numeric;
use crate::ids::ProductId;
use crate::CommerceError;

/// A product price, which upstream catalogs send either as a number or
/// as free text (`"12,90"`, `"free"`, `"10 €"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Numeric amount in the display currency.
    Amount(f64),
    /// Preformatted or free-text price.
    Label(String),
}

impl Price {
    /// Read a price from JSON; blank labels and non-numbers are absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(Price::Amount),
            Value::String(s) if !s.trim().is_empty() => Some(Price::Label(s.clone())),
            _ => None,
        }
    }
}

/// A product in the catalog snapshot.
///
/// Only `id` is required. Every other field degrades to `None`, and the
/// formatter renders a placeholder for it. Unrecognized fields are kept
/// in `extra` so a product handed to another widget arrives whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct")]
pub struct Product {
    /// Product identity.
    pub id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Primary image reference (raw, not proxied).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Average rating; read from `rating`, else `rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Pros, as free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro: Option<String>,
    /// Cons, as free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with only an id.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            price: None,
            description: None,
            image: None,
            thumbnail: None,
            rating: None,
            pro: None,
            contro: None,
            city: None,
            extra: Map::new(),
        }
    }

    /// Parse a single catalog entry.
    pub fn from_value(value: &Value) -> Result<Self, CommerceError> {
        let raw = RawProduct::deserialize(value)?;
        Product::try_from(raw)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_pros_cons(mut self, pro: impl Into<String>, contro: impl Into<String>) -> Self {
        self.pro = Some(pro.into());
        self.contro = Some(contro.into());
        self
    }

    /// Image reference to display: `image`, else `thumbnail`.
    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().or(self.thumbnail.as_deref())
    }
}

/// Wire shape of a product before validation.
#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Value,
    #[serde(default)]
    price: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    image: Value,
    #[serde(default)]
    thumbnail: Value,
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    rate: Value,
    #[serde(default)]
    pro: Value,
    #[serde(default)]
    contro: Value,
    #[serde(default)]
    city: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawProduct> for Product {
    type Error = CommerceError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = ProductId::from_json(&raw.id)
            .ok_or_else(|| CommerceError::InvalidEntry(format!("missing product id ({})", raw.id)))?;

        Ok(Self {
            id,
            name: text(&raw.name),
            price: Price::from_json(&raw.price),
            description: text(&raw.description),
            image: text(&raw.image),
            thumbnail: text(&raw.thumbnail),
            rating: parse_numeric(&raw.rating).or_else(|| parse_numeric(&raw.rate)),
            pro: text(&raw.pro),
            contro: text(&raw.contro),
            city: text(&raw.city),
            extra: raw.extra,
        })
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_record() {
        let product = Product::from_value(&json!({
            "id": "p1",
            "name": "Trapano",
            "price": 49.9,
            "description": "Trapano a percussione",
            "image": "img/p1.jpg",
            "rating": 4.5,
            "pro": "Leggero",
            "contro": "Rumoroso",
            "city": "Milano",
            "brand": "Bosch"
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Some(Price::Amount(49.9)));
        assert_eq!(product.rating, Some(4.5));
        assert_eq!(product.city.as_deref(), Some("Milano"));
        assert_eq!(product.extra.get("brand"), Some(&json!("Bosch")));
    }

    #[test]
    fn test_missing_id_is_invalid_entry() {
        let err = Product::from_value(&json!({ "name": "No id" })).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidEntry(_)));

        let err = Product::from_value(&json!({ "id": "" })).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidEntry(_)));
    }

    #[test]
    fn test_optional_fields_degrade() {
        let product = Product::from_value(&json!({
            "id": 3,
            "name": "   ",
            "price": { "amount": 1 },
            "rating": "abc",
            "image": null
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.name, None);
        assert_eq!(product.price, None);
        assert_eq!(product.rating, None);
        assert_eq!(product.image_ref(), None);
    }

    #[test]
    fn test_rate_is_rating_fallback() {
        let product = Product::from_value(&json!({ "id": "p", "rate": "4.25" })).unwrap();
        assert_eq!(product.rating, Some(4.25));

        let product =
            Product::from_value(&json!({ "id": "p", "rating": 3, "rate": 5 })).unwrap();
        assert_eq!(product.rating, Some(3.0));
    }

    #[test]
    fn test_string_price_kept_as_label() {
        let product = Product::from_value(&json!({ "id": "p", "price": "10 €" })).unwrap();
        assert_eq!(product.price, Some(Price::Label("10 €".into())));
    }

    #[test]
    fn test_image_falls_back_to_thumbnail() {
        let product = Product::from_value(&json!({ "id": "p", "thumbnail": "t.png" })).unwrap();
        assert_eq!(product.image_ref(), Some("t.png"));
    }

    #[test]
    fn test_serialize_keeps_extra_and_skips_absent() {
        let product = Product::from_value(&json!({ "id": "p", "price": 2, "sku": "X1" })).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value, json!({ "id": "p", "price": 2.0, "sku": "X1" }));

        let back: Product = serde_json::from_value(value).unwrap();
        assert_eq!(back, product);
    }
}
