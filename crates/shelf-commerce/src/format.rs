//! Display formatting for product attributes.
//!
//! Every surface renders prices, ratings and optional text through the
//! [`Formatter`] here, so the three widgets cannot drift apart.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Price;

/// Formatting section of the shelf configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Currency symbol appended to prices (e.g. "€").
    pub currency_symbol: String,
    /// Glyph shown for any missing value.
    pub placeholder: String,
    /// Shown in the selection dialog when a product has no price.
    pub unavailable_price: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "\u{20ac}".to_string(),
            placeholder: "\u{2014}".to_string(),
            unavailable_price: "Prezzo non disponibile".to_string(),
        }
    }
}

/// Formats product attributes into display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formatter {
    settings: FormatSettings,
}

impl Formatter {
    pub fn new(settings: FormatSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// The placeholder glyph.
    pub fn placeholder(&self) -> &str {
        &self.settings.placeholder
    }

    /// Format a price.
    ///
    /// Numbers get two decimals and the currency suffix; labels get the
    /// suffix unless they already carry the symbol.
    ///
    /// ```
    /// use shelf_commerce::{catalog::Price, format::Formatter};
    /// let f = Formatter::default();
    /// assert_eq!(f.price(Some(&Price::Amount(1.5))), "1.50 \u{20ac}");
    /// assert_eq!(f.price(None), "\u{2014}");
    /// ```
    pub fn price(&self, price: Option<&Price>) -> String {
        let symbol = &self.settings.currency_symbol;
        match price {
            Some(Price::Amount(amount)) if amount.is_finite() => {
                format!("{} {}", to_fixed(*amount, 2), symbol)
            }
            Some(Price::Label(label)) if !label.trim().is_empty() => {
                if label.contains(symbol.as_str()) {
                    label.clone()
                } else {
                    format!("{} {}", label, symbol)
                }
            }
            _ => self.settings.placeholder.clone(),
        }
    }

    /// Format a price from raw JSON.
    pub fn price_value(&self, value: &Value) -> String {
        self.price(Price::from_json(value).as_ref())
    }

    /// Price subtitle in the selection dialog.
    pub fn price_hint(&self, price: Option<&Price>) -> String {
        let formatted = self.price(price);
        if formatted == self.settings.placeholder {
            self.settings.unavailable_price.clone()
        } else {
            formatted
        }
    }

    /// Format a rating to one decimal.
    pub fn rating(&self, rating: Option<f64>) -> String {
        match rating {
            Some(value) if value.is_finite() => to_fixed(value, 1),
            _ => self.settings.placeholder.clone(),
        }
    }

    /// Format a rating from raw JSON; non-numeric input is a placeholder.
    pub fn rating_value(&self, value: &Value) -> String {
        self.rating(parse_numeric(value))
    }

    /// Optional text, or the placeholder.
    pub fn text(&self, value: Option<&str>) -> String {
        match value {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => self.settings.placeholder.clone(),
        }
    }
}

/// Read a number from JSON, accepting numeric strings.
///
/// Blank strings, booleans and structured values are not numbers.
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Fractional digits needed to write any `f64` exactly.
const EXACT_DIGITS: usize = 1074;

/// Fixed-point text for a finite value, rounding its exact decimal
/// expansion half away from zero.
///
/// A binary value such as `2.675` sits just below the half, so it rounds
/// down to `2.67`.
fn to_fixed(value: f64, places: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .collect();
    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(*d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| char::from(*d)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn f() -> Formatter {
        Formatter::default()
    }

    #[test]
    fn test_price_number() {
        assert_eq!(f().price(Some(&Price::Amount(1.5))), "1.50 €");
        assert_eq!(f().price(Some(&Price::Amount(49.999))), "50.00 €");
        assert_eq!(f().price(Some(&Price::Amount(0.0))), "0.00 €");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(f().price(Some(&Price::Label("free".into()))), "free €");
        assert_eq!(f().price(Some(&Price::Label("10 €".into()))), "10 €");
        assert_eq!(f().price(Some(&Price::Label("  ".into()))), "—");
    }

    #[test]
    fn test_price_absent() {
        assert_eq!(f().price(None), "—");
        assert_eq!(f().price_value(&json!(null)), "—");
        assert_eq!(f().price_value(&json!(true)), "—");
        assert_eq!(f().price_value(&json!("free")), "free €");
    }

    #[test]
    fn test_price_uses_configured_symbol() {
        let f = Formatter::new(FormatSettings {
            currency_symbol: "CHF".into(),
            ..FormatSettings::default()
        });
        assert_eq!(f.price(Some(&Price::Amount(3.0))), "3.00 CHF");
        assert_eq!(f.price(Some(&Price::Label("3 CHF".into()))), "3 CHF");
    }

    #[test]
    fn test_price_hint() {
        assert_eq!(f().price_hint(None), "Prezzo non disponibile");
        assert_eq!(f().price_hint(Some(&Price::Amount(2.0))), "2.00 €");
    }

    #[test]
    fn test_rating() {
        assert_eq!(f().rating(Some(4.666)), "4.7");
        assert_eq!(f().rating(Some(4.25)), "4.3");
        assert_eq!(f().rating(Some(5.0)), "5.0");
        assert_eq!(f().rating(None), "—");
    }

    #[test]
    fn test_rating_value() {
        assert_eq!(f().rating_value(&json!(4.666)), "4.7");
        assert_eq!(f().rating_value(&json!(null)), "—");
        assert_eq!(f().rating_value(&json!("abc")), "—");
        assert_eq!(f().rating_value(&json!("3.14")), "3.1");
    }

    #[test]
    fn test_rounding_follows_binary_value() {
        assert_eq!(f().rating(Some(4.35)), "4.3");
        assert_eq!(f().rating(Some(0.05)), "0.1");
        assert_eq!(f().price(Some(&Price::Amount(2.675))), "2.67 €");
        assert_eq!(f().price(Some(&Price::Amount(1.045))), "1.04 €");
        assert_eq!(f().price(Some(&Price::Amount(0.125))), "0.13 €");
        assert_eq!(f().price(Some(&Price::Amount(9.995))), "9.99 €");
        assert_eq!(f().price(Some(&Price::Amount(99.999))), "100.00 €");
        assert_eq!(f().price(Some(&Price::Amount(-1.5))), "-1.50 €");
    }

    #[test]
    fn test_large_price_stays_finite() {
        let text = f().price(Some(&Price::Amount(1e307)));
        assert!(text.ends_with(".00 €"), "{text}");
        assert!(!text.contains("inf"));
        assert_eq!(text.len(), 307 + ".00 €".len());
    }

    #[test]
    fn test_text() {
        assert_eq!(f().text(Some("Leggero")), "Leggero");
        assert_eq!(f().text(Some("")), "—");
        assert_eq!(f().text(None), "—");
    }
}
