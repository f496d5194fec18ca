//! Product identity.
//!
//! Catalog payloads come from tool output, where ids show up as strings
//! or as numbers. Both are normalized to one string form so that a
//! product published as `7` and one selected as `"7"` are the same.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque identity of a product within a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from a string, without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create an ID, rejecting blank strings.
    pub fn parse(id: &str) -> Option<Self> {
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id.to_string()))
        }
    }

    /// Extract an ID from a JSON value.
    ///
    /// Strings and numbers are accepted. Falsy values (blank string, `0`,
    /// `false`, `null`) and structured values yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Number(n) => Some(Self(number_key(n))),
            _ => None,
        }
    }

    /// Whether this id would be rejected by [`ProductId::parse`].
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Integral floats print like integers, so `7.0` and `7` match.
fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ProductId::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid product id: {}", value)))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
