//! Wire model for the product service.
//!
//! The service is not strict about JSON types: identifiers arrive as numbers or strings, and
//! decimal prices may be serialized as strings. Both forms are accepted on the way in.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque, server-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => ProductId(text),
            RawId::Signed(n) => ProductId(n.to_string()),
            RawId::Unsigned(n) => ProductId(n.to_string()),
        })
    }
}

/// A product record as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Product {
    /// Description text, or `fallback` when the product has none (empty counts as none).
    pub fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => fallback,
        }
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

/// Body of create and update requests; always a full replacement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Currency-prefixed price with two decimals, e.g. `$9.50`.
///
/// Exact halves between two cents round up, so `0.125` shows as `$0.13`.
pub fn format_price(price: f64) -> String {
    // Only odd multiples of 1/8 (x.125, x.375, ...) lie exactly halfway between cents.
    let eighths = price.abs() * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let rounded = (price.abs() * 100.0).ceil() / 100.0;
        return format!("${:.2}", rounded.copysign(price));
    }
    format!("${:.2}", price)
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid price: {text:?}"))),
    }
}
