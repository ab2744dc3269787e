use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Scores at or below this are not used as context.
pub const RELEVANCE_THRESHOLD: f32 = 0.7;

/// Catalog entry as stored in the index metadata. Every field is optional
/// because the catalog loader does not guarantee any of them, nor their types:
/// a value that cannot be read as the field's type is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub brand: Option<String>,
    /// In UAH.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    /// `true` when in stock.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub product_id: Option<ProductId>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Any non-empty, non-zero value counts as in stock.
fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => Some(number.as_f64().map_or(false, |n| n != 0.0)),
        Value::String(text) => Some(!text.is_empty()),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(fields) => Some(!fields.is_empty()),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProductId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(ProductId::Text(id)),
        Value::Number(id) => Some(ProductId::Number(id)),
        _ => None,
    })
}

/// Store identifiers come through the index either as strings or as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Text(id) => f.write_str(id),
            ProductId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// A search hit. The score lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub record: ProductRecord,
    pub score: f32,
}

/// Keeps hits scoring strictly above `threshold`, in their original order.
pub fn filter_relevant(results: Vec<ScoredProduct>, threshold: f32) -> Vec<ScoredProduct> {
    results
        .into_iter()
        .filter(|hit| hit.score > threshold)
        .collect()
}
