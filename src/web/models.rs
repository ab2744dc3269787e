use serde::{Deserialize, Serialize};

use crate::rag::product::{ProductId, ProductRecord};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Caller-held history, echoed to the model. `null` and absent both mean empty.
    #[serde(default)]
    pub conversation_history: Option<Vec<Message>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub products: Vec<ProductSummary>,
}

/// Product fields exposed to the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub product_id: Option<ProductId>,
    pub status: Option<bool>,
}

impl From<&ProductRecord> for ProductSummary {
    fn from(record: &ProductRecord) -> Self {
        Self {
            name: record.name.clone(),
            price: record.price,
            brand: record.brand.clone(),
            sku: record.sku.clone(),
            product_id: record.product_id.clone(),
            status: record.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}
