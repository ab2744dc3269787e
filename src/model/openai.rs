use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;

use super::{ChatModel, Embedder, CHAT_MODEL, EMBEDDING_MODEL, MAX_TOKENS, TEMPERATURE};
use crate::web::models::Message;

/// Client for the OpenAI embeddings and chat completions endpoints.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    async fn post(&self, path: &str, payload: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("OpenAI {} request failed ({}): {}", path, status, error_text));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let payload = json!({
            "model": EMBEDDING_MODEL,
            "input": text,
        });

        let response_json = self.post("embeddings", &payload).await?;
        let parsed: EmbeddingResponse = serde_json::from_value(response_json)?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| anyhow!("Embedding response contained no data"))?;

        debug!("Embedding dimensions: {}", embedding.len());
        Ok(embedding)
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let payload = json!({
            "model": CHAT_MODEL,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        info!("Sending {} messages to {} with max_tokens: {}", messages.len(), CHAT_MODEL, MAX_TOKENS);
        debug!("Payload: {}", payload);

        let response_json = self.post("chat/completions", &payload).await?;
        debug!("Response JSON: {}", response_json);

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| anyhow!("Failed to extract content from response"))?;

        info!("Response length: {} characters", content.chars().count());
        Ok(content.to_string())
    }
}
