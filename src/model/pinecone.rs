use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::fmt;

use super::ProductIndex;
use crate::rag::{ProductRecord, ScoredProduct};

const API_VERSION: &str = "2024-07";

/// Data-plane client for one Pinecone index.
pub struct PineconeIndex {
    host: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    #[serde(default)]
    id: String,
    score: f32,
    #[serde(default)]
    metadata: Option<ProductRecord>,
}

impl fmt::Debug for PineconeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key stays out of logs
        f.debug_struct("PineconeIndex")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl PineconeIndex {
    pub fn new(host: &str, api_key: &str) -> Self {
        let host = host.trim_end_matches('/');
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        Self {
            host,
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    /// Looks up the index host by name through the control plane.
    pub async fn connect(control_url: &str, index_name: &str, api_key: &str) -> Result<Self> {
        info!("Resolving host for Pinecone index {}", index_name);

        let url = format!("{}/indexes/{}", control_url.trim_end_matches('/'), index_name);
        let response = Client::new()
            .get(&url)
            .header("Api-Key", api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await
            .with_context(|| format!("Failed to reach Pinecone control plane at {}", control_url))?;

        let described: DescribeIndexResponse = checked(response)
            .await
            .with_context(|| format!("Failed to describe Pinecone index {}", index_name))?
            .json()
            .await?;

        Ok(Self::new(&described.host, api_key))
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await?;
    Err(anyhow!("Pinecone request failed ({}): {}", status, error_text))
}

#[async_trait]
impl ProductIndex for PineconeIndex {
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredProduct>> {
        let payload = json!({
            "vector": vector,
            "topK": top_k,
            "includeMetadata": true,
        });

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&payload)
            .send()
            .await?;

        let parsed: QueryResponse = checked(response).await?.json().await?;
        debug!(
            "Pinecone matches: {:?}",
            parsed.matches.iter().map(|m| (&m.id, m.score)).collect::<Vec<_>>()
        );

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| ScoredProduct {
                record: m.metadata.unwrap_or_default(),
                score: m.score,
            })
            .collect())
    }
}
