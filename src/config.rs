use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PINECONE_CONTROL_URL: &str = "https://api.pinecone.io";
pub const DEFAULT_PINECONE_INDEX: &str = "vitamins-catalog-v2";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub pinecone_api_key: String,
    pub pinecone_index: String,
    /// Data-plane host of the index. Resolved through the control plane when unset.
    pub pinecone_index_host: Option<String>,
    pub pinecone_control_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
        let pinecone_api_key = var("PINECONE_API_KEY").context("PINECONE_API_KEY must be set")?;

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            pinecone_api_key,
            pinecone_index: var("PINECONE_INDEX").unwrap_or_else(|| DEFAULT_PINECONE_INDEX.to_string()),
            pinecone_index_host: var("PINECONE_INDEX_HOST"),
            pinecone_control_url: var("PINECONE_CONTROL_URL")
                .unwrap_or_else(|| DEFAULT_PINECONE_CONTROL_URL.to_string()),
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}
