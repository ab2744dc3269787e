pub mod openai;
pub mod pinecone;

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::rag::ScoredProduct;
use crate::web::models::Message;

pub use openai::OpenAiClient;
pub use pinecone::PineconeIndex;

pub const EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const CHAT_MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 800;

/// Turns text into a vector for the product index.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Nearest-neighbour lookup over the product catalog.
#[async_trait]
pub trait ProductIndex: Send + Sync {
    /// Returns at most `top_k` hits, most similar first.
    async fn search(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredProduct>>;
}

/// Chat completion with fixed decoding settings.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// Upstream handles shared by every request. Built once at startup and
/// never mutated afterwards.
#[derive(Clone)]
pub struct Backends {
    pub embedder: Arc<dyn Embedder>,
    pub index: Arc<dyn ProductIndex>,
    pub chat: Arc<dyn ChatModel>,
}

impl Backends {
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let openai = Arc::new(OpenAiClient::new(&config.openai_base_url, &config.openai_api_key));
        info!("Using OpenAI API at: {}", config.openai_base_url);

        let index = match &config.pinecone_index_host {
            Some(host) => PineconeIndex::new(host, &config.pinecone_api_key),
            None => {
                PineconeIndex::connect(
                    &config.pinecone_control_url,
                    &config.pinecone_index,
                    &config.pinecone_api_key,
                )
                .await?
            }
        };
        info!("Using Pinecone index {} at: {}", config.pinecone_index, index.host());

        Ok(Self {
            embedder: openai.clone(),
            index: Arc::new(index),
            chat: openai,
        })
    }
}
