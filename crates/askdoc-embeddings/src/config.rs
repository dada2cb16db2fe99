//! Embeddings client configuration

use serde::{Deserialize, Serialize};
use std::env;

use askdoc_core::Result;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_API_URL: &str = "https://api.openai.com";

/// Configuration for the embeddings client.
///
/// The API key is optional at construction time: a client without a key is
/// still usable for wiring, but every `embed` call fails with
/// `EmbeddingUnavailable` before attempting any I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

impl EmbeddingsConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let model = env::var("OPENAI_EMBEDDING_MODEL")
            .unwrap_or_else(|_| DEFAULT_EMBEDDING_MODEL.to_string());
        let api_url = env::var("OPENAI_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_key,
            model,
            api_url,
        })
    }

    /// Create configuration with explicit values.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
