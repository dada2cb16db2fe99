//! Embedding provider trait

use async_trait::async_trait;

use crate::Result;

/// External capability: converts a text string into a fixed-length vector.
///
/// One synchronous-from-the-caller call per text. No retry is performed at
/// this layer; failures surface as `Error::EmbeddingUnavailable` (credential
/// absent) or `Error::EmbeddingService` (remote failure or malformed
/// response).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text into a vector of floats.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Identifier of the embedding model in use.
    fn model_id(&self) -> &str;
}
