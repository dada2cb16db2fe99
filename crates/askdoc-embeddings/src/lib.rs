//! Embeddings integration for askdoc
//!
//! Implements the `EmbeddingProvider` capability against an OpenAI-compatible
//! embeddings endpoint. One synchronous call per text; retry policy, if any,
//! belongs to the caller.

mod client;
mod config;

pub use client::OpenAiEmbeddings;
pub use config::EmbeddingsConfig;
