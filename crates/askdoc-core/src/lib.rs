//! Core traits and types for askdoc
//!
//! This crate defines the fundamental traits and types used across the askdoc
//! engine: the chunk record data model, the error taxonomy, configuration
//! loading, and the capability-facing interfaces for vector stores and
//! embedding providers, making the engine test-friendly and extensible.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod record;
pub mod vector_store;

pub use config::{ChunkingConfig, LocalBackend, RemoteStoreConfig, StoreConfig};
pub use embeddings::EmbeddingProvider;
pub use error::{Error, Result};
pub use record::{ChunkMetadata, ChunkRecord, RetrievedChunk};
pub use vector_store::VectorStore;
