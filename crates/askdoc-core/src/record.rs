//! Chunk record data model

use serde::{Deserialize, Serialize};

/// Identity of a chunk within its source document.
///
/// `(source, chunk_index)` pairs are unique within a store snapshot as
/// produced by ingestion, but the store layer does not enforce them as a
/// key; duplicates introduced by a retried partial ingestion are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Logical document name, the stable identity for deletion/filtering.
    pub source: String,
    /// Zero-based position of this chunk within its source document.
    #[serde(rename = "chunkIndex")]
    pub chunk_index: usize,
}

/// The atomic retrievable unit: one embedded chunk of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Fixed dimensionality per deployment; never mixed within one store.
    pub embedding: Vec<f32>,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// A chunk returned by retrieval, scored against the query embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub text: String,
    pub metadata: ChunkMetadata,
    pub score: f32,
}
