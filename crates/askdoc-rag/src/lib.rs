//! Indexing and retrieval engine for askdoc
//!
//! Drives the ingestion pipeline (read, normalize, chunk, embed, append) and
//! answers retrieval queries by cosine-ranking a full store snapshot against
//! a question embedding.

pub mod chunker;
pub mod engine;
pub mod indexer;
pub mod normalize;
pub mod reader;
pub mod retriever;

pub use engine::RagEngine;
pub use indexer::{DocumentIndexer, DocumentInput};
pub use normalize::normalize;
pub use retriever::cosine_similarity;
