//! Engine facade consumed by routing/CLI collaborators

use std::sync::Arc;

use askdoc_core::{
    ChunkRecord, ChunkingConfig, EmbeddingProvider, Error, Result, RetrievedChunk, VectorStore,
};

use crate::indexer::{DocumentIndexer, DocumentInput};
use crate::retriever;

/// The public surface of the indexing and retrieval engine.
///
/// Owns one store backend and one embedding provider for the process
/// lifetime and exposes exactly the operations a routing collaborator
/// consumes: `index_documents`, `retrieve_context`, `load_store`,
/// `delete_by_source` and `clear_store`.
pub struct RagEngine<S: VectorStore, E: EmbeddingProvider> {
    store: Arc<S>,
    embeddings: Arc<E>,
    indexer: DocumentIndexer<S, E>,
}

impl<S: VectorStore, E: EmbeddingProvider> RagEngine<S, E> {
    pub fn new(store: Arc<S>, embeddings: Arc<E>, chunking: ChunkingConfig) -> Self {
        let indexer = DocumentIndexer::with_config(store.clone(), embeddings.clone(), chunking);
        Self {
            store,
            embeddings,
            indexer,
        }
    }

    /// Ingest a batch of documents; see `DocumentIndexer::index_documents`.
    pub async fn index_documents(&self, files: &[DocumentInput]) -> Result<()> {
        self.indexer.index_documents(files).await
    }

    /// Retrieve the top-K chunks most similar to `question`.
    ///
    /// An empty snapshot, or a source filter that matches nothing, returns
    /// an empty sequence without embedding the question. `top_k` is expected
    /// to be clamped by the caller.
    pub async fn retrieve_context(
        &self,
        question: &str,
        top_k: usize,
        source_filter: Option<&str>,
    ) -> Result<Vec<RetrievedChunk>> {
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::Validation("question must not be empty".to_string()));
        }

        let items = self.store.load_all().await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let filter = source_filter.map(str::trim).filter(|f| !f.is_empty());
        if let Some(f) = filter {
            if !items.iter().any(|item| item.metadata.source == f) {
                return Ok(Vec::new());
            }
        }

        let query = self.embeddings.embed(question).await?;
        Ok(retriever::rank(items, &query, top_k, filter))
    }

    /// Full snapshot read, handed through untouched.
    pub async fn load_store(&self) -> Result<Vec<ChunkRecord>> {
        self.store.load_all().await
    }

    /// Distinct source names currently in the store, in snapshot order.
    pub async fn sources(&self) -> Result<Vec<String>> {
        let items = self.store.load_all().await?;
        let mut sources: Vec<String> = Vec::new();
        for item in items {
            if !sources.contains(&item.metadata.source) {
                sources.push(item.metadata.source);
            }
        }
        Ok(sources)
    }

    /// Remove every chunk of one source document; returns the count removed.
    pub async fn delete_by_source(&self, name: &str) -> Result<usize> {
        self.store.delete_by_source(name).await
    }

    /// Remove every record from the store (reindex starts from here).
    pub async fn clear_store(&self) -> Result<()> {
        self.store.clear().await
    }
}
