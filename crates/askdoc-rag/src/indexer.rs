//! Indexing orchestrator

use std::path::PathBuf;
use std::sync::Arc;

use askdoc_core::{
    ChunkMetadata, ChunkRecord, ChunkingConfig, EmbeddingProvider, Error, Result, VectorStore,
};

use crate::{chunker, reader};

/// One document handed to the indexer by an upload/CLI collaborator: a
/// readable file on local disk plus the logical name it was uploaded under.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub path: PathBuf,
    pub original_name: Option<String>,
}

impl DocumentInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            original_name: None,
        }
    }

    pub fn with_original_name(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            original_name: Some(name.into()),
        }
    }

    /// The logical source name persisted with every chunk.
    pub fn source_name(&self) -> String {
        self.original_name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Drives read -> normalize -> chunk -> embed -> append for a batch of
/// documents.
///
/// Processing is strictly sequential: one document at a time and, within a
/// document, one chunk at a time, bounding concurrent outbound embedding
/// calls at one. If an embedding call fails partway through a document, the
/// chunks already appended stay in the store; ingestion is not atomic
/// across a batch and is never rolled back.
pub struct DocumentIndexer<S: VectorStore, E: EmbeddingProvider> {
    store: Arc<S>,
    embeddings: Arc<E>,
    config: ChunkingConfig,
}

impl<S: VectorStore, E: EmbeddingProvider> DocumentIndexer<S, E> {
    pub fn new(store: Arc<S>, embeddings: Arc<E>) -> Self {
        Self::with_config(store, embeddings, ChunkingConfig::default())
    }

    pub fn with_config(store: Arc<S>, embeddings: Arc<E>, config: ChunkingConfig) -> Self {
        Self {
            store,
            embeddings,
            config,
        }
    }

    /// Index a batch of documents.
    ///
    /// The caller owns the temporary source files; they are not deleted
    /// here.
    pub async fn index_documents(&self, files: &[DocumentInput]) -> Result<()> {
        if files.is_empty() {
            return Err(Error::Validation("no files to index".to_string()));
        }

        for file in files {
            let text = reader::read_by_extension(&file.path, file.original_name.as_deref()).await?;
            let chunks = chunker::chunk(&text, &self.config);
            let source = file.source_name();

            for (chunk_index, chunk) in chunks.into_iter().enumerate() {
                let embedding = self.embeddings.embed(&chunk).await?;
                self.store
                    .append(ChunkRecord {
                        embedding,
                        text: chunk,
                        metadata: ChunkMetadata {
                            source: source.clone(),
                            chunk_index,
                        },
                    })
                    .await?;
            }
        }

        Ok(())
    }
}
