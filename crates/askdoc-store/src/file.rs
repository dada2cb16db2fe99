//! Whole-document JSON file store

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use askdoc_core::{ChunkRecord, Result, VectorStore};

/// The persisted layout: one JSON document `{"items": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    items: Vec<ChunkRecord>,
}

/// Local file store: the whole collection serialized as one JSON document.
///
/// Every read loads and parses the entire file; every write serializes and
/// overwrites the entire file. There is no partial-write protection beyond
/// whatever atomicity the filesystem write offers, so a crash mid-write can
/// corrupt the file. Concurrent writers can lose updates.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a file store backed by `path`. The file is created on first
    /// write; a missing file reads as an empty store.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load_document(&self) -> Result<StoreDocument> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(StoreDocument::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save_document(&self, document: &StoreDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(document)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl VectorStore for FileStore {
    async fn load_all(&self) -> Result<Vec<ChunkRecord>> {
        Ok(self.load_document().await?.items)
    }

    async fn append(&self, record: ChunkRecord) -> Result<()> {
        let mut document = self.load_document().await?;
        document.items.push(record);
        self.save_document(&document).await
    }

    async fn replace_all(&self, records: Vec<ChunkRecord>) -> Result<()> {
        self.save_document(&StoreDocument { items: records }).await
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(0);
        }

        let mut document = self.load_document().await?;
        let before = document.items.len();
        document.items.retain(|item| item.metadata.source != source);
        let removed = before - document.items.len();
        if removed > 0 {
            self.save_document(&document).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdoc_core::ChunkMetadata;
    use tempfile::tempdir;

    fn record(source: &str, chunk_index: usize) -> ChunkRecord {
        ChunkRecord {
            embedding: vec![1.0, 0.0, 0.0],
            text: format!("chunk {chunk_index} of {source}"),
            metadata: ChunkMetadata {
                source: source.to_string(),
                chunk_index,
            },
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("vectorstore.json"));
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("vectorstore.json"));

        store.append(record("a.txt", 0)).await.unwrap();
        store.append(record("a.txt", 1)).await.unwrap();

        let items = store.load_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].metadata.chunk_index, 0);
        assert_eq!(items[1].metadata.chunk_index, 1);
    }

    #[tokio::test]
    async fn persisted_layout_wraps_items() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectorstore.json");
        let store = FileStore::new(path.clone());

        store.append(record("a.txt", 0)).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json["items"].is_array());
        assert_eq!(json["items"][0]["metadata"]["chunkIndex"], 0);
    }

    #[tokio::test]
    async fn delete_by_source_returns_removed_count() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("vectorstore.json"));

        store.append(record("a.txt", 0)).await.unwrap();
        store.append(record("a.txt", 1)).await.unwrap();
        store.append(record("b.txt", 0)).await.unwrap();

        assert_eq!(store.delete_by_source("a.txt").await.unwrap(), 2);

        let remaining = store.load_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|r| r.metadata.source == "b.txt"));

        // Blank-after-trim names delete nothing.
        assert_eq!(store.delete_by_source("   ").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn replace_all_and_clear() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("vectorstore.json"));

        store.append(record("a.txt", 0)).await.unwrap();
        store
            .replace_all(vec![record("c.txt", 0), record("c.txt", 1)])
            .await
            .unwrap();

        let items = store.load_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|r| r.metadata.source == "c.txt"));

        store.clear().await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
