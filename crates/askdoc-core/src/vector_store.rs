//! Vector store trait

use async_trait::async_trait;

use crate::record::ChunkRecord;
use crate::Result;

/// Durable collection of chunk records behind one interface.
///
/// Exactly one backend is active per deployment, selected by configuration
/// at startup. Each operation is atomic only insofar as the backend's own
/// operation is; the engine performs no locking across store calls.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Full snapshot read. The store imposes no ordering guarantee.
    async fn load_all(&self) -> Result<Vec<ChunkRecord>>;

    /// Insert one record. Does not check for duplicates.
    async fn append(&self, record: ChunkRecord) -> Result<()>;

    /// Atomic-intent full replace (clear then bulk insert); used for reindex.
    async fn replace_all(&self, records: Vec<ChunkRecord>) -> Result<()>;

    /// Remove every record whose `metadata.source` equals `source` and
    /// return the number removed. A name that is blank after trimming
    /// removes nothing.
    async fn delete_by_source(&self, source: &str) -> Result<usize>;

    /// Remove every record from the store.
    async fn clear(&self) -> Result<()> {
        self.replace_all(Vec::new()).await
    }
}
