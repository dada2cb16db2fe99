//! Embedded SQLite store

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use askdoc_core::{ChunkMetadata, ChunkRecord, Error, Result, VectorStore};

/// Embedded SQL store: one `vectors` table, one shared connection.
///
/// The embedding vector and the metadata object are stored as serialized
/// JSON text rather than native array/JSON columns, to maximize portability.
/// The shared connection serializes writers at the connection level; no
/// explicit transaction isolation is configured beyond SQLite's defaults.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

fn store_err(err: impl std::fmt::Display) -> Error {
    Error::StoreBackend(err.to_string())
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the `vectors`
    /// table exists. Table creation is idempotent.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(store_err)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS vectors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                embedding TEXT NOT NULL,
                text TEXT NOT NULL,
                metadata TEXT NOT NULL
            );",
        )
        .map_err(store_err)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn row_to_record(embedding: String, text: String, metadata: String) -> Result<ChunkRecord> {
        let embedding: Vec<f32> = serde_json::from_str(&embedding)
            .map_err(|e| Error::StoreBackend(format!("malformed embedding column: {e}")))?;
        let metadata: ChunkMetadata = serde_json::from_str(&metadata)
            .map_err(|e| Error::StoreBackend(format!("malformed metadata column: {e}")))?;
        Ok(ChunkRecord {
            embedding,
            text,
            metadata,
        })
    }
}

#[async_trait]
impl VectorStore for SqliteStore {
    async fn load_all(&self) -> Result<Vec<ChunkRecord>> {
        let conn = self.conn.lock().map_err(store_err)?;
        let mut stmt = conn
            .prepare("SELECT embedding, text, metadata FROM vectors")
            .map_err(store_err)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(store_err)?;

        let mut records = Vec::new();
        for row in rows {
            let (embedding, text, metadata) = row.map_err(store_err)?;
            records.push(Self::row_to_record(embedding, text, metadata)?);
        }
        Ok(records)
    }

    async fn append(&self, record: ChunkRecord) -> Result<()> {
        let embedding = serde_json::to_string(&record.embedding)?;
        let metadata = serde_json::to_string(&record.metadata)?;

        let conn = self.conn.lock().map_err(store_err)?;
        conn.execute(
            "INSERT INTO vectors (embedding, text, metadata) VALUES (?1, ?2, ?3)",
            rusqlite::params![embedding, record.text, metadata],
        )
        .map_err(store_err)?;
        Ok(())
    }

    async fn replace_all(&self, records: Vec<ChunkRecord>) -> Result<()> {
        let mut conn = self.conn.lock().map_err(store_err)?;
        let tx = conn.transaction().map_err(store_err)?;

        tx.execute("DELETE FROM vectors", []).map_err(store_err)?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO vectors (embedding, text, metadata) VALUES (?1, ?2, ?3)")
                .map_err(store_err)?;
            for record in &records {
                let embedding = serde_json::to_string(&record.embedding)?;
                let metadata = serde_json::to_string(&record.metadata)?;
                stmt.execute(rusqlite::params![embedding, record.text, metadata])
                    .map_err(store_err)?;
            }
        }

        tx.commit().map_err(store_err)
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(0);
        }

        let conn = self.conn.lock().map_err(store_err)?;
        conn.execute(
            "DELETE FROM vectors WHERE json_extract(metadata, '$.source') = ?1",
            rusqlite::params![source],
        )
        .map_err(store_err)
    }
}
