//! Vector store backends for askdoc
//!
//! One `VectorStore` interface, three interchangeable backends selected once
//! per process lifetime: a whole-document JSON file, an embedded SQLite
//! table, and a Supabase-style remote table-store over HTTP.

mod file;
mod remote;
mod sqlite;

pub use file::FileStore;
pub use remote::RemoteStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use askdoc_core::{ChunkRecord, Error, LocalBackend, Result, StoreConfig, VectorStore};

/// The closed set of store backends.
///
/// Selection happens once at process start from configuration, never
/// per-call. Remote credentials take hard precedence: when present, the
/// local backends are never consulted.
pub enum StoreBackend {
    File(FileStore),
    Sqlite(SqliteStore),
    Remote(RemoteStore),
}

impl StoreBackend {
    /// Select and open the backend described by `config`.
    ///
    /// Fails fast with `PersistenceNotConfigured` when the runtime disallows
    /// local persistence and neither remote credentials nor the explicit
    /// ephemeral-store override are configured, before any I/O happens.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        if let Some(remote) = &config.remote {
            return Ok(Self::Remote(RemoteStore::new(remote)?));
        }

        if config.ephemeral_runtime && !config.allow_ephemeral_store {
            return Err(Error::PersistenceNotConfigured(
                "this runtime has no durable local disk; configure SUPABASE_URL and \
                 SUPABASE_SERVICE_ROLE_KEY, or set ALLOW_EPHEMERAL_STORE=1 for development"
                    .to_string(),
            ));
        }

        match config.backend {
            LocalBackend::File => Ok(Self::File(FileStore::new(config.path.clone()))),
            LocalBackend::Sqlite => Ok(Self::Sqlite(SqliteStore::open(&config.path)?)),
        }
    }

    /// Backend name for operator-facing output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Sqlite(_) => "sqlite",
            Self::Remote(_) => "remote",
        }
    }
}

#[async_trait]
impl VectorStore for StoreBackend {
    async fn load_all(&self) -> Result<Vec<ChunkRecord>> {
        match self {
            Self::File(store) => store.load_all().await,
            Self::Sqlite(store) => store.load_all().await,
            Self::Remote(store) => store.load_all().await,
        }
    }

    async fn append(&self, record: ChunkRecord) -> Result<()> {
        match self {
            Self::File(store) => store.append(record).await,
            Self::Sqlite(store) => store.append(record).await,
            Self::Remote(store) => store.append(record).await,
        }
    }

    async fn replace_all(&self, records: Vec<ChunkRecord>) -> Result<()> {
        match self {
            Self::File(store) => store.replace_all(records).await,
            Self::Sqlite(store) => store.replace_all(records).await,
            Self::Remote(store) => store.replace_all(records).await,
        }
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        match self {
            Self::File(store) => store.delete_by_source(source).await,
            Self::Sqlite(store) => store.delete_by_source(source).await,
            Self::Remote(store) => store.delete_by_source(source).await,
        }
    }
}
