//! Engine configuration loaded from the environment

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::{Error, Result};

pub const DEFAULT_CHUNK_SIZE: usize = 700;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;
pub const DEFAULT_CHUNK_TOKENS: usize = 600;
pub const DEFAULT_CHUNK_OVERLAP_TOKENS: usize = 80;

const DEFAULT_SQLITE_PATH: &str = "vectorstore.db";
const DEFAULT_FILE_PATH: &str = "vectorstore.json";
const DEFAULT_REMOTE_TABLE: &str = "vectors";

fn env_usize(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            Error::Configuration(format!("{name} must be a positive integer, got {raw:?}"))
        }),
        Err(_) => Ok(default),
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Window sizes for the chunker, in characters and in tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub chunk_tokens: usize,
    pub chunk_overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            chunk_tokens: DEFAULT_CHUNK_TOKENS,
            chunk_overlap_tokens: DEFAULT_CHUNK_OVERLAP_TOKENS,
        }
    }
}

impl ChunkingConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `CHUNK_SIZE`, `CHUNK_OVERLAP`, `CHUNK_TOKENS` and
    /// `CHUNK_OVERLAP_TOKENS`, then validates the window geometry.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            chunk_size: env_usize("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            chunk_overlap: env_usize("CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP)?,
            chunk_tokens: env_usize("CHUNK_TOKENS", DEFAULT_CHUNK_TOKENS)?,
            chunk_overlap_tokens: env_usize(
                "CHUNK_OVERLAP_TOKENS",
                DEFAULT_CHUNK_OVERLAP_TOKENS,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject window geometries that would stall the chunker.
    ///
    /// An overlap equal to or larger than the window size would make the
    /// windowing loop stop advancing, so it is refused here instead of being
    /// discovered during ingestion.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Configuration(
                "CHUNK_SIZE must be greater than zero".to_string(),
            ));
        }
        if self.chunk_tokens == 0 {
            return Err(Error::Configuration(
                "CHUNK_TOKENS must be greater than zero".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::Configuration(format!(
                "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.chunk_overlap_tokens >= self.chunk_tokens {
            return Err(Error::Configuration(format!(
                "CHUNK_OVERLAP_TOKENS ({}) must be smaller than CHUNK_TOKENS ({})",
                self.chunk_overlap_tokens, self.chunk_tokens
            )));
        }
        Ok(())
    }
}

/// Which embedded backend serves local persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalBackend {
    File,
    Sqlite,
}

/// Credentials and table name for the remote table-store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteStoreConfig {
    pub url: String,
    pub service_key: String,
    pub table: String,
}

/// Store backend selection, evaluated once per process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: LocalBackend,
    pub path: PathBuf,
    pub remote: Option<RemoteStoreConfig>,
    /// The deployment environment disallows local persistence.
    pub ephemeral_runtime: bool,
    /// Explicit override permitting non-durable storage anyway.
    pub allow_ephemeral_store: bool,
}

impl StoreConfig {
    /// Create configuration from environment variables.
    ///
    /// `SUPABASE_URL` + `SUPABASE_SERVICE_ROLE_KEY` select the remote
    /// backend; otherwise `VECTORSTORE_BACKEND` picks `sqlite` (default) or
    /// `file`, stored at `VECTORSTORE_PATH`. `EPHEMERAL_RUNTIME=1` marks an
    /// environment without durable local disk and `ALLOW_EPHEMERAL_STORE=1`
    /// overrides the resulting persistence check.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend = match env::var("VECTORSTORE_BACKEND").as_deref() {
            Ok("file") => LocalBackend::File,
            Ok("sqlite") | Err(_) => LocalBackend::Sqlite,
            Ok(other) => {
                return Err(Error::Configuration(format!(
                    "VECTORSTORE_BACKEND must be \"sqlite\" or \"file\", got {other:?}"
                )));
            }
        };

        let path = env::var("VECTORSTORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(match backend {
                    LocalBackend::Sqlite => DEFAULT_SQLITE_PATH,
                    LocalBackend::File => DEFAULT_FILE_PATH,
                })
            });

        let remote = match (env::var("SUPABASE_URL"), env::var("SUPABASE_SERVICE_ROLE_KEY")) {
            (Ok(url), Ok(service_key)) if !url.trim().is_empty() && !service_key.trim().is_empty() => {
                Some(RemoteStoreConfig {
                    url: url.trim_end_matches('/').to_string(),
                    service_key,
                    table: env::var("SUPABASE_VECTOR_TABLE")
                        .unwrap_or_else(|_| DEFAULT_REMOTE_TABLE.to_string()),
                })
            }
            _ => None,
        };

        Ok(Self {
            backend,
            path,
            remote,
            ephemeral_runtime: env_flag("EPHEMERAL_RUNTIME"),
            allow_ephemeral_store: env_flag("ALLOW_EPHEMERAL_STORE"),
        })
    }
}
