//! Remote table-store over HTTP (Supabase-style REST)

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use askdoc_core::{ChunkMetadata, ChunkRecord, Error, RemoteStoreConfig, Result, VectorStore};

/// Remote table-store: each operation maps to one HTTP call against a
/// REST-like resource endpoint.
///
/// `replace_all` is delete-all followed by bulk insert and is NOT atomic: a
/// crash between the two steps leaves the store empty. Consistency under
/// concurrent writers is whatever the remote service guarantees.
pub struct RemoteStore {
    client: Client,
    endpoint: String,
    service_key: String,
}

/// Rows may come back with `embedding`/`metadata` as JSON values or as
/// serialized text, depending on the remote column types.
#[derive(Deserialize)]
struct RemoteRow {
    embedding: Value,
    text: Value,
    metadata: Value,
}

fn store_err(err: impl std::fmt::Display) -> Error {
    Error::StoreBackend(err.to_string())
}

fn value_or_encoded<T: serde::de::DeserializeOwned>(value: Value, column: &str) -> Result<T> {
    let value = match value {
        Value::String(encoded) => serde_json::from_str(&encoded)
            .map_err(|e| Error::StoreBackend(format!("malformed {column} column: {e}")))?,
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| Error::StoreBackend(format!("malformed {column} column: {e}")))
}

impl RemoteRow {
    fn into_record(self) -> Result<ChunkRecord> {
        let embedding: Vec<f32> = value_or_encoded(self.embedding, "embedding")?;
        let metadata: ChunkMetadata = value_or_encoded(self.metadata, "metadata")?;
        let text = self
            .text
            .as_str()
            .ok_or_else(|| Error::StoreBackend("malformed text column".to_string()))?
            .to_string();
        Ok(ChunkRecord {
            embedding,
            text,
            metadata,
        })
    }
}

impl RemoteStore {
    /// Create a remote store client for the configured resource table.
    pub fn new(config: &RemoteStoreConfig) -> Result<Self> {
        let base = Url::parse(&config.url)
            .map_err(|e| Error::Configuration(format!("invalid SUPABASE_URL: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(store_err)?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                base.as_str().trim_end_matches('/'),
                config.table
            ),
            service_key: config.service_key.clone(),
        })
    }

    async fn request(
        &self,
        method: Method,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut request = self
            .client
            .request(method, &self.endpoint)
            .query(query)
            .header("Content-Type", "application/json")
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=representation");

        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(store_err)
    }

    async fn check(response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::StoreBackend(format!(
                "remote store {action} failed with status {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl VectorStore for RemoteStore {
    async fn load_all(&self) -> Result<Vec<ChunkRecord>> {
        let response = self
            .request(
                Method::GET,
                &[("select", "embedding,text,metadata")],
                None,
            )
            .await?;
        let response = Self::check(response, "load").await?;

        let rows: Vec<RemoteRow> = response.json().await.map_err(store_err)?;
        rows.into_iter().map(RemoteRow::into_record).collect()
    }

    async fn append(&self, record: ChunkRecord) -> Result<()> {
        let body = serde_json::to_value(vec![record])?;
        let response = self.request(Method::POST, &[], Some(&body)).await?;
        Self::check(response, "insert").await?;
        Ok(())
    }

    async fn replace_all(&self, records: Vec<ChunkRecord>) -> Result<()> {
        let response = self.request(Method::DELETE, &[("id", "gt.0")], None).await?;
        Self::check(response, "clear").await?;

        if records.is_empty() {
            return Ok(());
        }

        let body = serde_json::to_value(records)?;
        let response = self.request(Method::POST, &[], Some(&body)).await?;
        Self::check(response, "bulk insert").await?;
        Ok(())
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(0);
        }

        let filter = format!("eq.{source}");
        let response = self
            .request(Method::DELETE, &[("metadata->>source", filter.as_str())], None)
            .await?;
        let response = Self::check(response, "delete by source").await?;

        // Prefer: return=representation echoes the removed rows back.
        let removed: Value = response.json().await.map_err(store_err)?;
        Ok(removed.as_array().map(|rows| rows.len()).unwrap_or(0))
    }
}
