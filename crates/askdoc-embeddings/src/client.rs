//! OpenAI-compatible embeddings client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use askdoc_core::{EmbeddingProvider, Error, Result};

use crate::config::EmbeddingsConfig;

/// Embeddings client for an OpenAI-compatible `/v1/embeddings` endpoint.
pub struct OpenAiEmbeddings {
    config: EmbeddingsConfig,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

impl OpenAiEmbeddings {
    /// Create a new embeddings client from configuration.
    pub fn new(config: EmbeddingsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::EmbeddingService {
                status: 0,
                body: e.to_string(),
            })?;

        Ok(Self { config, client })
    }

    /// Create a new embeddings client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(EmbeddingsConfig::from_env()?)
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            Error::EmbeddingUnavailable("OPENAI_API_KEY is not set".to_string())
        })?;

        let url = format!("{}/v1/embeddings", self.config.api_url);
        let request_body = EmbeddingRequest {
            model: &self.config.model,
            input: text,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::EmbeddingService {
                status: 0,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::EmbeddingService {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| Error::EmbeddingService {
            status: status.as_u16(),
            body: e.to_string(),
        })?;

        let parsed: EmbeddingResponse =
            serde_json::from_str(&body).map_err(|_| Error::EmbeddingService {
                status: status.as_u16(),
                body: format!("embeddings response malformed: {body}"),
            })?;

        match parsed.data.into_iter().next() {
            Some(data) if !data.embedding.is_empty() => Ok(data.embedding),
            _ => Err(Error::EmbeddingService {
                status: status.as_u16(),
                body: "embeddings response missing vector".to_string(),
            }),
        }
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: String) -> EmbeddingsConfig {
        EmbeddingsConfig {
            api_key: Some("test-key".to_string()),
            model: DEFAULT_TEST_MODEL.to_string(),
            api_url,
        }
    }

    const DEFAULT_TEST_MODEL: &str = "text-embedding-3-small";

    #[tokio::test]
    async fn embeds_text_against_mock_endpoint() {
        let server = MockServer::start().await;

        let response_json = serde_json::json!({
            "data": [{ "embedding": [0.1, 0.2, 0.3] }],
            "model": DEFAULT_TEST_MODEL,
        });

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": DEFAULT_TEST_MODEL,
                "input": "hello world",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_json))
            .mount(&server)
            .await;

        let client = OpenAiEmbeddings::new(test_config(server.uri())).unwrap();
        let vector = client.embed("hello world").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(client.model_id(), DEFAULT_TEST_MODEL);
    }

    #[tokio::test]
    async fn surfaces_service_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = OpenAiEmbeddings::new(test_config(server.uri())).unwrap();
        match client.embed("hello").await {
            Err(Error::EmbeddingService { status, body }) => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected EmbeddingService error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejects_response_missing_vector() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let client = OpenAiEmbeddings::new(test_config(server.uri())).unwrap();
        assert!(matches!(
            client.embed("hello").await,
            Err(Error::EmbeddingService { status: 200, .. })
        ));
    }

    #[tokio::test]
    async fn fails_without_credential_before_any_io() {
        let config = EmbeddingsConfig {
            api_key: None,
            model: DEFAULT_TEST_MODEL.to_string(),
            // Unroutable on purpose: the call must fail before reaching it.
            api_url: "http://127.0.0.1:1".to_string(),
        };
        let client = OpenAiEmbeddings::new(config).unwrap();
        assert!(matches!(
            client.embed("hello").await,
            Err(Error::EmbeddingUnavailable(_))
        ));
    }
}
