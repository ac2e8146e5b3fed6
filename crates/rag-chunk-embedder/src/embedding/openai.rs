use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    embedding: Vec<f32>,
}

/// Client for OpenAI-compatible `POST /embeddings` endpoints.
pub struct OpenAiEmbedder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            PipelineError::ConfigError("missing API key for OpenAI embeddings".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    fn model(&self) -> String {
        self.model.clone()
    }

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Requesting embedding for {} chars", text.len());

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&OpenAiEmbeddingRequest {
                input: text,
                model: &self.model,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::EmbeddingApiError { status, body });
        }

        let parsed: OpenAiEmbeddingResponse = response.json().await?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| PipelineError::InvalidEmbeddingResponse("empty data array".to_string()))?;

        if embedding.is_empty() {
            return Err(PipelineError::InvalidEmbeddingResponse(
                "embedding vector is empty".to_string(),
            ));
        }

        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> EmbeddingConfig {
        EmbeddingConfig {
            base_url: format!("{}/v1/", server.uri()),
            api_key: Some("sk-test".to_string()),
            ..EmbeddingConfig::default()
        }
    }

    #[tokio::test]
    async fn test_embed_single_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(serde_json::json!({
                "input": "Hello. World.",
                "model": "text-embedding-ada-002"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "data": [{"object": "embedding", "index": 0, "embedding": [0.5, 0.25, -0.125]}],
                "model": "text-embedding-ada-002",
                "usage": {"prompt_tokens": 4, "total_tokens": 4}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let embedder = OpenAiEmbedder::new(&config_for(&server)).unwrap();
        let vector = embedder.embed_single("Hello. World.").await.unwrap();

        assert_eq!(vector, vec![0.5, 0.25, -0.125]);
        assert_eq!(embedder.model(), "text-embedding-ada-002");
    }

    #[tokio::test]
    async fn test_embed_single_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let embedder = OpenAiEmbedder::new(&config_for(&server)).unwrap();
        let err = embedder.embed_single("text").await.unwrap_err();

        match err {
            PipelineError::EmbeddingApiError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_embed_single_empty_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
            .mount(&server)
            .await;

        let embedder = OpenAiEmbedder::new(&config_for(&server)).unwrap();
        let err = embedder.embed_single("text").await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidEmbeddingResponse(_)));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = EmbeddingConfig::default();
        assert!(matches!(
            OpenAiEmbedder::new(&config),
            Err(PipelineError::ConfigError(_))
        ));
    }
}
