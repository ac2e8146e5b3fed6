use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct LlamaEmbeddingRequest<'a> {
    content: &'a str,
}

/// Client for an already running llama-server started with `--embedding`.
pub struct LlamaServerEmbedder {
    client: Client,
    base_url: String,
    model: String,
}

impl LlamaServerEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

/// Accepts both response shapes llama-server has shipped:
/// legacy `{"embedding": [...]}` and `[{"index": 0, "embedding": [...] | [[...]]}]`.
fn parse_embedding(json: &Value) -> Result<Vec<f32>> {
    let field = if let Some(items) = json.as_array() {
        let first = items.first().ok_or_else(|| {
            PipelineError::InvalidEmbeddingResponse("empty array from llama-server".to_string())
        })?;
        &first["embedding"]
    } else {
        &json["embedding"]
    };

    let values = field.as_array().ok_or_else(|| {
        PipelineError::InvalidEmbeddingResponse("missing 'embedding' field".to_string())
    })?;

    // batch-style nesting [[...]]
    let values = match values.first() {
        Some(Value::Array(inner)) => inner,
        _ => values,
    };

    let embedding: Vec<f32> = values
        .iter()
        .filter_map(|v| v.as_f64().map(|f| f as f32))
        .collect();

    if embedding.is_empty() {
        return Err(PipelineError::InvalidEmbeddingResponse(
            "parsed embedding vector is empty".to_string(),
        ));
    }

    Ok(embedding)
}

#[async_trait]
impl EmbeddingProvider for LlamaServerEmbedder {
    fn model(&self) -> String {
        self.model.clone()
    }

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(format!("{}/embedding", self.base_url))
            .json(&LlamaEmbeddingRequest { content: text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::EmbeddingApiError { status, body });
        }

        let json: Value = response.json().await?;
        let embedding = parse_embedding(&json)?;

        debug!("Parsed embedding vector, length: {}", embedding.len());

        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_legacy_format() {
        let v = parse_embedding(&json!({"embedding": [1.0, 2.0]})).unwrap();
        assert_eq!(v, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_array_format() {
        let v = parse_embedding(&json!([{"index": 0, "embedding": [0.5, 0.25]}])).unwrap();
        assert_eq!(v, vec![0.5, 0.25]);
    }

    #[test]
    fn test_parse_nested_format() {
        let v = parse_embedding(&json!([{"index": 0, "embedding": [[3.0, 4.0]]}])).unwrap();
        assert_eq!(v, vec![3.0, 4.0]);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_embedding(&json!([])).is_err());
        assert!(parse_embedding(&json!({"embedding": []})).is_err());
        assert!(parse_embedding(&json!({"vector": [1.0]})).is_err());
    }

    #[tokio::test]
    async fn test_embed_single_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embedding"))
            .and(body_json(json!({"content": "chunk text"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"index": 0, "embedding": [0.5, 0.5]}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = EmbeddingConfig {
            base_url: server.uri(),
            model: "nomic-embed".to_string(),
            ..EmbeddingConfig::default()
        };
        let embedder = LlamaServerEmbedder::new(&config).unwrap();

        assert_eq!(embedder.embed_single("chunk text").await.unwrap(), vec![0.5, 0.5]);
        assert_eq!(embedder.model(), "nomic-embed");
    }

    #[tokio::test]
    async fn test_embed_single_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embedding"))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading model"))
            .mount(&server)
            .await;

        let config = EmbeddingConfig {
            base_url: server.uri(),
            ..EmbeddingConfig::default()
        };
        let embedder = LlamaServerEmbedder::new(&config).unwrap();

        let err = embedder.embed_single("x").await.unwrap_err();
        assert!(matches!(err, PipelineError::EmbeddingApiError { status: 503, .. }));
    }
}
