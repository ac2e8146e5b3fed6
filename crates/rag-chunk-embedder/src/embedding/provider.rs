use crate::utils::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> String;

    async fn embed_single(&self, text: &str) -> Result<Vec<f32>>;
}
