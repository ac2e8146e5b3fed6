pub mod llama_server;
pub mod openai;
pub mod provider;

pub use llama_server::LlamaServerEmbedder;
pub use openai::OpenAiEmbedder;
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;

use crate::config::{EmbeddingConfig, EmbeddingProviderKind};
use crate::utils::error::Result;
use std::sync::Arc;

/// Build the configured embedding client.
pub fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let provider: Arc<dyn EmbeddingProvider> = match config.provider {
        EmbeddingProviderKind::OpenAi => Arc::new(OpenAiEmbedder::new(config)?),
        EmbeddingProviderKind::LlamaServer => Arc::new(LlamaServerEmbedder::new(config)?),
    };
    Ok(provider)
}
