use crate::utils::error::{PipelineError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub chunking: ChunkingConfig,
    pub tokenizer: TokenizerConfig,
    pub embedding: EmbeddingConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    /// First column is a row index (pandas `to_csv` layout) and is ignored
    pub has_index_column: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("processed/scraped.csv"),
            has_index_column: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("processed/embeddings.csv"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Token budget per chunk
    pub max_tokens: usize,
    pub trailing_chunk: TrailingChunk,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            trailing_chunk: TrailingChunk::Flush,
        }
    }
}

fn default_max_tokens() -> usize {
    500
}

/// What the packer does with sentences still buffered when the text ends.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrailingChunk {
    /// Discard them, only overflow emits a chunk
    Drop,
    /// Emit them as a final chunk
    #[default]
    Flush,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct TokenizerConfig {
    pub encoding: TokenizerEncoding,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            encoding: TokenizerEncoding::Cl100kBase,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerEncoding {
    Cl100kBase, // text-embedding-ada-002, gpt-3.5/4
    O200kBase,
    P50kBase,
    R50kBase,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProviderKind,
    pub model: String,
    pub base_url: String,
    /// Falls back to `OPENAI_API_KEY` when unset
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::OpenAi,
            model: "text-embedding-ada-002".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "llama")]
    LlamaServer,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ReportConfig {
    pub histogram: bool,
    pub histogram_bins: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            histogram: true,
            histogram_bins: 20,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load from environment first
        dotenvy::dotenv().ok();

        let mut settings = Self::from_sources(Self::environment())?;

        if settings.embedding.api_key.is_none() {
            settings.embedding.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        settings.validate()?;

        Ok(settings)
    }

    /// `APP_<SECTION>__<KEY>`, e.g. `APP_CHUNKING__MAX_TOKENS=800`.
    fn environment() -> Environment {
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(env: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(false))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input.path.exists() {
            return Err(PipelineError::InputNotFound(
                self.input.path.display().to_string(),
            ));
        }

        if self.embedding.provider == EmbeddingProviderKind::OpenAi
            && self.embedding.api_key.is_none()
        {
            return Err(PipelineError::ConfigError(
                "OpenAI provider requires embedding.api_key or OPENAI_API_KEY".to_string(),
            ));
        }

        if self.chunking.max_tokens == 0 {
            warn!("chunking.max_tokens is 0: every oversized row will produce no chunks");
        }

        if self.report.histogram && self.report.histogram_bins == 0 {
            return Err(PipelineError::ConfigError(
                "report.histogram_bins must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
