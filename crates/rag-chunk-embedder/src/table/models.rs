use serde::Serialize;

/// Raw input row as read from the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub title: String,
    pub text: Option<String>, // empty cell = absent
}

/// Input row with its full-text token count.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRow {
    pub title: String,
    pub text: Option<String>,
    pub n_tokens: usize,
}

/// Final chunk, measured but not yet embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRow {
    pub text: String,
    pub n_tokens: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedChunkRow {
    pub text: String,
    pub n_tokens: usize,
    pub embeddings: Vec<f32>,
}
