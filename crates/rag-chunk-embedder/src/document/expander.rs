use super::chunker::ChunkPacker;
use crate::table::{DocumentRow, SourceRow};
use crate::tokenizer::TokenCounter;
use tracing::debug;

/// What happened to a single row during expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// No text, nothing emitted
    Skipped,
    /// Fits the budget, text kept verbatim
    Kept(String),
    /// Over budget, replaced by packed chunks (possibly none)
    Packed(Vec<String>),
}

/// Decides per row which chunk texts go to the embedder.
pub struct RowExpander<'a> {
    packer: ChunkPacker,
    counter: &'a dyn TokenCounter,
}

impl<'a> RowExpander<'a> {
    pub fn new(packer: ChunkPacker, counter: &'a dyn TokenCounter) -> Self {
        Self { packer, counter }
    }

    /// Attach the full-text token count to a source row.
    pub fn measure(&self, row: SourceRow) -> DocumentRow {
        let n_tokens = row.text.as_deref().map_or(0, |t| self.counter.count(t));
        DocumentRow {
            title: row.title,
            text: row.text,
            n_tokens,
        }
    }

    pub fn expand_row(&self, row: &DocumentRow) -> RowOutcome {
        let Some(text) = row.text.as_deref() else {
            debug!("Skipping row '{}' without text", row.title);
            return RowOutcome::Skipped;
        };

        if row.n_tokens > self.packer.max_tokens() {
            let chunks = self.packer.pack(text, self.counter);
            debug!(
                "Row '{}' has {} tokens, packed into {} chunks",
                row.title,
                row.n_tokens,
                chunks.len()
            );
            RowOutcome::Packed(chunks)
        } else {
            RowOutcome::Kept(text.to_string())
        }
    }
}
