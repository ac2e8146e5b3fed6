use crate::config::TrailingChunk;
use crate::tokenizer::TokenCounter;
use tracing::debug;

/// Sentence delimiter. Naive on purpose: abbreviations and decimals are not special-cased.
pub const SENTENCE_DELIMITER: &str = ". ";

/// Greedy sentence packer bounded by a token budget.
#[derive(Debug, Clone, Copy)]
pub struct ChunkPacker {
    max_tokens: usize,
    trailing: TrailingChunk,
}

impl ChunkPacker {
    pub fn new(max_tokens: usize, trailing: TrailingChunk) -> Self {
        Self {
            max_tokens,
            trailing,
        }
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Split `text` into sentence-aligned chunks of at most `max_tokens` tokens.
    ///
    /// Each sentence costs its own count (measured with a leading space) plus one
    /// token for the separator it is rejoined with. A sentence that alone exceeds
    /// the budget is dropped. Overflow flushes the buffered sentences before the
    /// current one is considered, so an oversized sentence arriving on an empty
    /// buffer still emits a bare `"."` chunk.
    pub fn pack(&self, text: &str, counter: &dyn TokenCounter) -> Vec<String> {
        let sentences: Vec<&str> = text.split(SENTENCE_DELIMITER).collect();

        let mut chunks = Vec::new();
        let mut tokens_so_far = 0usize;
        let mut chunk: Vec<&str> = Vec::new();

        for sentence in sentences {
            let tokens = counter.count(&format!(" {}", sentence));

            if tokens_so_far + tokens > self.max_tokens {
                chunks.push(format!("{}.", chunk.join(SENTENCE_DELIMITER)));
                chunk.clear();
                tokens_so_far = 0;
            }

            if tokens > self.max_tokens {
                continue;
            }

            chunk.push(sentence);
            tokens_so_far += tokens + 1;
        }

        // text ending in ". " leaves an empty last fragment
        while chunk.last().is_some_and(|s| s.is_empty()) {
            chunk.pop();
        }

        if self.trailing == TrailingChunk::Flush && !chunk.is_empty() {
            let mut last = chunk.join(SENTENCE_DELIMITER);
            if !last.ends_with('.') {
                last.push('.');
            }
            chunks.push(last);
        }

        debug!(
            "Packed {} chars into {} chunks (budget {})",
            text.len(),
            chunks.len(),
            self.max_tokens
        );

        chunks
    }
}
