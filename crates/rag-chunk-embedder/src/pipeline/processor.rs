use crate::config::Settings;
use crate::document::{ChunkPacker, RowExpander, RowOutcome};
use crate::embedding::EmbeddingProvider;
use crate::table::{ChunkRow, EmbeddedChunkRow, SourceRow, TableReader, TableWriter};
use crate::tokenizer::TokenCounter;
use crate::utils::error::Result;
use crate::utils::{Metrics, Timer, TokenHistogram};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    pub rows_read: u64,
    pub rows_skipped: u64,
    pub chunks_written: usize,
    pub output_path: PathBuf,
}

/// Load → measure → shorten → embed → persist, strictly in row order.
pub struct EmbeddingPipeline {
    settings: Settings,
    counter: Arc<dyn TokenCounter>,
    embedder: Arc<dyn EmbeddingProvider>,
    metrics: Metrics,
}

impl EmbeddingPipeline {
    pub fn new(
        settings: Settings,
        counter: Arc<dyn TokenCounter>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            settings,
            counter,
            embedder,
            metrics: Metrics::new(),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn packer(&self) -> ChunkPacker {
        ChunkPacker::new(
            self.settings.chunking.max_tokens,
            self.settings.chunking.trailing_chunk,
        )
    }

    pub async fn run(&self) -> Result<PipelineSummary> {
        let reader = TableReader::from_config(&self.settings.input);
        info!("📥 Reading rows from {:?}", reader.path());

        // 1. Load and shorten rows
        info!(
            "✂️  Chunking rows (max {} tokens per chunk)...",
            self.settings.chunking.max_tokens
        );
        let shortened = self.shorten(reader.open()?)?;

        // 2. Re-measure the final chunks
        let chunks = self.measure_chunks(shortened);
        info!("Created {} chunks", chunks.len());

        // 3. Embed, one request per chunk
        info!("🧠 Generating embeddings with {}...", self.embedder.model());
        let embedded = self.embed_chunks(chunks).await?;

        // 4. Persist
        let writer = TableWriter::new(self.settings.output.path.clone());
        info!("💾 Writing {} rows to {:?}", embedded.len(), writer.path());
        let chunks_written = writer.write_all(&embedded)?;

        info!("✅ Pipeline finished");

        Ok(PipelineSummary {
            rows_read: self.metrics.get_rows_read(),
            rows_skipped: self.metrics.get_rows_skipped(),
            chunks_written,
            output_path: writer.path().to_path_buf(),
        })
    }

    /// Measure each row and replace over-budget rows by their packed chunks.
    pub fn shorten<I>(&self, rows: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = Result<SourceRow>>,
    {
        let expander = RowExpander::new(self.packer(), &*self.counter);
        let mut shortened = Vec::new();
        let mut row_tokens = Vec::new();

        for row in rows {
            let row = expander.measure(row?);
            self.metrics.increment_rows_read();

            if row.text.is_some() {
                row_tokens.push(row.n_tokens);
            }

            match expander.expand_row(&row) {
                RowOutcome::Skipped => self.metrics.increment_rows_skipped(),
                RowOutcome::Kept(text) => shortened.push(text),
                RowOutcome::Packed(chunks) => {
                    self.metrics.increment_rows_packed();
                    shortened.extend(chunks);
                }
            }
        }

        self.metrics.add_chunks_created(shortened.len() as u64);
        self.report_histogram("input rows", &row_tokens);

        Ok(shortened)
    }

    pub fn measure_chunks(&self, chunks: Vec<String>) -> Vec<ChunkRow> {
        let rows: Vec<ChunkRow> = chunks
            .into_iter()
            .map(|text| {
                let n_tokens = self.counter.count(&text);
                ChunkRow { text, n_tokens }
            })
            .collect();

        let counts: Vec<usize> = rows.iter().map(|r| r.n_tokens).collect();
        self.report_histogram("chunks", &counts);

        rows
    }

    /// One request per chunk; the next is only sent once the previous one returned.
    pub async fn embed_chunks(&self, chunks: Vec<ChunkRow>) -> Result<Vec<EmbeddedChunkRow>> {
        let total = chunks.len();
        let mut embedded = Vec::with_capacity(total);

        for (i, chunk) in chunks.into_iter().enumerate() {
            debug!("Embedding chunk {}/{}", i + 1, total);

            let timer = Timer::new();
            let embeddings = self.embedder.embed_single(&chunk.text).await?;
            self.metrics.add_embedding_time(timer.elapsed());
            self.metrics.increment_embeddings_generated();

            embedded.push(EmbeddedChunkRow {
                text: chunk.text,
                n_tokens: chunk.n_tokens,
                embeddings,
            });
        }

        info!("✅ Generated {} embeddings", embedded.len());

        Ok(embedded)
    }

    fn report_histogram(&self, label: &str, counts: &[usize]) {
        if !self.settings.report.histogram || counts.is_empty() {
            return;
        }

        let histogram = TokenHistogram::from_counts(counts, self.settings.report.histogram_bins);
        info!(
            "Token count histogram for {} ({} rows):\n{}",
            label,
            histogram.total(),
            histogram
        );
    }
}
