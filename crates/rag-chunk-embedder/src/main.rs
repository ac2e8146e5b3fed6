use rag_chunk_embedder::embedding::build_provider;
use rag_chunk_embedder::utils::logger::init_logger;
use rag_chunk_embedder::{EmbeddingPipeline, Settings, TiktokenCounter};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger()?;

    info!("Starting RAG chunk embedder...");

    let settings = Settings::load()?;
    info!(
        "Input: {:?}, output: {:?}, max tokens: {}, trailing chunk: {:?}",
        settings.input.path,
        settings.output.path,
        settings.chunking.max_tokens,
        settings.chunking.trailing_chunk
    );

    let counter = Arc::new(TiktokenCounter::new(settings.tokenizer.encoding)?);
    info!("Tokenizer encoding: {:?}", counter.encoding());
    let embedder = build_provider(&settings.embedding)?;

    let pipeline = EmbeddingPipeline::new(settings, counter, embedder);

    match pipeline.run().await {
        Ok(summary) => {
            info!(
                "Wrote {} chunks to {:?}",
                summary.chunks_written, summary.output_path
            );
            pipeline.metrics().print_summary();
            Ok(())
        }
        Err(e) => {
            error!("❌ Pipeline failed: {}", e);
            pipeline.metrics().print_summary();
            Err(e.into())
        }
    }
}
