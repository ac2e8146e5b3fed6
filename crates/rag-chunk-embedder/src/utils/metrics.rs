use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters for one pipeline run.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    rows_read: AtomicU64,
    rows_skipped: AtomicU64,
    rows_packed: AtomicU64,
    chunks_created: AtomicU64,
    embeddings_generated: AtomicU64,
    total_embedding_time_ms: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                rows_read: AtomicU64::new(0),
                rows_skipped: AtomicU64::new(0),
                rows_packed: AtomicU64::new(0),
                chunks_created: AtomicU64::new(0),
                embeddings_generated: AtomicU64::new(0),
                total_embedding_time_ms: AtomicU64::new(0),
            }),
        }
    }

    pub fn increment_rows_read(&self) {
        self.inner.rows_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows_skipped(&self) {
        self.inner.rows_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rows_packed(&self) {
        self.inner.rows_packed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_chunks_created(&self, count: u64) {
        self.inner.chunks_created.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_embeddings_generated(&self) {
        self.inner.embeddings_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_embedding_time(&self, duration: Duration) {
        self.inner
            .total_embedding_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn get_rows_read(&self) -> u64 {
        self.inner.rows_read.load(Ordering::Relaxed)
    }

    pub fn get_rows_skipped(&self) -> u64 {
        self.inner.rows_skipped.load(Ordering::Relaxed)
    }

    pub fn get_rows_packed(&self) -> u64 {
        self.inner.rows_packed.load(Ordering::Relaxed)
    }

    pub fn get_chunks_created(&self) -> u64 {
        self.inner.chunks_created.load(Ordering::Relaxed)
    }

    pub fn get_embeddings_generated(&self) -> u64 {
        self.inner.embeddings_generated.load(Ordering::Relaxed)
    }

    pub fn get_total_embedding_time_ms(&self) -> u64 {
        self.inner.total_embedding_time_ms.load(Ordering::Relaxed)
    }

    pub fn get_average_embedding_time_ms(&self) -> f64 {
        let generated = self.get_embeddings_generated();
        if generated == 0 {
            return 0.0;
        }

        self.get_total_embedding_time_ms() as f64 / generated as f64
    }

    pub fn print_summary(&self) {
        println!("\n📊 === METRICS SUMMARY ===");
        println!("Rows Read: {}", self.get_rows_read());
        println!("Rows Skipped (no text): {}", self.get_rows_skipped());
        println!("Rows Packed (over budget): {}", self.get_rows_packed());
        println!("Chunks Created: {}", self.get_chunks_created());
        println!("Embeddings Generated: {}", self.get_embeddings_generated());
        println!(
            "Average Embedding Time: {:.2}ms",
            self.get_average_embedding_time_ms()
        );
        println!(
            "Total Embedding Time: {:.2}s",
            self.get_total_embedding_time_ms() as f64 / 1000.0
        );
        println!("=========================\n");
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Measures one embedding request.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_shared_between_clones() {
        let metrics = Metrics::new();
        let handle = metrics.clone();

        handle.increment_rows_read();
        handle.increment_rows_read();
        handle.increment_rows_skipped();
        handle.increment_rows_packed();
        handle.add_chunks_created(3);

        assert_eq!(metrics.get_rows_read(), 2);
        assert_eq!(metrics.get_rows_skipped(), 1);
        assert_eq!(metrics.get_rows_packed(), 1);
        assert_eq!(metrics.get_chunks_created(), 3);
    }

    #[test]
    fn test_average_embedding_time() {
        let metrics = Metrics::new();
        assert_eq!(metrics.get_average_embedding_time_ms(), 0.0);

        metrics.increment_embeddings_generated();
        metrics.increment_embeddings_generated();
        metrics.add_embedding_time(Duration::from_millis(30));

        assert_eq!(metrics.get_average_embedding_time_ms(), 15.0);
    }
}
