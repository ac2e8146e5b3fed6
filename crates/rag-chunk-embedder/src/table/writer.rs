use super::models::EmbeddedChunkRow;
use crate::utils::error::Result;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const OUTPUT_HEADER: [&str; 4] = ["", "text", "n_tokens", "embeddings"];

/// Writes `(text, n_tokens, embeddings)` rows behind a leading row index.
pub struct TableWriter {
    path: PathBuf,
}

impl TableWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole table in one go, replacing any previous file.
    pub fn write_all(&self, rows: &[EmbeddedChunkRow]) -> Result<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(OUTPUT_HEADER)?;

        for (index, row) in rows.iter().enumerate() {
            let embeddings = serde_json::to_string(&row.embeddings)?;
            writer.write_record([
                index.to_string(),
                row.text.clone(),
                row.n_tokens.to_string(),
                embeddings,
            ])?;
        }

        writer.flush()?;
        debug!("Wrote {} rows to {:?}", rows.len(), self.path);

        Ok(rows.len())
    }
}
