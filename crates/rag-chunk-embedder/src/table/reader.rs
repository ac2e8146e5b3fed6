use super::models::SourceRow;
use crate::config::InputConfig;
use crate::utils::error::{PipelineError, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `(title, text)` rows from a CSV table, columns by position.
pub struct TableReader {
    path: PathBuf,
    has_index_column: bool,
}

impl TableReader {
    pub fn new(path: impl Into<PathBuf>, has_index_column: bool) -> Self {
        Self {
            path: path.into(),
            has_index_column,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(config.path.clone(), config.has_index_column)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the table and return a lazy iterator over its rows.
    ///
    /// The iterator is single-pass; call `open` again to re-read the table.
    pub fn open(&self) -> Result<SourceRows> {
        if !self.path.is_file() {
            return Err(PipelineError::InputNotFound(
                self.path.display().to_string(),
            ));
        }

        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        debug!("Opened input table: {:?}", self.path);

        Ok(SourceRows {
            records: reader.into_records(),
            offset: usize::from(self.has_index_column),
        })
    }
}

pub struct SourceRows {
    records: StringRecordsIntoIter<File>,
    offset: usize,
}

impl SourceRows {
    fn to_row(&self, record: &StringRecord) -> Result<SourceRow> {
        let expected = self.offset + 2;
        if record.len() < expected {
            return Err(PipelineError::MissingColumns {
                row: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
                expected,
            });
        }

        let title = record.get(self.offset).unwrap_or_default().to_string();
        let text = record
            .get(self.offset + 1)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(SourceRow { title, text })
    }
}

impl Iterator for SourceRows {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map_err(PipelineError::from)
                .and_then(|r| self.to_row(&r)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_indexed_table() {
        let file = write_csv(",fname,text\n0,intro,Hello. World.\n1,empty,\n2,quoted,\"a, b. c\"\n");
        let reader = TableReader::new(file.path(), true);

        let rows: Vec<SourceRow> = reader.open().unwrap().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].title, "intro");
        assert_eq!(rows[0].text.as_deref(), Some("Hello. World."));
        assert_eq!(rows[1].text, None);
        assert_eq!(rows[2].text.as_deref(), Some("a, b. c"));
    }

    #[test]
    fn test_reads_unindexed_table() {
        let file = write_csv("title,text\nt,body\n");
        let reader = TableReader::new(file.path(), false);

        let rows: Vec<SourceRow> = reader.open().unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(
            rows,
            vec![SourceRow {
                title: "t".to_string(),
                text: Some("body".to_string()),
            }]
        );
    }

    #[test]
    fn test_short_row_is_an_error() {
        let file = write_csv(",title,text\n0,only-title\n");
        let reader = TableReader::new(file.path(), true);

        let first = reader.open().unwrap().next().unwrap();
        assert!(matches!(
            first,
            Err(PipelineError::MissingColumns { found: 2, expected: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let reader = TableReader::new("/no/such/table.csv", true);
        assert!(matches!(reader.open(), Err(PipelineError::InputNotFound(_))));
    }

    #[test]
    fn test_reopen_restarts_iteration() {
        let file = write_csv(",title,text\n0,a,x\n1,b,y\n");
        let reader = TableReader::new(file.path(), true);

        assert_eq!(reader.open().unwrap().count(), 2);
        assert_eq!(reader.open().unwrap().count(), 2);
    }
}
