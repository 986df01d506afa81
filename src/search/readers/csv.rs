//! CSV reader / CSV读取器

use async_trait::async_trait;
use std::path::Path;

use super::{keep_matches, FormatReader};
use crate::search::criteria::SearchCriteria;
use crate::search::error::SearchError;
use crate::search::record::{flatten_values, RecordPayload};

/// Reads header-row CSV files, one record per data row / 每行数据一条记录
pub struct CsvReader;

#[async_trait]
impl FormatReader for CsvReader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::file_read(path, e))?;

        let mut reader = ::csv::Reader::from_reader(content.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| SearchError::parse(path, e.to_string()))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    // Broken rows are skipped, the rest of the file still counts
                    tracing::warn!("Skipping malformed CSV row in {}: {}", path.display(), e);
                    continue;
                }
            };

            let tokens = flatten_values(row.iter());
            let fields = headers
                .iter()
                .zip(row.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            records.push((tokens, RecordPayload::Fields(fields)));
        }

        Ok(keep_matches(records, criteria))
    }
}
