//! Plain text reader / 纯文本读取器

use async_trait::async_trait;
use std::path::Path;

use super::{keep_matches, FormatReader};
use crate::search::criteria::SearchCriteria;
use crate::search::error::SearchError;
use crate::search::record::{flatten_line, RecordPayload};

/// Reads line-delimited .txt dumps, one record per line / 每行一条记录
pub struct TextReader;

#[async_trait]
impl FormatReader for TextReader {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::file_read(path, e))?;

        let records = content
            .lines()
            .map(|line| (flatten_line(line), RecordPayload::Text(line.to_string())))
            .collect();

        Ok(keep_matches(records, criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::criteria::RawCriteria;
    use std::io::Write;

    fn criteria(email: &str) -> SearchCriteria {
        SearchCriteria::normalize(&RawCriteria {
            email: email.to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_scan_matches_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "John,Doe,john@x.com").unwrap();
        writeln!(file, "Jane Doe jane@x.com").unwrap();
        writeln!(file).unwrap();

        let matches = TextReader.scan(&path, &criteria("jane@x.com")).await.unwrap();
        assert_eq!(matches.len(), 1);
        match &matches[0] {
            RecordPayload::Text(line) => assert_eq!(line, "Jane Doe jane@x.com"),
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextReader
            .scan(&dir.path().join("absent.txt"), &criteria("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::FileRead { .. }));
    }
}
