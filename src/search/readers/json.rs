//! JSON and JSON Lines readers / JSON与JSON Lines读取器

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::{keep_matches, FormatReader};
use crate::search::criteria::SearchCriteria;
use crate::search::error::SearchError;
use crate::search::record::{flatten_json, RecordPayload};

/// Reads .json files holding a top-level array of objects / 顶层数组的JSON文件
pub struct JsonReader;

#[async_trait]
impl FormatReader for JsonReader {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::file_read(path, e))?;

        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| SearchError::parse(path, e.to_string()))?;

        let items = match parsed.as_array() {
            Some(items) => items,
            None => {
                tracing::warn!("JSON data in {} is not an array, skipping", path.display());
                return Ok(Vec::new());
            }
        };

        let records = items
            .iter()
            .map(|item| (flatten_json(item), RecordPayload::Json(item.clone())))
            .collect();

        Ok(keep_matches(records, criteria))
    }
}

/// Reads .jsonl files, one object per non-blank line / 每个非空行一个对象
pub struct JsonLinesReader;

#[async_trait]
impl FormatReader for JsonLinesReader {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jsonl"]
    }

    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SearchError::file_read(path, e))?;

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(e) => {
                    // One bad line does not sink the rest of the file
                    tracing::warn!(
                        "Skipping malformed JSON line in {}: {}",
                        path.display(),
                        e
                    );
                    continue;
                }
            };
            records.push((flatten_json(&parsed), RecordPayload::Json(parsed)));
        }

        Ok(keep_matches(records, criteria))
    }
}
