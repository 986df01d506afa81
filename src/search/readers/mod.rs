//! Format readers / 格式读取器
//!
//! One reader per supported file format, registered behind a common trait.
//! A reader receives one file path and returns the payloads of that file's
//! matching records; a fresh read happens on every search.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::Path;

use super::criteria::SearchCriteria;
use super::error::SearchError;
use super::matcher;
use super::record::{MatchResult, RecordPayload};
use crate::utils;

mod csv;
mod json;
mod sqlite;
mod text;

pub use self::csv::CsvReader;
pub use self::json::{JsonLinesReader, JsonReader};
pub use self::sqlite::SqliteReader;
pub use self::text::TextReader;

/// One file format reader / 单一文件格式读取器
#[async_trait]
pub trait FormatReader: Send + Sync {
    /// Reader name for logging / 用于日志的读取器名称
    fn name(&self) -> &'static str;

    /// File extensions (lowercase, no dot) this reader handles / 支持的扩展名
    fn extensions(&self) -> &'static [&'static str];

    /// Scan one file and return the payloads of its matching records / 扫描单个文件
    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError>;
}

/// Registered readers / 已注册的读取器
static READERS: Lazy<Vec<Box<dyn FormatReader>>> = Lazy::new(|| {
    vec![
        Box::new(TextReader),
        Box::new(CsvReader),
        Box::new(JsonReader),
        Box::new(JsonLinesReader),
        Box::new(SqliteReader),
    ]
});

/// Find the reader for a file extension / 按扩展名查找读取器
pub fn reader_for(ext: &str) -> Option<&'static dyn FormatReader> {
    READERS
        .iter()
        .find(|reader| reader.extensions().contains(&ext))
        .map(|boxed| boxed.as_ref())
}

/// True when some reader handles this extension / 是否为支持的数据文件扩展名
pub fn is_supported_ext(ext: &str) -> bool {
    reader_for(ext).is_some()
}

/// Scan one file, tagging matches with the source filename / 扫描文件并标记来源
///
/// Files with unsupported extensions contribute nothing.
pub async fn scan_file(
    path: &Path,
    criteria: &SearchCriteria,
) -> Result<Vec<MatchResult>, SearchError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let ext = utils::get_ext(&file_name);
    let reader = match reader_for(&ext) {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let payloads = reader.scan(path, criteria).await?;
    tracing::debug!(
        "{} reader produced {} match(es) from {}",
        reader.name(),
        payloads.len(),
        file_name
    );

    Ok(payloads
        .into_iter()
        .map(|data| MatchResult {
            source: file_name.clone(),
            data,
        })
        .collect())
}

/// Apply the match predicate to flattened records / 对扁平化记录应用匹配判定
///
/// Shared by the in-memory readers; the SQLite reader matches in-query.
pub(crate) fn keep_matches(
    records: Vec<(Vec<String>, RecordPayload)>,
    criteria: &SearchCriteria,
) -> Vec<RecordPayload> {
    records
        .into_iter()
        .filter(|(tokens, _)| matcher::matches(tokens, criteria))
        .map(|(_, payload)| payload)
        .collect()
}
