//! Record payloads and flattening / 记录载荷与扁平化
//!
//! Every format reduces one raw entry to an ordered sequence of lowercased
//! tokens for matching, while the payload keeps the original casing for
//! display. Non-string JSON scalars produce no tokens and therefore never
//! match a string criterion.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Token separator for plain text lines / 文本行的分词分隔符
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").expect("valid regex"));

/// Original record data as collected from a file / 文件中收集到的原始记录数据
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecordPayload {
    /// Raw line from a .txt file / 文本文件原始行
    Text(String),
    /// Ordered column name to value pairs (CSV rows, database rows) / 有序列名值对
    Fields(Vec<(String, String)>),
    /// Parsed object from .json / .jsonl / 解析后的JSON对象
    Json(Value),
}

/// One match tagged with its source filename / 带来源文件名的匹配结果
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub source: String,
    pub data: RecordPayload,
}

/// Split a text line on runs of whitespace and commas / 按空白和逗号切分文本行
pub fn flatten_line(line: &str) -> Vec<String> {
    TOKEN_SPLIT
        .split(line)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect()
}

/// Flatten ordered field values (CSV row) / 扁平化有序字段值
pub fn flatten_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

/// Flatten a parsed JSON value / 扁平化解析后的JSON值
///
/// Only an object's own string property values become tokens, in the map's
/// enumeration order. Anything else (arrays, numbers, booleans, null, bare
/// scalars) contributes no tokens.
pub fn flatten_json(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map
            .values()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_lowercase())
            .collect(),
        _ => Vec::new(),
    }
}
