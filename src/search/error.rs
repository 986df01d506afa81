//! Search error taxonomy / 搜索错误分类
//!
//! Per-file errors degrade that file's contribution to empty, the directory
//! error empties the whole request. Neither aborts the server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O failure opening or reading a data file / 文件读取失败
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON / JSON Lines / CSV content / 内容解析失败
    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },

    /// Relational query failure / 数据库查询失败
    #[error("query failed for {path}: {source}")]
    Query {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    /// The data directory itself cannot be listed / 数据目录无法列出
    #[error("failed to list data directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SearchError {
    pub fn file_read(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn parse(path: &std::path::Path, detail: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            detail: detail.into(),
        }
    }

    pub fn query(path: &std::path::Path, source: sqlx::Error) -> Self {
        Self::Query {
            path: path.display().to_string(),
            source,
        }
    }
}
