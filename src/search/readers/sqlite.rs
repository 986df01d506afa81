//! SQLite reader / SQLite读取器
//!
//! Relational sources are matched inside the query rather than by
//! flattening: a single SELECT over the `people` table with a case-folded
//! LIKE disjunction restricted to the non-empty criteria. Criterion values
//! are always bound parameters, and LIKE wildcards in them are escaped so
//! user input matches literally.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row};
use std::path::Path;

use super::FormatReader;
use crate::search::criteria::SearchCriteria;
use crate::search::error::SearchError;
use crate::search::record::RecordPayload;

/// Fixed table queried in every .db / .sqlite source / 固定查询的表名
const PEOPLE_TABLE: &str = "people";

/// Reads SQLite databases via a per-search connection / 每次搜索独立连接
pub struct SqliteReader;

/// Wrap a criterion as a literal LIKE pattern / 将条件包装为字面LIKE模式
///
/// `%` and `_` are wildcards inside LIKE patterns even when bound as
/// parameters, so they are escaped along with the escape character itself.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Decode one row into ordered column name and value pairs / 解码单行
fn row_fields(row: &SqliteRow) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(row.columns().len());
    for (index, column) in row.columns().iter().enumerate() {
        let value = if let Ok(text) = row.try_get::<String, _>(index) {
            text
        } else if let Ok(int) = row.try_get::<i64, _>(index) {
            int.to_string()
        } else if let Ok(real) = row.try_get::<f64, _>(index) {
            real.to_string()
        } else {
            String::new()
        };
        fields.push((column.name().to_string(), value));
    }
    fields
}

#[async_trait]
impl FormatReader for SqliteReader {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["db", "sqlite"]
    }

    async fn scan(
        &self,
        path: &Path,
        criteria: &SearchCriteria,
    ) -> Result<Vec<RecordPayload>, SearchError> {
        // Column names are fixed constants; only values are ever bound
        let mut clauses: Vec<String> = Vec::new();
        let mut patterns: Vec<String> = Vec::new();

        for (column, value) in criteria.plain_fields() {
            if value.is_empty() {
                continue;
            }
            clauses.push(format!("LOWER({}) LIKE ? ESCAPE '\\'", column));
            patterns.push(like_pattern(value));
        }

        // Same composite semantics as the in-memory predicate
        if !criteria.full_name.is_empty() {
            clauses.push("LOWER(first_name || ' ' || last_name) LIKE ? ESCAPE '\\'".to_string());
            patterns.push(like_pattern(&criteria.full_name));
        }

        if clauses.is_empty() {
            return Ok(Vec::new());
        }

        let db_url = format!("sqlite:{}?mode=ro", path.to_string_lossy());
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await
            .map_err(|e| SearchError::query(path, e))?;

        let sql = format!(
            "SELECT * FROM {} WHERE {}",
            PEOPLE_TABLE,
            clauses.join(" OR ")
        );

        let mut query = sqlx::query(&sql);
        for pattern in &patterns {
            query = query.bind(pattern);
        }

        let result = query.fetch_all(&pool).await;
        pool.close().await;

        let rows = result.map_err(|e| SearchError::query(path, e))?;
        Ok(rows
            .iter()
            .map(|row| RecordPayload::Fields(row_fields(row)))
            .collect())
    }
}
