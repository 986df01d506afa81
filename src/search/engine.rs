//! Search engine - orchestrates one search request / 搜索引擎
//!
//! Fan-out model / 并发模型：
//! - One task per data file, bounded by a semaphore / 每个文件一个任务，信号量限流
//! - Tasks accumulate into local buffers, merged after join_all / 本地缓冲，汇合后合并
//! - A failing file degrades to an empty contribution / 单文件失败降级为空
//!
//! Every search re-reads the filesystem in full; nothing is cached across
//! requests.

use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use super::criteria::{RawCriteria, SearchCriteria};
use super::error::SearchError;
use super::images;
use super::readers;
use super::record::MatchResult;
use crate::config;
use crate::utils;

/// Everything one search produced / 一次搜索的全部产出
#[derive(Debug, Default, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<MatchResult>,
    pub images: Vec<String>,
    pub files_scanned: usize,
    pub elapsed_ms: u64,
}

/// Run one search over the data directory / 对数据目录执行一次搜索
///
/// Infallible by design: per-file errors are logged and dropped, and a
/// directory listing failure yields an empty outcome. The HTTP response
/// always renders.
pub async fn search(data_dir: &Path, raw: &RawCriteria) -> SearchOutcome {
    let started = Instant::now();
    let criteria = SearchCriteria::normalize(raw);

    let images = match images::find_related_images(data_dir, &criteria).await {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!("Image scan failed: {}", e);
            Vec::new()
        }
    };

    let files = match list_data_files(data_dir).await {
        Ok(files) => files,
        Err(e) => {
            tracing::error!("{}", e);
            return SearchOutcome {
                results: Vec::new(),
                images,
                files_scanned: 0,
                elapsed_ms: started.elapsed().as_millis() as u64,
            };
        }
    };

    let limit = config::config().search.max_concurrent_files.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let criteria = Arc::new(criteria);

    let mut handles = Vec::with_capacity(files.len());
    for path in files.iter().cloned() {
        // acquire_owned only fails after close, which never happens here
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let criteria = criteria.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            readers::scan_file(&path, &criteria).await
        }));
    }

    let mut results: Vec<MatchResult> = Vec::new();
    for joined in join_all(handles).await {
        match joined {
            Ok(Ok(mut matches)) => results.append(&mut matches),
            Ok(Err(e)) => tracing::warn!("File skipped: {}", e),
            Err(e) => tracing::warn!("Scan task failed: {}", e),
        }
    }

    // Stable sort keeps intra-file discovery order within each source
    results.sort_by(|a, b| a.source.cmp(&b.source));

    SearchOutcome {
        results,
        images,
        files_scanned: files.len(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}

/// List supported data files, sorted by name / 列出支持的数据文件
async fn list_data_files(data_dir: &Path) -> Result<Vec<PathBuf>, SearchError> {
    let map_err = |e: std::io::Error| SearchError::Directory {
        path: data_dir.display().to_string(),
        source: e,
    };

    let mut entries = tokio::fs::read_dir(data_dir).await.map_err(map_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(map_err)? {
        let name = entry.file_name().to_string_lossy().to_string();
        if readers::is_supported_ext(&utils::get_ext(&name)) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::record::RecordPayload;

    fn raw(f: impl FnOnce(&mut RawCriteria)) -> RawCriteria {
        let mut raw = RawCriteria::default();
        f(&mut raw);
        raw
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "John,Doe,john@x.com\n");
        write(dir.path(), "b.csv", "name,email\nJane Doe,jane@x.com\n");
        write(dir.path(), "pic_john.jpg", "");

        let outcome = search(dir.path(), &raw(|r| r.first_name = "john".to_string())).await;

        assert_eq!(outcome.files_scanned, 2);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].source, "a.txt");
        match &outcome.results[0].data {
            RecordPayload::Text(line) => assert_eq!(line, "John,Doe,john@x.com"),
            other => panic!("unexpected payload: {:?}", other),
        }
        assert_eq!(outcome.images, vec!["pic_john.jpg"]);
    }

    #[tokio::test]
    async fn test_malformed_file_does_not_disturb_siblings() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.txt", "ann ann@x.com\n");
        write(dir.path(), "broken.json", "{this is not json");
        write(dir.path(), "more.jsonl", "{\"email\":\"ann@x.com\"}\n");

        let outcome = search(dir.path(), &raw(|r| r.email = "ann@x.com".to_string())).await;

        let sources: Vec<&str> = outcome.results.iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["good.txt", "more.jsonl"]);
    }

    #[tokio::test]
    async fn test_empty_criteria_match_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "John,Doe,john@x.com\nJane,Doe,jane@x.com\n");
        write(dir.path(), "b.jsonl", "{\"email\":\"x@y.z\"}\n");

        let outcome = search(dir.path(), &RawCriteria::default()).await;
        assert!(outcome.results.is_empty());
        assert!(outcome.images.is_empty());
    }

    #[tokio::test]
    async fn test_missing_data_dir_yields_empty_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let outcome = search(&missing, &raw(|r| r.email = "x".to_string())).await;
        assert!(outcome.results.is_empty());
        assert!(outcome.images.is_empty());
        assert_eq!(outcome.files_scanned, 0);
    }

    #[tokio::test]
    async fn test_sqlite_source_tagged_with_filename() {
        use sqlx::sqlite::SqlitePool;

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("people.db");
        let url = format!("sqlite:{}?mode=rwc", db_path.to_string_lossy());
        let pool = SqlitePool::connect(&url).await.unwrap();
        sqlx::query(
            "CREATE TABLE people (email TEXT, username TEXT, phone TEXT, first_name TEXT,
             last_name TEXT, address TEXT, country TEXT, state TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO people VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind("kim@x.com")
            .bind("kim77")
            .bind("555-0101")
            .bind("Kim")
            .bind("Park")
            .bind("2 Oak Ave")
            .bind("KR")
            .bind("Seoul")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;

        let outcome = search(dir.path(), &raw(|r| r.username = "kim77".to_string())).await;
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].source, "people.db");
    }

    #[tokio::test]
    async fn test_results_ordered_by_source_then_discovery() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "z.txt", "ann@x.com first\nann@x.com second\n");
        write(dir.path(), "a.txt", "ann@x.com alpha\n");

        let outcome = search(dir.path(), &raw(|r| r.email = "ann@x.com".to_string())).await;
        let sources: Vec<&str> = outcome.results.iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["a.txt", "z.txt", "z.txt"]);

        match (&outcome.results[1].data, &outcome.results[2].data) {
            (RecordPayload::Text(first), RecordPayload::Text(second)) => {
                assert!(first.contains("first"));
                assert!(second.contains("second"));
            }
            other => panic!("unexpected payloads: {:?}", other),
        }
    }
}
