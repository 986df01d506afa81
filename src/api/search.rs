//! JSON search API / JSON搜索接口

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;
use recordseek::search::{MatchResult, RawCriteria};

use super::ApiResponse;

/// Search response body / 搜索响应
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<MatchResult>,
    pub images: Vec<String>,
    pub total: usize,
    pub files_scanned: usize,
    pub elapsed_ms: u64,
}

/// POST /api/search - 搜索数据目录
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawCriteria>,
) -> Json<ApiResponse<SearchResponse>> {
    let outcome = recordseek::search::search(&state.data_dir, &raw).await;

    let total = outcome.results.len();
    Json(ApiResponse::success(SearchResponse {
        results: outcome.results,
        images: outcome.images,
        total,
        files_scanned: outcome.files_scanned,
        elapsed_ms: outcome.elapsed_ms,
    }))
}
