//! HTML search pages / HTML搜索页面

use axum::{
    extract::{Form, State},
    response::Html,
};
use std::sync::Arc;

use crate::state::AppState;
use recordseek::search::RawCriteria;
use recordseek::ui::pages;

/// GET / - 空白搜索表单
pub async fn index() -> Html<String> {
    Html(pages::search_page(&RawCriteria::default(), None))
}

/// POST /search - 搜索并回填表单
pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(raw): Form<RawCriteria>,
) -> Html<String> {
    let outcome = recordseek::search::search(&state.data_dir, &raw).await;
    Html(pages::search_page(&raw, Some(&outcome)))
}
