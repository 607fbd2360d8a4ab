use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::global::Global;
use crate::http::error::ApiError;
use crate::news::Article;

pub mod news;
pub mod rss;
pub mod search;
pub mod views;
pub mod welcome;

pub fn routes() -> Router<Arc<Global>> {
    Router::new()
        .route("/", get(root))
        .route("/news", get(news::get_news))
        .route("/search", get(search::get_search))
        .route("/rss", get(rss::get_rss))
        .route("/views", get(views::get_views).post(views::post_view))
        .route("/views/batch", post(views::post_batch))
        .route("/views/stream", get(views::stream_views))
        .route("/welcome", post(welcome::post_welcome))
}

#[derive(serde::Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

/// A query parameter that must be present and non-blank.
pub(super) fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::missing_parameter(name))
}

#[derive(serde::Serialize)]
pub(crate) struct RootResponse {
    message: &'static str,
    version: &'static str,
    uptime: u64,
    search_configured: bool,
    categories: Vec<String>,
    endpoints: Vec<&'static str>,
}

#[tracing::instrument(skip(global))]
pub(crate) async fn root(State(global): State<Arc<Global>>) -> Json<RootResponse> {
    use crate::news::{Category, CloudVendor};

    let categories = Category::KEYWORD_CATEGORIES
        .into_iter()
        .chain([Category::Headlines])
        .chain(CloudVendor::ALL.into_iter().map(Category::Cloud))
        .map(|c| c.slug())
        .collect();

    Json(RootResponse {
        message: "Segmento Pulse news API",
        version: env!("CARGO_PKG_VERSION"),
        uptime: global.started_at.elapsed().as_secs(),
        search_configured: global.news.search_configured(),
        categories,
        endpoints: vec![
            "/api/pulse/news?category=",
            "/api/pulse/search?q=",
            "/api/pulse/rss?category=",
            "/api/pulse/views?url=",
            "/api/pulse/views/batch",
            "/api/pulse/views/stream?url=",
            "/api/pulse/welcome",
        ],
    })
}
