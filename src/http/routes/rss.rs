use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::required;
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::news::{Article, Category, CloudVendor};

#[derive(Debug, serde::Deserialize)]
pub struct RssQuery {
    category: Option<String>,
}

#[derive(serde::Serialize)]
pub struct RssResponse {
    articles: Vec<Article>,
    count: usize,
    sources: Vec<CloudVendor>,
}

/// Cloud vendor blog feeds only; no search fallback.
#[tracing::instrument(skip(global))]
pub async fn get_rss(
    State(global): State<Arc<Global>>,
    Query(query): Query<RssQuery>,
) -> Result<Json<RssResponse>, ApiError> {
    let category = required(query.category, "category")?;

    let vendors = Category::from_slug(&category)
        .map(|c| c.vendors())
        .filter(|vendors| !vendors.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request(
                ApiErrorCode::UNSUPPORTED_CATEGORY,
                "RSS is only available for cloud categories",
            )
        })?;

    let articles = global.news.fetch_cloud_feeds(&vendors).await;

    Ok(Json(RssResponse {
        count: articles.len(),
        articles,
        sources: vendors,
    }))
}
