use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::{required, ArticlesResponse};
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};

#[derive(Debug, serde::Deserialize)]
pub struct NewsQuery {
    category: Option<String>,
}

/// Articles for one category, newest first.
#[tracing::instrument(skip(global))]
pub async fn get_news(
    State(global): State<Arc<Global>>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    let category = required(query.category, "category")?;

    if global.news.needs_api_key(&category) && !global.news.search_configured() {
        return Err(ApiError::internal_server_error(
            ApiErrorCode::NOT_CONFIGURED,
            "news API key is not configured",
        ));
    }

    let articles = global.news.fetch_news_by_category(&category).await;

    Ok(Json(ArticlesResponse { articles }))
}
