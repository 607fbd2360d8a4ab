use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::{required, ArticlesResponse};
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};

#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
}

#[tracing::instrument(skip(global))]
pub async fn get_search(
    State(global): State<Arc<Global>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ArticlesResponse>, ApiError> {
    let q = required(query.q, "q")?;

    if !global.news.search_configured() {
        return Err(ApiError::internal_server_error(
            ApiErrorCode::NOT_CONFIGURED,
            "news API key is not configured",
        ));
    }

    let articles = global.news.search_news(&q).await;

    Ok(Json(ArticlesResponse { articles }))
}
