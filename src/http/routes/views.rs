use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use tokio_stream::{Stream, StreamExt};

use super::required;
use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::views::ViewCount;

/// Batches larger than this are rejected.
const MAX_BATCH: usize = 100;

#[derive(Debug, serde::Deserialize)]
pub struct ViewQuery {
    url: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ViewBody {
    url: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct BatchBody {
    urls: Vec<String>,
}

#[derive(serde::Serialize)]
pub struct BatchResponse {
    tracked: usize,
}

fn non_blank(url: &str) -> Result<String, ApiError> {
    required(Some(url.to_string()), "url")
}

#[tracing::instrument(skip(global))]
pub async fn get_views(
    State(global): State<Arc<Global>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewCount>, ApiError> {
    let url = required(query.url, "url")?;
    let view_count = global.views.count(&url).await;

    Ok(Json(ViewCount { url, view_count }))
}

#[tracing::instrument(skip_all)]
pub async fn post_view(
    State(global): State<Arc<Global>>,
    body: Result<Json<ViewBody>, JsonRejection>,
) -> Result<Json<ViewCount>, ApiError> {
    let Json(body) = body?;
    let url = non_blank(&body.url)?;
    let view_count = global.views.increment(&url).await;

    Ok(Json(ViewCount { url, view_count }))
}

#[tracing::instrument(skip_all)]
pub async fn post_batch(
    State(global): State<Arc<Global>>,
    body: Result<Json<BatchBody>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(body) = body?;

    if body.urls.len() > MAX_BATCH {
        return Err(ApiError::bad_request(
            ApiErrorCode::INVALID_BODY,
            format!("at most {MAX_BATCH} urls per batch"),
        ));
    }

    let urls: Vec<String> = body
        .urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    let tracked = global.views.track_many(&urls).await;

    Ok(Json(BatchResponse { tracked }))
}

/// Server-sent events carrying the view count of one article.
#[tracing::instrument(skip(global))]
pub async fn stream_views(
    State(global): State<Arc<Global>>,
    Query(query): Query<ViewQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let url = required(query.url, "url")?;

    let counts = global.views.subscribe(&url).await;
    let events = counts.map(|count| Ok(Event::default().data(count.to_string())));

    Ok(Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}
