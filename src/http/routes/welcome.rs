use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hyper::StatusCode;

use crate::global::Global;
use crate::http::error::{ApiError, ApiErrorCode};
use crate::mailer::is_valid_email;

#[derive(Debug, serde::Deserialize)]
pub struct WelcomeBody {
    #[serde(default)]
    name: String,
    email: String,
}

/// Queues a welcome email for a new subscriber. Never waits on delivery.
#[tracing::instrument(skip_all)]
pub async fn post_welcome(
    State(global): State<Arc<Global>>,
    body: Result<Json<WelcomeBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;

    if !is_valid_email(&body.email) {
        return Err(ApiError::bad_request(ApiErrorCode::INVALID_EMAIL, "invalid email address"));
    }

    let dispatch = global.mailer.dispatch_welcome(&body.name, &body.email);
    let status = if dispatch.queued {
        StatusCode::ACCEPTED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(dispatch)))
}
