use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::MapJobError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn map_job_error_response(e: MapJobError) -> Response {
    match e {
        MapJobError::InvalidRequest(msg)
        | MapJobError::Conflict(msg)
        | MapJobError::InvalidState(msg) => {
            tracing::warn!(error = %msg, "Rejected map job request");
            error_response(StatusCode::BAD_REQUEST, msg)
        }
        MapJobError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, msg),
        other => {
            tracing::error!(error = %other, "Map job request failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}
