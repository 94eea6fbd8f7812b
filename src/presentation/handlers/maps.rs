use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::handlers::error::map_job_error_response;
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSizeResponse {
    pub name: String,
    pub size_bytes: u64,
}

pub async fn list_maps_handler(State(state): State<AppState>) -> Response {
    match state.map_job_service.list_maps().await {
        Ok(files) => (StatusCode::OK, Json(files)).into_response(),
        Err(e) => map_job_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn map_size_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.map_job_service.map_size(&name).await {
        Ok(size) => (
            StatusCode::OK,
            Json(MapSizeResponse {
                name: size.name,
                size_bytes: size.size_bytes,
            }),
        )
            .into_response(),
        Err(e) => map_job_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn map_info_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.map_job_service.map_info(&name).await {
        Ok(header) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], header).into_response(),
        Err(e) => map_job_error_response(e),
    }
}
