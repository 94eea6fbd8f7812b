use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::JobId;
use crate::presentation::handlers::error::{error_response, map_job_error_response};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct JobStatusResponse {
    pub id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return error_response(StatusCode::NOT_FOUND, "Extraction not found");
    };

    match state.map_job_service.status(id).await {
        Ok(view) => (
            StatusCode::OK,
            Json(JobStatusResponse {
                id: view.id.to_string(),
                status: view.status.as_str().to_string(),
                error: view.error,
                duration: view.duration.map(|d| format!("{:?}", d)),
                name: view.name,
            }),
        )
            .into_response(),
        Err(e) => map_job_error_response(e),
    }
}
