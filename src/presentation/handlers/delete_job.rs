use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::JobId;
use crate::presentation::handlers::error::{error_response, map_job_error_response};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn delete_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return error_response(StatusCode::NOT_FOUND, "Extraction not found");
    };

    match state.map_job_service.delete(id).await {
        Ok(job) => {
            tracing::info!(job_id = %job.id, name = %job.name, "Map job deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => map_job_error_response(e),
    }
}
