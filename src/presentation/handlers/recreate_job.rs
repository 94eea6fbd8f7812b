use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::JobId;
use crate::presentation::handlers::create_job::JobAcceptedResponse;
use crate::presentation::handlers::error::{error_response, map_job_error_response};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn recreate_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return error_response(StatusCode::NOT_FOUND, "Extraction not found");
    };

    match state.map_job_service.recreate(id).await {
        Ok(accepted) => (
            StatusCode::ACCEPTED,
            Json(JobAcceptedResponse {
                id: accepted.id.to_string(),
                status: accepted.status.as_str().to_string(),
                message: "Map extraction started in background".to_string(),
            }),
        )
            .into_response(),
        Err(e) => map_job_error_response(e),
    }
}
