use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::domain::JobId;
use crate::presentation::handlers::error::{error_response, map_job_error_response};
use crate::presentation::state::AppState;

/// Streams a job's archive. Range requests are honoured so map viewers can read
/// tiles straight from the file.
#[tracing::instrument(skip(state, request))]
pub async fn job_output_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    request: Request,
) -> Response {
    let Ok(id) = job_id.parse::<JobId>() else {
        return error_response(StatusCode::NOT_FOUND, "Extraction not found");
    };

    let path = match state.map_job_service.output_path(id).await {
        Ok(path) => path,
        Err(e) => return map_job_error_response(e),
    };

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
