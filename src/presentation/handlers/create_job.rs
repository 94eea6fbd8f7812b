use axum::extract::{FromRequest, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::presentation::handlers::error::{error_response, map_job_error_response};
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bbox: String,
}

#[derive(Serialize)]
pub struct JobAcceptedResponse {
    pub id: String,
    pub status: String,
    pub message: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn create_job_handler(State(state): State<AppState>, request: Request) -> Response {
    let body = match read_create_request(request).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read create request");
            return error_response(StatusCode::BAD_REQUEST, "Failed to read request data");
        }
    };

    match state.map_job_service.create(&body.name, &body.bbox).await {
        Ok(accepted) => (
            StatusCode::OK,
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

/// Accepts either a JSON or an urlencoded form body.
async fn read_create_request(request: Request) -> Result<CreateJobRequest, String> {
    let is_json = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
        Json::<CreateJobRequest>::from_request(request, &())
            .await
            .map(|Json(body)| body)
            .map_err(|e| e.body_text())
    } else {
        Form::<CreateJobRequest>::from_request(request, &())
            .await
            .map(|Form(body)| body)
            .map_err(|e| e.body_text())
    }
}
