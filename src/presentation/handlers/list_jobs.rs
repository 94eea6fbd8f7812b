use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::MapJob;
use crate::presentation::handlers::error::map_job_error_response;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct JobRecordResponse {
    pub id: String,
    pub name: String,
    pub bbox: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MapJob> for JobRecordResponse {
    fn from(job: MapJob) -> Self {
        Self {
            id: job.id.to_string(),
            name: job.name,
            bbox: job.bbox,
            status: job.status.as_str().to_string(),
            error: job.error,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

pub async fn list_jobs_handler(State(state): State<AppState>) -> Response {
    match state.map_job_service.list_jobs().await {
        Ok(jobs) => {
            let body: Vec<JobRecordResponse> = jobs.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => map_job_error_response(e),
    }
}
