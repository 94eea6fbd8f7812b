use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    create_job_handler, delete_job_handler, health_handler, job_output_handler,
    job_status_handler, list_jobs_handler, list_maps_handler, map_info_handler,
    map_size_handler, recreate_job_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let maps_dir = ServeDir::new(state.settings.storage.maps_dir());

    Router::new()
        .route("/health", get(health_handler))
        .route("/jobs", get(list_jobs_handler).post(create_job_handler))
        .route(
            "/jobs/{job_id}",
            get(job_status_handler).delete(delete_job_handler),
        )
        .route("/jobs/{job_id}/recreate", post(recreate_job_handler))
        .route("/jobs/{job_id}/output", get(job_output_handler))
        .route("/maps", get(list_maps_handler))
        .route("/maps/size/{name}", get(map_size_handler))
        .route("/maps/info/{name}", get(map_info_handler))
        .nest_service("/maps/serve", maps_dir)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
