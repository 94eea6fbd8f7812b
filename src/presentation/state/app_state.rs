use std::sync::Arc;

use crate::application::services::MapJobService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub map_job_service: Arc<MapJobService>,
    pub settings: Settings,
}
